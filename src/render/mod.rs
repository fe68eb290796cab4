//! Change-only rasterization of a grid.

mod pixel_buffer;

pub use pixel_buffer::PixelBuffer;

use crate::grid::{cell_count, ALIVE};
use crate::{Config, Grid, Result};

pub type Rgba = [u8; 4];

pub const BLACK: Rgba = [0, 0, 0, 0xff];
pub const WHITE: Rgba = [0xff, 0xff, 0xff, 0xff];

/// Raster target of the renderer. The renderer only ever writes to it.
pub trait Surface {
    /// Size in pixels as `(width, height)`.
    fn size(&self) -> (usize, usize);

    /// Reallocate to a new size; previous content is undefined afterwards.
    fn resize(&mut self, width: usize, height: usize);

    /// Paint a `size x size` square with its top left corner at (x, y).
    fn fill_block(&mut self, x: usize, y: usize, size: usize, color: Rgba);
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub max_canvas_size: usize,
    pub min_cell_size: usize,
    pub max_cell_size: usize,
    pub alive_color: Rgba,
    pub dead_color: Rgba,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_canvas_size: Config::MAX_CANVAS_SIZE,
            min_cell_size: Config::MIN_CELL_SIZE,
            max_cell_size: Config::MAX_CELL_SIZE,
            alive_color: BLACK,
            dead_color: WHITE,
        }
    }
}

impl From<&Config> for RenderConfig {
    fn from(config: &Config) -> Self {
        Self {
            max_canvas_size: config.max_canvas_size,
            min_cell_size: config.min_cell_size,
            max_cell_size: config.max_cell_size,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Pixel side of one cell, chosen so that the longer side of the raster
    /// stays within `max_canvas_size` unless `min_cell_size` forbids it.
    pub fn cell_size_for(&self, width: usize, height: usize) -> Result<usize> {
        cell_count(width, height)?;
        let RenderConfig {
            max_canvas_size,
            min_cell_size,
            max_cell_size,
            ..
        } = self.config;
        let fit = max_canvas_size / width.max(height);
        // `clamp` panics on an inverted range, so bound from above first
        Ok(fit.min(max_cell_size).max(min_cell_size))
    }

    /// Raster size in pixels for a grid of the given dimensions.
    pub fn raster_size(&self, width: usize, height: usize) -> Result<(usize, usize)> {
        let cell_size = self.cell_size_for(width, height)?;
        Ok((width * cell_size, height * cell_size))
    }

    /// Paint the cells of `current` that differ from `previous`.
    ///
    /// Returns the number of painted cell blocks.
    pub fn draw<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        current: &Grid,
        previous: Option<&Grid>,
    ) -> Result<usize> {
        let cell_size = self.cell_size_for(current.width(), current.height())?;
        self.draw_cells(surface, current, previous, cell_size)
    }

    /// Same as [`Renderer::draw`] with an explicit cell size.
    ///
    /// Every cell is painted when there is no `previous`, when its
    /// dimensions differ from `current`, or when the surface does not match
    /// the raster size (the surface is resized first).
    pub fn draw_cells<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        current: &Grid,
        previous: Option<&Grid>,
        cell_size: usize,
    ) -> Result<usize> {
        let (w, h) = (current.width(), current.height());
        let raster = (w * cell_size, h * cell_size);

        let mut previous = previous.filter(|prev| prev.same_dimensions(current));
        if surface.size() != raster {
            log::debug!(
                "resizing raster to {}x{} ({} px per cell)",
                raster.0,
                raster.1,
                cell_size
            );
            surface.resize(raster.0, raster.1);
            previous = None;
        }

        let mut painted = 0;
        match previous {
            None => {
                for (i, &cell) in current.cells().iter().enumerate() {
                    self.paint(surface, i % w, i / w, cell, cell_size);
                }
                painted = current.cells().len();
            }
            Some(prev) => {
                let pairs = current.cells().iter().zip(prev.cells());
                for (i, (&cell, _)) in pairs.enumerate().filter(|(_, (c, p))| c != p) {
                    self.paint(surface, i % w, i / w, cell, cell_size);
                    painted += 1;
                }
            }
        }
        log::trace!("painted {painted} of {} cells", w * h);
        Ok(painted)
    }

    fn paint<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        x: usize,
        y: usize,
        cell: u8,
        cell_size: usize,
    ) {
        let color = if cell == ALIVE {
            self.config.alive_color
        } else {
            self.config.dead_color
        };
        surface.fill_block(x * cell_size, y * cell_size, cell_size, color);
    }
}
