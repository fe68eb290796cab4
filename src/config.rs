use crate::{LifeError, Result};
use serde::Deserialize;

/// Runtime settings of a simulation session and its renderer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    /// Probability of a cell being alive after a random fill.
    pub density: f64,
    /// Upper bound for the longer side of the raster, in pixels.
    pub max_canvas_size: usize,
    pub min_cell_size: usize,
    pub max_cell_size: usize,
    pub max_fps: f64,
    /// Compute generations on a background worker instead of the UI thread.
    pub offload_steps: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: Self::WIDTH,
            height: Self::HEIGHT,
            density: Self::DENSITY,
            max_canvas_size: Self::MAX_CANVAS_SIZE,
            min_cell_size: Self::MIN_CELL_SIZE,
            max_cell_size: Self::MAX_CELL_SIZE,
            max_fps: Self::MAX_FPS,
            offload_steps: false,
        }
    }
}

impl Config {
    pub const WIDTH: usize = 100;
    pub const HEIGHT: usize = 100;
    pub const DENSITY: f64 = 0.2;
    pub const MAX_CANVAS_SIZE: usize = 500;
    pub const MIN_CELL_SIZE: usize = 1;
    pub const MAX_CELL_SIZE: usize = 10;
    pub const MAX_FPS: f64 = 60.;

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(LifeError::InvalidDimension {
                width: self.width,
                height: self.height,
            });
        }
        if !(0.0..=1.0).contains(&self.density) {
            return Err(LifeError::InvalidDensity(self.density));
        }
        if self.max_canvas_size == 0 {
            return Err(LifeError::InvalidConfig(
                "max_canvas_size must be positive".to_string(),
            ));
        }
        if self.min_cell_size == 0 || self.min_cell_size > self.max_cell_size {
            return Err(LifeError::InvalidConfig(format!(
                "cell size bounds {}..={} are empty or start at zero",
                self.min_cell_size, self.max_cell_size
            )));
        }
        if self.max_fps.is_nan() || self.max_fps <= 0. {
            return Err(LifeError::InvalidConfig(format!(
                "max_fps must be positive, got {}",
                self.max_fps
            )));
        }
        Ok(())
    }
}
