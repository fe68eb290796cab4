use crate::{LifeError, Result};
use rand::Rng;

pub const DEAD: u8 = 0;
pub const ALIVE: u8 = 1;

/// Rectangular field of cells stored row-major, one byte per cell.
///
/// Every cell holds exactly [`DEAD`] or [`ALIVE`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<u8>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Create a grid with all cells dead.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let len = cell_count(width, height)?;
        Ok(Self {
            cells: vec![DEAD; len],
            width,
            height,
        })
    }

    /// Create a grid from row-major cells; each value must be 0 or 1.
    pub fn from_cells(width: usize, height: usize, cells: Vec<u8>) -> Result<Self> {
        check_cells(&cells, width, height)?;
        Ok(Self {
            cells,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<u8> {
        self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [u8] {
        &mut self.cells
    }

    pub fn same_dimensions(&self, other: &Grid) -> bool {
        self.width == other.width && self.height == other.height
    }

    pub fn get(&self, x: usize, y: usize) -> Result<bool> {
        let idx = self.index(x, y)?;
        Ok(self.cells[idx] == ALIVE)
    }

    pub fn set(&mut self, x: usize, y: usize, alive: bool) -> Result<()> {
        let idx = self.index(x, y)?;
        self.cells[idx] = alive as u8;
        Ok(())
    }

    /// Flip the cell at (x, y) and return its new state.
    pub fn toggle(&mut self, x: usize, y: usize) -> Result<bool> {
        let idx = self.index(x, y)?;
        self.cells[idx] ^= ALIVE;
        Ok(self.cells[idx] == ALIVE)
    }

    /// Replace the grid with an all-dead one of the new size.
    ///
    /// Old content is discarded even where the sizes overlap.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<()> {
        *self = Self::new(width, height)?;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.cells.fill(DEAD);
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c == ALIVE).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&c| c == DEAD)
    }

    /// Fill with random cells, each alive with probability `density`.
    ///
    /// `seed` - random seed (if `None`, then random seed is generated)
    pub fn randomize(&mut self, density: f64, seed: Option<u64>) -> Result<()> {
        use rand::SeedableRng;
        use rand_chacha::ChaCha8Rng;

        let mut rng = if let Some(x) = seed {
            ChaCha8Rng::seed_from_u64(x)
        } else {
            ChaCha8Rng::from_entropy()
        };
        self.randomize_with(density, &mut rng)
    }

    pub fn randomize_with<R: Rng>(&mut self, density: f64, rng: &mut R) -> Result<()> {
        if !(0.0..=1.0).contains(&density) {
            return Err(LifeError::InvalidDensity(density));
        }
        for cell in self.cells.iter_mut() {
            *cell = rng.gen_bool(density) as u8;
        }
        Ok(())
    }

    fn index(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(LifeError::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(x + y * self.width)
    }
}

/// Number of cells of a `width` x `height` grid; both sides must be non-zero
/// and the product must fit in `usize`.
pub(crate) fn cell_count(width: usize, height: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(LifeError::InvalidDimension { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(LifeError::InvalidDimension { width, height })
}

/// Validate raw cells against the declared dimensions.
pub(crate) fn check_cells(cells: &[u8], width: usize, height: usize) -> Result<()> {
    let expected = cell_count(width, height)?;
    if cells.len() != expected {
        return Err(LifeError::DimensionMismatch {
            expected,
            actual: cells.len(),
        });
    }
    if let Some((index, &value)) = cells.iter().enumerate().find(|&(_, &c)| c > ALIVE) {
        return Err(LifeError::InvalidCellValue { index, value });
    }
    Ok(())
}
