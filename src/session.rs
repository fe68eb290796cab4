//! The grid pair a running simulation owns: the current generation and the
//! one the raster was last synced to.

use crate::grid::check_cells;
use crate::worker::StepRequest;
use crate::{engine, Config, Grid, LifeError, Result};

/// Which buffer the raster surface currently shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Baseline {
    /// Raster content unknown; the next draw repaints everything.
    Unknown,
    /// Raster shows `previous`.
    Previous,
    /// Raster already shows `current`.
    Current,
}

pub struct Session {
    current: Grid,
    previous: Grid,
    baseline: Baseline,
    generation: u64,
    revision: u64,
    epoch: u64,
}

impl Session {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let current = Grid::new(width, height)?;
        Ok(Self {
            previous: current.clone(),
            current,
            baseline: Baseline::Unknown,
            generation: 0,
            revision: 0,
            epoch: 0,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Self::new(config.width, config.height)
    }

    pub fn width(&self) -> usize {
        self.current.width()
    }

    pub fn height(&self) -> usize {
        self.current.height()
    }

    pub fn current(&self) -> &Grid {
        &self.current
    }

    pub fn baseline(&self) -> Baseline {
        self.baseline
    }

    /// Generations computed since creation or the last resize.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Counter bumped by every edit.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Counter bumped by edits that replace the whole field (clear,
    /// randomize, resize). Single cell edits leave it alone.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Grids to hand to the renderer: current, and what the raster shows.
    pub fn generation_pair(&self) -> (&Grid, Option<&Grid>) {
        match self.baseline {
            Baseline::Unknown => (&self.current, None),
            Baseline::Previous => (&self.current, Some(&self.previous)),
            Baseline::Current => (&self.current, Some(&self.current)),
        }
    }

    /// Whether the raster is behind `current`.
    pub fn needs_present(&self) -> bool {
        self.baseline != Baseline::Current
    }

    /// Record that the raster now shows `current`.
    pub fn mark_presented(&mut self) {
        self.baseline = Baseline::Current;
    }

    /// Advance one generation.
    ///
    /// The next generation is written into the buffer holding the previous
    /// one and the buffers are swapped, so the pre-step grid stays intact as
    /// `previous`.
    pub fn step(&mut self) -> Result<()> {
        engine::step_into(&self.current, &mut self.previous)?;
        self.swap_in_next();
        Ok(())
    }

    /// Apply a generation computed elsewhere (by the step worker).
    pub fn commit(&mut self, cells: &[u8]) -> Result<()> {
        check_cells(cells, self.width(), self.height())?;
        self.previous.cells_mut().copy_from_slice(cells);
        self.swap_in_next();
        Ok(())
    }

    /// Apply a generation computed from `base` while cells were edited.
    ///
    /// Cells whose current value differs from `base` keep the edited value;
    /// all others take the computed one.
    pub fn commit_rebased(&mut self, cells: &[u8], base: &[u8]) -> Result<()> {
        check_cells(cells, self.width(), self.height())?;
        check_cells(base, self.width(), self.height())?;
        let next = self.previous.cells_mut();
        let edited = self.current.cells();
        for (((dst, &computed), &old), &now) in next.iter_mut().zip(cells).zip(base).zip(edited) {
            *dst = if now != old { now } else { computed };
        }
        self.swap_in_next();
        Ok(())
    }

    /// Owned copy of the current generation for offloading.
    pub fn snapshot(&self) -> StepRequest {
        StepRequest {
            grid: self.current.cells().to_vec(),
            width: self.width(),
            height: self.height(),
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Result<bool> {
        self.current.get(x, y)
    }

    pub fn set(&mut self, x: usize, y: usize, alive: bool) -> Result<()> {
        self.current.get(x, y)?;
        self.begin_edit();
        self.current.set(x, y, alive)
    }

    /// Flip one cell; out of range coordinates leave the session untouched.
    pub fn toggle(&mut self, x: usize, y: usize) -> Result<bool> {
        self.current.get(x, y)?;
        self.begin_edit();
        self.current.toggle(x, y)
    }

    pub fn clear(&mut self) {
        self.begin_edit();
        self.epoch += 1;
        self.current.clear();
    }

    pub fn randomize(&mut self, density: f64, seed: Option<u64>) -> Result<()> {
        if !(0.0..=1.0).contains(&density) {
            return Err(LifeError::InvalidDensity(density));
        }
        self.begin_edit();
        self.epoch += 1;
        self.current.randomize(density, seed)
    }

    /// Hard reset to an all-dead grid of the new size.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<()> {
        let current = Grid::new(width, height)?;
        log::info!(
            "resizing field {}x{} -> {}x{}",
            self.width(),
            self.height(),
            width,
            height
        );
        self.previous = current.clone();
        self.current = current;
        self.baseline = Baseline::Unknown;
        self.generation = 0;
        self.revision += 1;
        self.epoch += 1;
        Ok(())
    }

    fn begin_edit(&mut self) {
        if self.baseline == Baseline::Current {
            // keep `previous` equal to the raster so the next draw paints
            // every edit made before it
            self.previous.clone_from(&self.current);
            self.baseline = Baseline::Previous;
        }
        self.revision += 1;
    }

    fn swap_in_next(&mut self) {
        std::mem::swap(&mut self.previous, &mut self.current);
        self.baseline = match self.baseline {
            Baseline::Current => Baseline::Previous,
            // the raster showed neither buffer of the new pair
            Baseline::Previous | Baseline::Unknown => Baseline::Unknown,
        };
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn presented(width: usize, height: usize) -> Session {
        let mut session = Session::new(width, height).unwrap();
        session.mark_presented();
        session
    }

    #[test]
    fn new_session_needs_full_draw() {
        let session = Session::new(4, 3).unwrap();
        assert_eq!(session.generation_pair().1, None);
        assert!(session.needs_present());
        assert!(Session::new(0, 3).is_err());
    }

    #[test]
    fn step_keeps_pre_step_grid_as_previous() {
        let mut session = presented(5, 5);
        for x in 1..4 {
            session.set(x, 2, true).unwrap();
        }
        session.mark_presented();
        let before = session.current().clone();

        session.step().unwrap();
        let (current, previous) = session.generation_pair();
        assert_eq!(previous, Some(&before));
        assert_eq!(current, &engine::step(&before));
        assert_eq!(session.generation(), 1);
    }

    #[test]
    fn edits_between_draws_accumulate() {
        let mut session = presented(6, 6);
        session.toggle(0, 0).unwrap();
        session.toggle(5, 5).unwrap();
        session.set(2, 3, true).unwrap();

        let (current, previous) = session.generation_pair();
        let previous = previous.unwrap();
        let changed = current
            .cells()
            .iter()
            .zip(previous.cells())
            .filter(|(c, p)| c != p)
            .count();
        assert_eq!(changed, 3);
        assert!(previous.is_empty());
    }

    #[test]
    fn out_of_range_edit_changes_nothing() {
        let mut session = presented(3, 3);
        let revision = session.revision();
        assert!(matches!(
            session.toggle(3, 1),
            Err(LifeError::OutOfRange { .. })
        ));
        assert_eq!(session.revision(), revision);
        assert!(!session.needs_present());
        assert!(session.current().is_empty());
    }

    #[test]
    fn stepping_with_unpresented_edits_forces_full_draw() {
        let mut session = presented(4, 4);
        session.toggle(1, 1).unwrap();
        session.step().unwrap();
        assert_eq!(session.baseline(), Baseline::Unknown);
        assert_eq!(session.generation_pair().1, None);
    }

    #[test]
    fn commit_validates_cells() {
        let mut session = presented(3, 3);
        let revision = session.revision();
        assert!(matches!(
            session.commit(&[0; 4]),
            Err(LifeError::DimensionMismatch { .. })
        ));
        assert_eq!(session.generation(), 0);

        let next = vec![1, 0, 0, 0, 1, 0, 0, 0, 1];
        session.commit(&next).unwrap();
        assert_eq!(session.current().cells(), &next[..]);
        assert_eq!(session.generation(), 1);
        assert_eq!(session.revision(), revision);
    }

    #[test]
    fn rebased_commit_keeps_edited_cells() {
        let mut session = presented(3, 3);
        let base = session.snapshot().grid;
        session.toggle(0, 0).unwrap();
        session.toggle(1, 1).unwrap();
        session.toggle(1, 1).unwrap();
        let epoch = session.epoch();

        let computed = vec![0, 1, 0, 0, 1, 0, 0, 1, 0];
        session.commit_rebased(&computed, &base).unwrap();
        assert_eq!(session.current().cells(), &[1, 1, 0, 0, 1, 0, 0, 1, 0]);
        assert_eq!(session.generation(), 1);
        assert_eq!(session.epoch(), epoch);

        assert!(matches!(
            session.commit_rebased(&computed, &[0; 4]),
            Err(LifeError::DimensionMismatch { .. })
        ));
        assert_eq!(session.generation(), 1);
    }

    #[test]
    fn wholesale_edits_bump_epoch() {
        let mut session = presented(4, 4);
        session.toggle(2, 2).unwrap();
        assert_eq!(session.epoch(), 0);
        session.clear();
        session.randomize(0.5, Some(3)).unwrap();
        session.resize(5, 5).unwrap();
        assert_eq!(session.epoch(), 3);
        assert_eq!(session.revision(), 4);
    }

    #[test]
    fn resize_resets_everything() {
        let mut session = presented(3, 3);
        session.toggle(1, 1).unwrap();
        session.step().unwrap();
        session.resize(7, 2).unwrap();
        assert_eq!((session.width(), session.height()), (7, 2));
        assert!(session.current().is_empty());
        assert_eq!(session.generation(), 0);
        assert_eq!(session.baseline(), Baseline::Unknown);

        assert!(session.resize(0, 0).is_err());
        assert_eq!((session.width(), session.height()), (7, 2));
    }

    #[test]
    fn randomize_and_clear_are_edits() {
        let mut session = presented(10, 10);
        session.randomize(1.0, Some(5)).unwrap();
        assert_eq!(session.current().population(), 100);
        assert_eq!(session.baseline(), Baseline::Previous);
        session.mark_presented();

        session.clear();
        assert!(session.current().is_empty());
        assert_eq!(session.generation_pair().1.unwrap().population(), 100);
        assert_eq!(session.randomize(2.0, None), Err(LifeError::InvalidDensity(2.0)));
    }

    #[test]
    fn snapshot_matches_current() {
        let mut session = Session::new(4, 2).unwrap();
        session.toggle(3, 1).unwrap();
        let request = session.snapshot();
        assert_eq!((request.width, request.height), (4, 2));
        assert_eq!(request.grid, session.current().cells());
    }
}
