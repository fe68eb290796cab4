//! Run/stop control of the simulation loop.
//!
//! The host calls [`Driver::tick`] once per display refresh. While running,
//! each tick advances one generation and draws it; the step always finishes
//! before its draw, and the draw before the next step.

use crate::render::{Renderer, Surface};
use crate::worker::{StepWorker, Ticket};
use crate::{LifeError, Result, Session};
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    Stopped,
    Running,
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Stopped, or waiting for the worker.
    Idle,
    /// A generation was applied and drawn.
    Stepped {
        painted: usize,
        step_duration: Duration,
    },
    /// A worker result arrived but no longer applied to the session.
    Discarded,
}

struct InFlight {
    ticket: Ticket,
    run_id: u64,
    revision: u64,
    epoch: u64,
    /// Cells the request was computed from.
    base: Vec<u8>,
    submitted: Instant,
}

pub struct Driver {
    state: DriverState,
    worker: Option<StepWorker>,
    in_flight: Option<InFlight>,
    run_id: u64,
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver {
    /// Driver computing generations on the calling thread.
    pub fn new() -> Self {
        Self {
            state: DriverState::Stopped,
            worker: None,
            in_flight: None,
            run_id: 0,
        }
    }

    /// Driver computing generations on a background worker.
    pub fn with_worker(worker: StepWorker) -> Self {
        Self {
            worker: Some(worker),
            ..Self::new()
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    pub fn is_offloaded(&self) -> bool {
        self.worker.is_some()
    }

    /// Returns `false` if already running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.run_id += 1;
        self.state = DriverState::Running;
        log::info!("simulation started");
        true
    }

    /// Returns `false` if already stopped. An in-flight worker step is not
    /// cancelled; its result is dropped when it arrives.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state = DriverState::Stopped;
        log::info!("simulation stopped");
        true
    }

    /// Draw whatever the raster has not shown yet.
    pub fn present<S: Surface + ?Sized>(
        &mut self,
        session: &mut Session,
        renderer: &Renderer,
        surface: &mut S,
    ) -> Result<usize> {
        if !session.needs_present() {
            return Ok(0);
        }
        let (current, previous) = session.generation_pair();
        let painted = renderer.draw(surface, current, previous)?;
        session.mark_presented();
        Ok(painted)
    }

    /// Advance and draw one generation if running.
    ///
    /// Any error stops the driver before it is returned.
    pub fn tick<S: Surface + ?Sized>(
        &mut self,
        session: &mut Session,
        renderer: &Renderer,
        surface: &mut S,
    ) -> Result<TickOutcome> {
        let result = if self.worker.is_some() {
            self.tick_offloaded(session, renderer, surface)
        } else {
            self.tick_inline(session, renderer, surface)
        };
        if let Err(e) = &result {
            log::error!("halting simulation: {e}");
            self.state = DriverState::Stopped;
        }
        result
    }

    fn tick_inline<S: Surface + ?Sized>(
        &mut self,
        session: &mut Session,
        renderer: &Renderer,
        surface: &mut S,
    ) -> Result<TickOutcome> {
        if !self.is_running() {
            return Ok(TickOutcome::Idle);
        }
        // pending edits must reach the raster before the buffers swap
        self.present(session, renderer, surface)?;

        let timer = Instant::now();
        session.step()?;
        let step_duration = timer.elapsed();

        let painted = self.present(session, renderer, surface)?;
        log::debug!(
            "generation {}: {:?}, {} cells painted",
            session.generation(),
            step_duration,
            painted
        );
        Ok(TickOutcome::Stepped {
            painted,
            step_duration,
        })
    }

    fn tick_offloaded<S: Surface + ?Sized>(
        &mut self,
        session: &mut Session,
        renderer: &Renderer,
        surface: &mut S,
    ) -> Result<TickOutcome> {
        let Some(worker) = self.worker.as_mut() else {
            return Err(LifeError::WorkerDisconnected);
        };

        if let Some(reply) = worker.try_receive()? {
            let Some(in_flight) = self.in_flight.take() else {
                log::warn!("dropping unexpected step reply {}", reply.ticket);
                return Ok(TickOutcome::Discarded);
            };
            debug_assert_eq!(in_flight.ticket, reply.ticket);

            if !self.is_running()
                || in_flight.run_id != self.run_id
                || in_flight.epoch != session.epoch()
            {
                log::debug!("dropping stale step reply {}", reply.ticket);
                return Ok(TickOutcome::Discarded);
            }

            let response = reply.result?;
            let committed = if in_flight.revision == session.revision() {
                session.commit(&response.grid)
            } else {
                // cells toggled while the step was computed keep their new state
                log::debug!("rebasing step reply {} onto edits", reply.ticket);
                session.commit_rebased(&response.grid, &in_flight.base)
            };
            match committed {
                Ok(()) => {}
                Err(e @ LifeError::DimensionMismatch { .. }) => {
                    log::warn!("dropping step reply {}: {e}", reply.ticket);
                    return Ok(TickOutcome::Discarded);
                }
                Err(e) => return Err(e),
            }
            let step_duration = in_flight.submitted.elapsed();
            let painted = self.present(session, renderer, surface)?;
            log::debug!(
                "generation {}: {:?} round trip, {} cells painted",
                session.generation(),
                step_duration,
                painted
            );
            return Ok(TickOutcome::Stepped {
                painted,
                step_duration,
            });
        }

        if self.is_running() && self.in_flight.is_none() {
            self.present(session, renderer, surface)?;
            let worker = self.worker.as_mut().ok_or(LifeError::WorkerDisconnected)?;
            let request = session.snapshot();
            let base = request.grid.clone();
            let ticket = worker.submit(request)?;
            self.in_flight = Some(InFlight {
                ticket,
                run_id: self.run_id,
                revision: session.revision(),
                epoch: session.epoch(),
                base,
                submitted: Instant::now(),
            });
        }
        Ok(TickOutcome::Idle)
    }
}
