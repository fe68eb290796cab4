//! Background step computation over a request/response channel.
//!
//! The worker owns no grid state: each request carries an owned snapshot and
//! each reply carries the computed generation. Only one request may be in
//! flight at a time.

use crate::{engine, LifeError, Result};
use serde::{Deserialize, Serialize};
use std::{
    sync::mpsc::{self, Receiver, Sender, TryRecvError},
    thread::{self, JoinHandle},
};

/// Snapshot sent to the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRequest {
    pub grid: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

/// Next generation, same dimensions and ordering as the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResponse {
    pub grid: Vec<u8>,
}

impl StepRequest {
    /// Compute the response on the current thread.
    pub fn compute(&self) -> Result<StepResponse> {
        let grid = engine::step_cells(&self.grid, self.width, self.height)?;
        Ok(StepResponse { grid })
    }
}

/// Identifies a submitted request.
pub type Ticket = u64;

#[derive(Debug)]
pub struct StepReply {
    pub ticket: Ticket,
    pub result: Result<StepResponse>,
}

struct Job {
    ticket: Ticket,
    request: StepRequest,
}

pub struct StepWorker {
    jobs: Option<Sender<Job>>,
    replies: Receiver<StepReply>,
    outstanding: Option<Ticket>,
    next_ticket: Ticket,
    handle: Option<JoinHandle<()>>,
}

impl StepWorker {
    pub fn spawn() -> Result<Self> {
        let (job_tx, job_rx) = mpsc::channel::<Job>();
        let (reply_tx, reply_rx) = mpsc::channel();

        let handle = thread::Builder::new()
            .name("life-step-worker".to_string())
            .spawn(move || {
                for Job { ticket, request } in job_rx {
                    let result = request.compute();
                    if reply_tx.send(StepReply { ticket, result }).is_err() {
                        break;
                    }
                }
                log::debug!("step worker exiting");
            })
            .map_err(|e| LifeError::WorkerSpawn(e.to_string()))?;

        log::info!("step worker started");
        Ok(Self {
            jobs: Some(job_tx),
            replies: reply_rx,
            outstanding: None,
            next_ticket: 0,
            handle: Some(handle),
        })
    }

    /// Whether a reply is still outstanding.
    pub fn is_busy(&self) -> bool {
        self.outstanding.is_some()
    }

    pub fn submit(&mut self, request: StepRequest) -> Result<Ticket> {
        if self.outstanding.is_some() {
            return Err(LifeError::WorkerBusy);
        }
        let ticket = self.next_ticket;
        let jobs = self.jobs.as_ref().ok_or(LifeError::WorkerDisconnected)?;
        jobs.send(Job { ticket, request })
            .map_err(|_| LifeError::WorkerDisconnected)?;
        self.next_ticket += 1;
        self.outstanding = Some(ticket);
        Ok(ticket)
    }

    /// Poll for the outstanding reply without blocking.
    pub fn try_receive(&mut self) -> Result<Option<StepReply>> {
        if self.outstanding.is_none() {
            return Ok(None);
        }
        match self.replies.try_recv() {
            Ok(reply) => {
                self.outstanding = None;
                Ok(Some(reply))
            }
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(LifeError::WorkerDisconnected),
        }
    }

    /// Block until the outstanding reply arrives; `None` if nothing is in flight.
    pub fn receive(&mut self) -> Result<Option<StepReply>> {
        if self.outstanding.is_none() {
            return Ok(None);
        }
        let reply = self
            .replies
            .recv()
            .map_err(|_| LifeError::WorkerDisconnected)?;
        self.outstanding = None;
        Ok(Some(reply))
    }

    /// Close the job channel and wait for the worker thread to finish.
    ///
    /// A reply to an already submitted request stays receivable; further
    /// submissions fail with [`LifeError::WorkerDisconnected`].
    pub fn shutdown(&mut self) {
        // closing the job channel ends the worker loop
        self.jobs.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("step worker panicked");
            }
        }
    }
}

impl Drop for StepWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
