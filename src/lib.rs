mod config;
mod driver;
pub mod engine;
mod error;
mod grid;
mod gui;
pub mod render;
mod session;
pub mod worker;

pub use config::Config;
pub use driver::{Driver, DriverState, TickOutcome};
pub use error::{LifeError, Result};
pub use grid::{Grid, ALIVE, DEAD};
pub use gui::App;
pub use render::{PixelBuffer, RenderConfig, Renderer, Surface};
pub use session::{Baseline, Session};
pub use worker::{StepRequest, StepResponse, StepWorker};
