pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod record;
pub mod session;
pub mod trace;
pub mod tracking;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use config::CounterConfig;
pub use error::{CounterError, Result};
pub use session::{CrossingSession, Observation, SessionSnapshot};
