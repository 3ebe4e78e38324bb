//! Core engine plumbing: RNG, configuration, errors.

pub mod config;
pub mod error;
pub mod rng;

pub use config::EngineConfig;
pub use error::{BattleError, ErrorCode, Result};
pub use rng::{EntropyRng, GameRng, RngProvider, SeededRng};
