//! Battles and the challenge workflow that starts them.
//!
//! ## Key Types
//!
//! - `BattleEngine`: Creates battles and resolves attacks and retreats
//! - `BattleState`: One battle, stored as a single document
//! - `BattleRequest`: A pending, accepted or rejected challenge
//!
//! The request workflow (`send`/`accept`/`reject`) is implemented on
//! `BattleEngine` in `workflow`.

pub mod engine;
pub mod request;
pub mod state;
mod workflow;

pub use engine::BattleEngine;
pub use request::{BattleRequest, RequestStatus};
pub use state::{BattleState, Player};
