//! Persistence and card lookup behind narrow traits.
//!
//! The engine only talks to `BattleStore` and `CardSource`. Production
//! deployments back them with a document database; the in-memory versions
//! here serve tests and local runs.

mod codec;
mod error;
mod memory;
mod traits;

pub use codec::{BincodeCodec, DocumentCodec, JsonCodec, SCHEMA_VERSION};
pub use error::{Result, SourceError, StoreError};
pub use memory::{InMemoryBattleStore, InMemoryCardSource, MAX_CIRCLE_CARDS};
pub use traits::{BattleStore, CardSource};
