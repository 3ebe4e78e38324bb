//! # circle-battle
//!
//! Battle engine for circle-vs-circle card battles.
//!
//! Two circles challenge each other, each fields a five-card deck built from
//! its members' cards, and the circles take turns attacking until one side
//! runs out of lives.
//!
//! ## Design Principles
//!
//! 1. **Deterministic stats, fresh dice**: A card's stats are a pure function
//!    of its id and grade. Shuffles and damage use a new RNG per call.
//!
//! 2. **Injected collaborators**: Card lookup (`CardSource`), persistence
//!    (`BattleStore`) and randomness (`RngProvider`) are passed in. There is
//!    no global state.
//!
//! 3. **One write per move**: Each operation loads a battle, mutates a copy
//!    and writes the whole document back with a version check, so concurrent
//!    moves cannot silently overwrite each other.
//!
//! ## Modules
//!
//! - `core`: RNG, configuration, errors
//! - `cards`: Cards, stat generation, deck building, damage
//! - `battle`: Battle state, requests, the engine
//! - `store`: Store and card-source traits, codecs, in-memory backends
//!
//! ## Example
//!
//! ```
//! use circle_battle::{BattleEngine, Card, EngineConfig, InMemoryBattleStore, InMemoryCardSource};
//!
//! let cards = InMemoryCardSource::new()
//!     .with_circle("chess", "Chess Club")
//!     .with_circle("go", "Go Club")
//!     .with_card("chess", Card::new("c1", "Rin", 2))
//!     .with_card("go", Card::new("g1", "Sora", 3));
//!
//! let engine = BattleEngine::new(InMemoryBattleStore::new(), cards, EngineConfig::default());
//!
//! let request = engine.send_battle_request("chess", "go").unwrap();
//! let battle = engine.accept_battle_request(&request.request_id).unwrap();
//!
//! let battle = engine.attack(&battle.battle_id, "chess").unwrap();
//! assert_eq!(battle.current_player_id, "go");
//! ```

pub mod battle;
pub mod cards;
pub mod core;
pub mod store;

// Re-export commonly used types
pub use crate::core::{
    BattleError, EngineConfig, EntropyRng, ErrorCode, GameRng, Result, RngProvider, SeededRng,
};

pub use crate::cards::{build_deck, calculate_damage, BattleStats, Card, Deck, DECK_SIZE};

pub use crate::battle::{BattleEngine, BattleRequest, BattleState, Player, RequestStatus};

pub use crate::store::{
    BattleStore, BincodeCodec, CardSource, DocumentCodec, InMemoryBattleStore, InMemoryCardSource,
    JsonCodec, SourceError, StoreError,
};
