//! Card system: cards, stat generation, decks and damage.
//!
//! ## Key Types
//!
//! - `Card`: A circle member's card with battle stats
//! - `BattleStats`: Stats derived deterministically from id and grade
//! - `Deck`: The five cards a circle fields in one battle
//!
//! Stat generation is seeded by the card id. Deck shuffles and damage rolls
//! use a fresh RNG per call instead.

pub mod card;
pub mod damage;
pub mod deck;
pub mod stats;

pub use card::{Card, PLACEHOLDER_ID_PREFIX};
pub use damage::calculate_damage;
pub use deck::{build_deck, mock_pool, placeholder_card, Deck, DECK_SIZE};
pub use stats::{fnv1a_64, BattleStats};
