//! Contracts for the engine's two external collaborators.

use std::sync::Arc;

use super::error::{Result, SourceError};
use crate::battle::{BattleRequest, BattleState};
use crate::cards::Card;

/// Read access to circles and their cards.
pub trait CardSource: Send + Sync {
    /// Cards belonging to a circle, with battle stats applied.
    ///
    /// Returns at most `MAX_CIRCLE_CARDS` cards and fails if there are none.
    fn circle_cards(&self, circle_id: &str) -> std::result::Result<Vec<Card>, SourceError>;

    /// Display name of a circle.
    fn circle_name(&self, circle_id: &str) -> std::result::Result<String, SourceError>;
}

/// Keyed persistence for battles and battle requests.
///
/// Writes replace the whole document. A write must carry
/// `version == stored version + 1` (or `1` for a new document); anything else
/// is rejected with `StoreError::Conflict` and nothing is written.
pub trait BattleStore: Send + Sync {
    fn save_battle(&self, state: &BattleState) -> Result<()>;

    /// Load a battle, `None` if it does not exist.
    fn get_battle(&self, battle_id: &str) -> Result<Option<BattleState>>;

    fn save_battle_request(&self, request: &BattleRequest) -> Result<()>;

    /// Load a request, `None` if it does not exist.
    fn get_battle_request(&self, request_id: &str) -> Result<Option<BattleRequest>>;
}

impl<T: CardSource + ?Sized> CardSource for Arc<T> {
    fn circle_cards(&self, circle_id: &str) -> std::result::Result<Vec<Card>, SourceError> {
        (**self).circle_cards(circle_id)
    }

    fn circle_name(&self, circle_id: &str) -> std::result::Result<String, SourceError> {
        (**self).circle_name(circle_id)
    }
}

impl<T: BattleStore + ?Sized> BattleStore for Arc<T> {
    fn save_battle(&self, state: &BattleState) -> Result<()> {
        (**self).save_battle(state)
    }

    fn get_battle(&self, battle_id: &str) -> Result<Option<BattleState>> {
        (**self).get_battle(battle_id)
    }

    fn save_battle_request(&self, request: &BattleRequest) -> Result<()> {
        (**self).save_battle_request(request)
    }

    fn get_battle_request(&self, request_id: &str) -> Result<Option<BattleRequest>> {
        (**self).get_battle_request(request_id)
    }
}
