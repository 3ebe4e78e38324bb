//! Battle state: players, decks, turn and log.
//!
//! ## Lifecycle
//!
//! A `BattleState` is created once per battle, then mutated by attacks and
//! retreats until `winner_id` is set. Once set, the winner never changes and
//! further moves leave the state untouched.
//!
//! The log is newest-first. It uses an `im::Vector` so prepending is cheap.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, Deck};

/// One side of a battle.
///
/// `player_id` is the circle id: a circle is its own participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub player_id: String,
    pub circle_id: String,
    pub circle_name: String,
    /// Lives left. The player loses at zero.
    pub hp: u32,
    /// Index 0 is the active card, the rest is the bench.
    pub deck: Deck,
}

impl Player {
    /// Create a player for a circle.
    pub fn new(circle_id: impl Into<String>, circle_name: impl Into<String>, hp: u32, deck: Deck) -> Self {
        let circle_id = circle_id.into();
        Self {
            player_id: circle_id.clone(),
            circle_id,
            circle_name: circle_name.into(),
            hp,
            deck,
        }
    }

    /// The card currently exposed to attacks.
    #[must_use]
    pub fn active(&self) -> Option<&Card> {
        self.deck.first()
    }

    pub fn active_mut(&mut self) -> Option<&mut Card> {
        self.deck.first_mut()
    }

    /// Cards behind the active one.
    #[must_use]
    pub fn bench(&self) -> &[Card] {
        self.deck.get(1..).unwrap_or(&[])
    }

    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }
}

/// Full state of one battle, stored as a single document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleState {
    pub battle_id: String,
    pub player_me: Player,
    pub player_opponent: Player,
    /// Turn counter, starts at 1 and only grows.
    pub current_turn: u32,
    /// Player allowed to move next.
    pub current_player_id: String,
    /// Set once, when the battle ends.
    pub winner_id: Option<String>,
    /// Human-readable events, newest first.
    pub logs: Vector<String>,
    /// Write counter for optimistic concurrency. 0 means never stored.
    pub version: u64,
}

impl BattleState {
    /// Create a fresh battle where `me` moves first.
    pub fn new(battle_id: impl Into<String>, me: Player, opponent: Player) -> Self {
        let current_player_id = me.player_id.clone();
        let mut logs = Vector::new();
        logs.push_front("Battle Start!".to_string());

        Self {
            battle_id: battle_id.into(),
            player_me: me,
            player_opponent: opponent,
            current_turn: 1,
            current_player_id,
            winner_id: None,
            logs,
            version: 0,
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner_id.is_some()
    }

    /// Prepend a log entry.
    pub fn log(&mut self, entry: impl Into<String>) {
        self.logs.push_front(entry.into());
    }

    /// The most recent log entry.
    #[must_use]
    pub fn latest_log(&self) -> Option<&str> {
        self.logs.front().map(String::as_str)
    }

    /// Split into `(player, opponent)` from `player_id`'s point of view.
    ///
    /// Returns `None` if `player_id` is not in this battle.
    pub fn sides_mut(&mut self, player_id: &str) -> Option<(&mut Player, &mut Player)> {
        if player_id == self.player_me.player_id {
            Some((&mut self.player_me, &mut self.player_opponent))
        } else if player_id == self.player_opponent.player_id {
            Some((&mut self.player_opponent, &mut self.player_me))
        } else {
            None
        }
    }

    /// Hand the turn to `player_id` and log it.
    pub fn pass_turn_to(&mut self, player_id: &str, circle_name: &str) {
        self.current_player_id = player_id.to_string();
        self.current_turn += 1;
        self.log(format!("Turn Change: {circle_name}'s Turn"));
    }

    /// Find a player by id.
    #[must_use]
    pub fn player(&self, player_id: &str) -> Option<&Player> {
        [&self.player_me, &self.player_opponent]
            .into_iter()
            .find(|p| p.player_id == player_id)
    }
}
