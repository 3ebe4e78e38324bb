//! Cards - a circle member's profile plus its battle stats.
//!
//! Profile fields come from the card source. `max_hp`, `attack` and `flavor`
//! are derived from the card's id and grade by the stat generator, and
//! `current_hp` is the only value that changes during a battle.

use serde::{Deserialize, Serialize};

use super::stats::BattleStats;

/// Id prefix shared by all placeholder cards.
pub const PLACEHOLDER_ID_PREFIX: &str = "dummy-";

/// A card in a circle's pool or a battle deck.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Stable identifier.
    pub id: String,
    pub name: String,
    /// Tier, 1-4 for regular members.
    pub grade: u32,
    pub position: String,
    pub hobby: String,
    pub description: String,
    pub image_url: String,
    pub creator_id: String,
    pub circle_id: Option<String>,
    pub affiliated_group: Option<String>,

    // === Battle stats ===
    pub max_hp: u32,
    pub attack: u32,
    pub flavor: String,
    /// Remaining HP in the current battle, never above `max_hp`.
    pub current_hp: u32,
}

impl Card {
    /// Create a card with only identity fields set.
    pub fn new(id: impl Into<String>, name: impl Into<String>, grade: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            grade,
            ..Self::default()
        }
    }

    /// Set the owning circle.
    #[must_use]
    pub fn in_circle(mut self, circle_id: impl Into<String>) -> Self {
        self.circle_id = Some(circle_id.into());
        self
    }

    /// Apply stats and reset `current_hp` to full.
    #[must_use]
    pub fn with_stats(mut self, stats: BattleStats) -> Self {
        self.max_hp = stats.max_hp;
        self.attack = stats.attack;
        self.flavor = stats.flavor;
        self.current_hp = stats.max_hp;
        self
    }

    /// Apply stats generated from this card's id and grade.
    #[must_use]
    pub fn with_generated_stats(self) -> Self {
        let stats = BattleStats::generate(&self.id, self.grade);
        self.with_stats(stats)
    }

    /// Subtract damage from `current_hp`, flooring at zero.
    ///
    /// Returns the remaining HP.
    pub fn take_damage(&mut self, damage: u32) -> u32 {
        self.current_hp = self.current_hp.saturating_sub(damage);
        self.current_hp
    }

    #[must_use]
    pub fn is_knocked_out(&self) -> bool {
        self.current_hp == 0
    }

    /// True for synthetic cards that pad an undersized deck.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.id.starts_with(PLACEHOLDER_ID_PREFIX)
    }
}
