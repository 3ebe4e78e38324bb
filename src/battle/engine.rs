//! Battle session engine: creation, attacks and retreats.
//!
//! Every move is one read-modify-write against the `BattleStore`: load the
//! battle, check the move is legal, mutate the in-memory copy, write it back
//! with the next version. A rejected move never writes.

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::state::{BattleState, Player};
use crate::cards::{build_deck, calculate_damage, mock_pool, Card};
use crate::core::{BattleError, EngineConfig, EntropyRng, Result, RngProvider};
use crate::store::{BattleStore, CardSource};

/// Runs battles for circles.
///
/// The store, card source and RNG provider are injected; the engine itself
/// holds no battle state between calls.
pub struct BattleEngine<S, C, R = EntropyRng> {
    pub(crate) store: S,
    cards: C,
    rng: R,
    config: EngineConfig,
}

impl<S: BattleStore, C: CardSource> BattleEngine<S, C, EntropyRng> {
    /// Create an engine with entropy-seeded shuffles and damage rolls.
    pub fn new(store: S, cards: C, config: EngineConfig) -> Self {
        Self::with_rng(store, cards, EntropyRng, config)
    }
}

impl<S: BattleStore, C: CardSource, R: RngProvider> BattleEngine<S, C, R> {
    /// Create an engine with a custom RNG provider.
    pub fn with_rng(store: S, cards: C, rng: R, config: EngineConfig) -> Self {
        Self {
            store,
            cards,
            rng,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Start an ad-hoc battle outside the request workflow.
    pub fn start_battle(&self, my_circle_id: &str, opponent_circle_id: &str) -> Result<BattleState> {
        self.create_battle(my_circle_id, opponent_circle_id)
    }

    /// Build both decks and store a new battle. `my_circle_id` moves first.
    ///
    /// Nothing is returned unless the battle was stored.
    pub fn create_battle(&self, my_circle_id: &str, opponent_circle_id: &str) -> Result<BattleState> {
        self.create_battle_as(format!("battle-{}", Uuid::new_v4()), my_circle_id, opponent_circle_id)
    }

    /// Create a battle under a caller-chosen id.
    ///
    /// The first write of a battle is version 1, so a second creation under
    /// the same id fails with a store conflict and nothing is overwritten.
    pub(crate) fn create_battle_as(
        &self,
        battle_id: String,
        my_circle_id: &str,
        opponent_circle_id: &str,
    ) -> Result<BattleState> {
        let my_cards = self.circle_pool(my_circle_id)?;
        let opponent_cards = self.circle_pool(opponent_circle_id)?;

        let my_name = self.circle_name(my_circle_id);
        let opponent_name = self.circle_name(opponent_circle_id);

        let mut rng = self.rng.rng();
        let my_deck = build_deck(&my_cards, &mut rng);
        let opponent_deck = build_deck(&opponent_cards, &mut rng);

        let lives = self.config.starting_lives;
        let mut state = BattleState::new(
            battle_id,
            Player::new(my_circle_id, my_name, lives, my_deck),
            Player::new(opponent_circle_id, opponent_name, lives, opponent_deck),
        );
        self.persist_battle(&mut state)?;

        info!(
            battle_id = %state.battle_id,
            me = %my_circle_id,
            opponent = %opponent_circle_id,
            "battle created"
        );
        Ok(state)
    }

    /// Attack the opponent's active card with the caller's active card.
    ///
    /// A knocked-out card costs its owner one life and leaves the deck. When
    /// the defender runs out of lives the attacker wins; otherwise the turn
    /// passes to the defender.
    pub fn attack(&self, battle_id: &str, player_id: &str) -> Result<BattleState> {
        let mut state = self.load_battle(battle_id)?;
        if state.is_over() {
            return Ok(state);
        }
        ensure_turn(&state, player_id)?;

        let (attacker, defender) = state
            .sides_mut(player_id)
            .ok_or_else(|| BattleError::UnknownPlayer(player_id.to_string()))?;
        let (Some(attacking_card), Some(defending_card)) = (attacker.active(), defender.active_mut()) else {
            return Ok(state);
        };

        let damage = calculate_damage(attacking_card, &mut self.rng.rng());
        let remaining = defending_card.take_damage(damage);

        let attacker_id = attacker.player_id.clone();
        let attacker_name = attacker.circle_name.clone();
        let defender_id = defender.player_id.clone();
        let defender_name = defender.circle_name.clone();

        let knocked_out = remaining == 0;
        if knocked_out {
            defender.hp = defender.hp.saturating_sub(1);
            if defender.deck.len() > 1 {
                defender.deck.remove(0);
            } else {
                defender.hp = 0;
            }
        }
        let defeated = defender.is_defeated();

        debug!(battle_id, attacker = %attacker_id, damage, remaining, "attack resolved");

        state.log(format!("{attacker_name} attacked! Deal {damage} damage to {defender_name}."));
        if knocked_out {
            state.log(format!("{defender_name}'s card KO!"));
        }

        if defeated {
            state.winner_id = Some(attacker_id.clone());
            state.log(format!("{attacker_name} Wins!"));
            self.persist_battle(&mut state)?;
            info!(battle_id, winner = %attacker_id, "battle finished");
            return Ok(state);
        }

        state.pass_turn_to(&defender_id, &defender_name);
        self.persist_battle(&mut state)?;
        Ok(state)
    }

    /// Swap the caller's active card with a bench card and pass the turn.
    ///
    /// `bench_index` is zero-based over the bench, so deck position
    /// `bench_index + 1` becomes active.
    pub fn retreat(&self, battle_id: &str, player_id: &str, bench_index: i64) -> Result<BattleState> {
        let mut state = self.load_battle(battle_id)?;
        if state.is_over() {
            return Ok(state);
        }
        ensure_turn(&state, player_id)?;

        let (player, opponent) = state
            .sides_mut(player_id)
            .ok_or_else(|| BattleError::UnknownPlayer(player_id.to_string()))?;

        let deck_len = player.deck.len();
        let index = usize::try_from(bench_index)
            .ok()
            .and_then(|i| i.checked_add(1))
            .filter(|&i| i < deck_len)
            .ok_or(BattleError::InvalidBenchIndex {
                index: bench_index,
                bench_size: deck_len.saturating_sub(1),
            })?;
        player.deck.swap(0, index);

        let player_name = player.circle_name.clone();
        let opponent_id = opponent.player_id.clone();
        let opponent_name = opponent.circle_name.clone();

        debug!(battle_id, player = %player_id, bench_index, "retreat");

        state.log(format!("{player_name} Retreated!"));
        state.pass_turn_to(&opponent_id, &opponent_name);
        self.persist_battle(&mut state)?;
        Ok(state)
    }

    fn load_battle(&self, battle_id: &str) -> Result<BattleState> {
        self.find_battle(battle_id)?
            .ok_or_else(|| BattleError::BattleNotFound(battle_id.to_string()))
    }

    pub(crate) fn find_battle(&self, battle_id: &str) -> Result<Option<BattleState>> {
        self.store
            .get_battle(battle_id)
            .map_err(BattleError::store("load battle"))
    }

    fn persist_battle(&self, state: &mut BattleState) -> Result<()> {
        state.version += 1;
        self.store
            .save_battle(state)
            .map_err(BattleError::store("save battle"))
    }

    /// A circle's card pool, or a mock pool when the fallback is enabled.
    fn circle_pool(&self, circle_id: &str) -> Result<Vec<Card>> {
        match self.cards.circle_cards(circle_id) {
            Ok(cards) => Ok(cards),
            Err(source) => {
                error!(circle_id = %circle_id, error = %source, "failed to get circle cards");
                if !self.config.enable_mock_fallback {
                    return Err(BattleError::CardSource {
                        circle_id: circle_id.to_string(),
                        source,
                    });
                }
                warn!(circle_id = %circle_id, "falling back to mock cards");
                Ok(mock_pool(circle_id, self.config.mock_pool_size))
            }
        }
    }

    /// A circle's display name, or `"Circle {id}"` if the lookup fails.
    pub(crate) fn circle_name(&self, circle_id: &str) -> String {
        self.cards.circle_name(circle_id).unwrap_or_else(|err| {
            warn!(circle_id = %circle_id, error = %err, "failed to get circle name");
            format!("Circle {circle_id}")
        })
    }
}

fn ensure_turn(state: &BattleState, player_id: &str) -> Result<()> {
    if state.current_player_id == player_id {
        Ok(())
    } else {
        Err(BattleError::NotYourTurn {
            current: state.current_player_id.clone(),
            caller: player_id.to_string(),
        })
    }
}
