//! Deck construction from a circle's card pool.

use smallvec::SmallVec;
use uuid::Uuid;

use super::card::{Card, PLACEHOLDER_ID_PREFIX};
use super::stats::BattleStats;
use crate::core::GameRng;

/// Cards fielded per battle.
pub const DECK_SIZE: usize = 5;

/// A battle deck. Index 0 is the active card, the rest is the bench.
pub type Deck = SmallVec<[Card; DECK_SIZE]>;

const PLACEHOLDER_NAME: &str = "recruiting…";
const PLACEHOLDER_MAX_HP: u32 = 600;
const PLACEHOLDER_ATTACK: u32 = 150;
const PLACEHOLDER_FLAVOR: &str = "A promising new recruit.";

/// Build a deck of exactly `DECK_SIZE` cards.
///
/// Shuffles a copy of `pool`, keeps the first `DECK_SIZE` cards and pads with
/// placeholders when the pool is smaller. The pool itself is left untouched.
#[must_use]
pub fn build_deck(pool: &[Card], rng: &mut GameRng) -> Deck {
    let mut shuffled = pool.to_vec();
    rng.shuffle(&mut shuffled);
    shuffled.truncate(DECK_SIZE);

    let mut deck: Deck = shuffled.into_iter().collect();
    while deck.len() < DECK_SIZE {
        deck.push(placeholder_card());
    }
    deck
}

/// A synthetic card with fixed stats and a fresh unique id.
#[must_use]
pub fn placeholder_card() -> Card {
    let stats = BattleStats {
        max_hp: PLACEHOLDER_MAX_HP,
        attack: PLACEHOLDER_ATTACK,
        flavor: PLACEHOLDER_FLAVOR.to_string(),
    };
    Card::new(format!("{PLACEHOLDER_ID_PREFIX}{}", Uuid::new_v4()), PLACEHOLDER_NAME, 1).with_stats(stats)
}

/// Generate a stand-in pool for a circle whose cards could not be fetched.
///
/// Cards are `"{circle_id}-card-{i}"`, grade 1, with generated stats, so the
/// same circle always gets the same mock pool.
#[must_use]
pub fn mock_pool(circle_id: &str, count: usize) -> Vec<Card> {
    (0..count)
        .map(|i| {
            Card::new(format!("{circle_id}-card-{i}"), format!("Card {i}"), 1)
                .in_circle(circle_id)
                .with_generated_stats()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(n: usize) -> Vec<Card> {
        (0..n)
            .map(|i| Card::new(format!("card-{i}"), format!("Member {i}"), 2).with_generated_stats())
            .collect()
    }

    #[test]
    fn test_large_pool_has_no_placeholders() {
        let source = pool(12);
        let deck = build_deck(&source, &mut GameRng::new(1));

        assert_eq!(deck.len(), DECK_SIZE);
        assert!(deck.iter().all(|c| !c.is_placeholder()));
        assert!(deck.iter().all(|c| source.contains(c)));
    }

    #[test]
    fn test_small_pool_is_padded() {
        let source = pool(2);
        let deck = build_deck(&source, &mut GameRng::new(1));

        assert_eq!(deck.len(), DECK_SIZE);
        assert_eq!(deck.iter().filter(|c| c.is_placeholder()).count(), 3);
        assert!(deck[..2].iter().all(|c| source.contains(c)));
    }

    #[test]
    fn test_empty_pool_is_all_placeholders() {
        let deck = build_deck(&[], &mut GameRng::new(1));

        assert_eq!(deck.len(), DECK_SIZE);
        for card in &deck {
            assert!(card.is_placeholder());
            assert_eq!(card.name, PLACEHOLDER_NAME);
            assert_eq!(card.grade, 1);
            assert_eq!(card.max_hp, 600);
            assert_eq!(card.current_hp, 600);
            assert_eq!(card.attack, 150);
        }
    }

    #[test]
    fn test_placeholder_ids_are_unique() {
        let deck = build_deck(&[], &mut GameRng::new(1));
        let mut ids: Vec<_> = deck.iter().map(|c| c.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), DECK_SIZE);
    }

    #[test]
    fn test_pool_not_mutated() {
        let source = pool(8);
        let before = source.clone();
        let _ = build_deck(&source, &mut GameRng::new(3));
        assert_eq!(source, before);
    }

    #[test]
    fn test_shuffle_depends_on_rng() {
        let source = pool(20);
        let a: Vec<_> = build_deck(&source, &mut GameRng::new(1)).into_iter().map(|c| c.id).collect();
        let b: Vec<_> = build_deck(&source, &mut GameRng::new(2)).into_iter().map(|c| c.id).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_mock_pool_is_stable() {
        let a = mock_pool("circle-a", 5);
        let b = mock_pool("circle-a", 5);

        assert_eq!(a.len(), 5);
        assert_eq!(a, b);
        assert_eq!(a[3].id, "circle-a-card-3");
        assert_eq!(a[3].name, "Card 3");
        assert!(a.iter().all(|c| c.grade == 1 && c.current_hp == c.max_hp));
    }
}
