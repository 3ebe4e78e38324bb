//! Per-attack damage rolls.

use super::card::Card;
use crate::core::GameRng;

const MIN_VARIANCE: f64 = 0.9;
const MAX_VARIANCE: f64 = 1.1;

/// Roll damage for one attack: `round(attack * v)` with `v` in `[0.9, 1.1)`.
///
/// The caller supplies a fresh RNG per attack, so repeated attacks by the
/// same card land different amounts.
#[must_use]
pub fn calculate_damage(attacker: &Card, rng: &mut GameRng) -> u32 {
    let variance = rng.gen_range_f64(MIN_VARIANCE..MAX_VARIANCE);
    (f64::from(attacker.attack) * variance).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_within_bounds() {
        let mut card = Card::new("card-1", "Aoi", 1);
        card.attack = 200;

        let mut rng = GameRng::new(11);
        for _ in 0..1000 {
            let damage = calculate_damage(&card, &mut rng);
            assert!((180..=220).contains(&damage), "damage {damage} out of range");
        }
    }

    #[test]
    fn test_damage_varies() {
        let mut card = Card::new("card-1", "Aoi", 1);
        card.attack = 150;

        let mut rng = GameRng::new(11);
        let rolls: Vec<_> = (0..20).map(|_| calculate_damage(&card, &mut rng)).collect();
        assert!(rolls.iter().any(|&d| d != rolls[0]));
    }

    #[test]
    fn test_zero_attack_deals_zero() {
        let card = Card::new("card-1", "Aoi", 1);
        assert_eq!(calculate_damage(&card, &mut GameRng::new(1)), 0);
    }
}
