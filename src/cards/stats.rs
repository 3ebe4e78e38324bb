//! Deterministic battle stat generation.
//!
//! Stats are a pure function of `(card_id, grade)`: the id is hashed with
//! 64-bit FNV-1a, the hash seeds a `GameRng`, and two draws from that RNG add
//! variance on top of the grade-based base values.
//!
//! ```
//! use circle_battle::cards::BattleStats;
//!
//! let a = BattleStats::generate("card-42", 3);
//! let b = BattleStats::generate("card-42", 3);
//! assert_eq!(a, b);
//! assert!((650..750).contains(&a.max_hp));
//! assert!((160..210).contains(&a.attack));
//! ```

use crate::core::GameRng;

const BASE_HP: u32 = 500;
const HP_PER_GRADE: u32 = 50;
const HP_VARIANCE: u32 = 100;

const BASE_ATTACK: u32 = 100;
const ATTACK_PER_GRADE: u32 = 20;
const ATTACK_VARIANCE: u32 = 50;

/// Flavor text for generated cards.
pub const DEFAULT_FLAVOR: &str = "Another day of failing to leave the futon.";

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a hash.
#[must_use]
pub fn fnv1a_64(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Combat stats derived from a card's identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleStats {
    pub max_hp: u32,
    pub attack: u32,
    pub flavor: String,
}

impl BattleStats {
    /// Generate stats for a card.
    ///
    /// `max_hp = 500 + grade * 50 + U(0, 100)` and
    /// `attack = 100 + grade * 20 + U(0, 50)`, drawn in that order from one
    /// RNG seeded by the id. Grades too large for the formula saturate at
    /// `u32::MAX` instead of wrapping.
    #[must_use]
    pub fn generate(card_id: &str, grade: u32) -> Self {
        let mut rng = GameRng::new(fnv1a_64(card_id.as_bytes()));

        let max_hp = scaled(BASE_HP, grade, HP_PER_GRADE).saturating_add(rng.gen_range(0..HP_VARIANCE));
        let attack = scaled(BASE_ATTACK, grade, ATTACK_PER_GRADE).saturating_add(rng.gen_range(0..ATTACK_VARIANCE));

        Self {
            max_hp,
            attack,
            flavor: DEFAULT_FLAVOR.to_string(),
        }
    }
}

fn scaled(base: u32, grade: u32, per_grade: u32) -> u32 {
    grade.saturating_mul(per_grade).saturating_add(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fnv1a_known_vectors() {
        assert_eq!(fnv1a_64(b""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fnv1a_64(b"a"), 0xaf63_dc4c_8601_ec8c);
        assert_eq!(fnv1a_64(b"foobar"), 0x8594_4171_f739_67e8);
    }

    #[test]
    fn test_generate_is_deterministic() {
        for id in ["a", "card-1", "circle-x-card-3", ""] {
            assert_eq!(BattleStats::generate(id, 2), BattleStats::generate(id, 2));
        }
    }

    #[test]
    fn test_generate_ranges_per_grade() {
        for grade in 1..=4 {
            for i in 0..50 {
                let stats = BattleStats::generate(&format!("card-{i}"), grade);
                let hp_base = 500 + grade * 50;
                let atk_base = 100 + grade * 20;
                assert!((hp_base..hp_base + 100).contains(&stats.max_hp));
                assert!((atk_base..atk_base + 50).contains(&stats.attack));
            }
        }
    }

    #[test]
    fn test_variance_differs_across_cards() {
        let hps: Vec<_> = (0..20)
            .map(|i| BattleStats::generate(&format!("card-{i}"), 1).max_hp)
            .collect();
        assert!(hps.iter().any(|&hp| hp != hps[0]));
    }

    #[test]
    fn test_grade_shifts_base_not_variance() {
        let g1 = BattleStats::generate("same-id", 1);
        let g3 = BattleStats::generate("same-id", 3);
        assert_eq!(g3.max_hp - g1.max_hp, 100);
        assert_eq!(g3.attack - g1.attack, 40);
    }

    #[test]
    fn test_huge_grade_saturates() {
        let stats = BattleStats::generate("x", u32::MAX);
        assert_eq!(stats, BattleStats::generate("x", u32::MAX));
        assert_eq!(stats.max_hp, u32::MAX);
        assert_eq!(stats.attack, u32::MAX);

        // Just below the overflow point the formula is still exact.
        let grade = (u32::MAX - BASE_HP - HP_VARIANCE) / HP_PER_GRADE;
        let stats = BattleStats::generate("x", grade);
        assert!(stats.max_hp >= BASE_HP + grade * HP_PER_GRADE);
        assert!(stats.max_hp < u32::MAX);
    }
}
