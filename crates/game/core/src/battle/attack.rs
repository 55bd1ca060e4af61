//! Single-attack resolution.
//!
//! One attack is two independent draws: a Bernoulli critical check against
//! the attacker's critical stat and a uniform damage roll around the attack
//! stat. Defense shaves off a flat half of the defender's defense after the
//! critical bonus is applied.

use crate::config::BattleConfig;
use crate::entity::BattleEntity;
use crate::rng::{RngOracle, compute_seed};

/// Roll context tags for [`compute_seed`].
const CONTEXT_CRITICAL: u32 = 0;
const CONTEXT_VARIANCE: u32 = 1;

/// Result of one resolved attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackRoll {
    /// Final damage after variance, critical bonus, and defense.
    pub damage: u32,
    /// Whether the critical bonus applied.
    pub critical: bool,
}

/// Resolve one attack from `attacker` against `defender`.
///
/// # Formula
///
/// ```text
/// base     = uniform(attack * 0.7, attack * 1.3), floored at 0
/// critical = bernoulli(attacker.critical / 100)
/// total    = base + (critical ? 0.5 * base : 0) - defense / 2
/// damage   = round(total) clamped to >= 0
/// ```
///
/// The critical bonus applies to the already-rolled base damage; it does
/// not re-roll. Intentionally randomized per call: the same inputs yield a
/// distribution, reproducible only through the seed.
pub fn resolve_attack(
    attacker: &BattleEntity,
    defender: &BattleEntity,
    rng: &impl RngOracle,
    battle_seed: u64,
    turn: u64,
) -> AttackRoll {
    let critical_seed = compute_seed(battle_seed, turn, attacker.role, CONTEXT_CRITICAL);
    let variance_seed = compute_seed(battle_seed, turn, attacker.role, CONTEXT_VARIANCE);

    let critical = rng.percent(critical_seed, attacker.stats.critical);

    let attack = f64::from(attacker.stats.attack);
    let spread = attack * BattleConfig::DAMAGE_VARIANCE;
    let base = rng
        .range_f64(variance_seed, attack - spread, attack + spread)
        .max(0.0);

    let bonus = if critical {
        BattleConfig::CRIT_BONUS * base
    } else {
        0.0
    };
    let reduction = f64::from(defender.stats.defense) / f64::from(BattleConfig::DEFENSE_DIVISOR);

    let total = base + bonus - reduction;
    AttackRoll {
        damage: total.round().max(0.0) as u32,
        critical,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::PcgRng;
    use crate::stats::StatBlock;

    fn attacker(attack: u32, critical: u32) -> BattleEntity {
        BattleEntity::character("Aria", StatBlock::new(100, attack, 0, 10, critical)).unwrap()
    }

    fn defender(defense: u32) -> BattleEntity {
        BattleEntity::monster("Slime", StatBlock::new(50, 5, defense, 5, 0)).unwrap()
    }

    #[test]
    fn mean_damage_tracks_the_attack_stat() {
        // attack=100, no crits, no defense: uniform over [70, 130],
        // so 10k trials should average very close to 100.
        let rng = PcgRng;
        let a = attacker(100, 0);
        let d = defender(0);

        let total: u64 = (0..10_000u64)
            .map(|seed| u64::from(resolve_attack(&a, &d, &rng, seed, 1).damage))
            .sum();
        let mean = total as f64 / 10_000.0;
        assert!((97.0..=103.0).contains(&mean), "mean = {mean}");

        // And every roll stays inside the variance envelope.
        for seed in 0..1_000u64 {
            let roll = resolve_attack(&a, &d, &rng, seed, 1);
            assert!((70..=130).contains(&roll.damage), "damage = {}", roll.damage);
            assert!(!roll.critical);
        }
    }

    #[test]
    fn guaranteed_critical_adds_half_again() {
        let rng = PcgRng;
        let a = attacker(100, 100);
        let d = defender(0);
        for seed in 0..1_000u64 {
            let roll = resolve_attack(&a, &d, &rng, seed, 1);
            assert!(roll.critical);
            // [70, 130] * 1.5, allow a point of rounding slack
            assert!((104..=196).contains(&roll.damage), "damage = {}", roll.damage);
        }
    }

    #[test]
    fn heavy_defense_clamps_damage_to_zero() {
        let rng = PcgRng;
        let a = attacker(1, 0);
        let d = defender(500);
        for seed in 0..200u64 {
            assert_eq!(resolve_attack(&a, &d, &rng, seed, 1).damage, 0);
        }
    }

    #[test]
    fn same_seed_reproduces_the_roll() {
        let rng = PcgRng;
        let a = attacker(40, 35);
        let d = defender(6);
        assert_eq!(
            resolve_attack(&a, &d, &rng, 1234, 7),
            resolve_attack(&a, &d, &rng, 1234, 7)
        );
    }
}
