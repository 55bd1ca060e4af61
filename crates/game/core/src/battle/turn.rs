//! Turn scheduling.
//!
//! The whole schedule is precomputed before the first blow: each side gets
//! a share of the [`BattleConfig::MAX_TURNS`] slots proportional to its
//! speed, and the slots are interleaved so a fast side attacks more often
//! rather than first in one long block.

use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::entity::BattleEntity;
use crate::stats::Role;

/// The precomputed schedule: one role tag per slot, always exactly
/// `MAX_TURNS` slots.
pub type TurnOrder = ArrayVec<Role, { BattleConfig::MAX_TURNS }>;

/// Compute the full turn schedule for one battle.
///
/// The faster side is the first attacker; the character wins speed ties.
/// The first attacker's slot count is the ceiling of its proportional
/// share, so the two allocations always sum to exactly `MAX_TURNS`. When
/// both speeds are zero the entire schedule goes to the first attacker.
///
/// Interleaving: at every slot, advance whichever side is further behind
/// its own allocation (smaller `count / allocation` ratio; an exhausted
/// side counts as infinitely far ahead).
///
/// Pure and deterministic for given stats.
pub fn compute_turn_order(character: &BattleEntity, monster: &BattleEntity) -> TurnOrder {
    let character_speed = character.stats.speed;
    let monster_speed = monster.stats.speed;

    let (first, first_speed, second_speed) = if character_speed >= monster_speed {
        (Role::Character, character_speed, monster_speed)
    } else {
        (Role::Monster, monster_speed, character_speed)
    };
    let second = first.opponent();

    let total_speed = first_speed + second_speed;
    let (first_allocation, second_allocation) = if total_speed == 0 {
        (BattleConfig::MAX_TURNS, 0)
    } else {
        let share = f64::from(first_speed) / f64::from(total_speed);
        let first_allocation = (share * BattleConfig::MAX_TURNS as f64).ceil() as usize;
        (first_allocation, BattleConfig::MAX_TURNS - first_allocation)
    };

    let mut order = TurnOrder::new();
    let mut first_count = 0usize;
    let mut second_count = 0usize;

    for _ in 0..BattleConfig::MAX_TURNS {
        let first_is_due = first_count < first_allocation
            && (second_count >= second_allocation
                || pace(first_count, first_allocation) <= pace(second_count, second_allocation));

        if first_is_due {
            order.push(first);
            first_count += 1;
        } else {
            order.push(second);
            second_count += 1;
        }
    }

    order
}

/// How far along a side is relative to its allocation. An exhausted
/// allocation never becomes due again.
fn pace(count: usize, allocation: usize) -> f64 {
    if allocation == 0 {
        f64::INFINITY
    } else {
        count as f64 / allocation as f64
    }
}
