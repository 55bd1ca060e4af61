//! Combat stat block and the two battle roles.
//!
//! `StatBlock` is the Single Source of Truth for a combatant's numbers.
//! Characters and monsters share the same five-stat shape; everything the
//! battle math needs is derived from it at call time.

use crate::config::BattleConfig;

/// The five combat stats shared by characters and monsters.
///
/// All values are non-negative by construction. `critical` is a percent
/// chance and must stay within `[0, 100]`; projections validate this
/// before a block ever reaches the simulator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock {
    pub health: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub critical: u32,
}

impl StatBlock {
    pub fn new(health: u32, attack: u32, defense: u32, speed: u32, critical: u32) -> Self {
        Self {
            health,
            attack,
            defense,
            speed,
            critical,
        }
    }

    /// Read a single stat by kind.
    pub fn get(&self, kind: StatKind) -> u32 {
        match kind {
            StatKind::Health => self.health,
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::Speed => self.speed,
            StatKind::Critical => self.critical,
        }
    }

    /// Write a single stat by kind.
    pub fn set(&mut self, kind: StatKind, value: u32) {
        match kind {
            StatKind::Health => self.health = value,
            StatKind::Attack => self.attack = value,
            StatKind::Defense => self.defense = value,
            StatKind::Speed => self.speed = value,
            StatKind::Critical => self.critical = value,
        }
    }

    /// Component-wise sum, saturating on overflow.
    pub fn saturating_add(&self, other: &StatBlock) -> StatBlock {
        StatBlock {
            health: self.health.saturating_add(other.health),
            attack: self.attack.saturating_add(other.attack),
            defense: self.defense.saturating_add(other.defense),
            speed: self.speed.saturating_add(other.speed),
            critical: self.critical.saturating_add(other.critical),
        }
    }

    /// Component-wise `base + growth * levels`, saturating on overflow.
    pub fn grown_by(&self, growth: &StatBlock, levels: u32) -> StatBlock {
        StatBlock {
            health: self.health.saturating_add(growth.health.saturating_mul(levels)),
            attack: self.attack.saturating_add(growth.attack.saturating_mul(levels)),
            defense: self.defense.saturating_add(growth.defense.saturating_mul(levels)),
            speed: self.speed.saturating_add(growth.speed.saturating_mul(levels)),
            critical: self.critical.saturating_add(growth.critical.saturating_mul(levels)),
        }
    }

    /// Whether every stat is inside the engine's representable range.
    ///
    /// Unsigned fields rule out negatives; the only invariant left to check
    /// is the critical chance ceiling.
    pub fn is_valid(&self) -> bool {
        self.critical <= 100
    }
}

/// Identifies one of the five stats, for allocation and display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatKind {
    Health,
    Attack,
    Defense,
    Speed,
    Critical,
}

impl StatKind {
    /// Allocation cost granularity: health moves in 10-point steps per
    /// status point, everything else 1:1.
    pub const fn step(&self) -> u32 {
        match self {
            StatKind::Health => BattleConfig::HEALTH_PER_STATUS_POINT,
            _ => 1,
        }
    }

    /// Hard ceiling for this stat when allocating points.
    pub const fn ceiling(&self) -> u32 {
        match self {
            StatKind::Health => BattleConfig::MAX_HEALTH,
            _ => BattleConfig::MAX_STAT,
        }
    }
}

/// Which side of the battle an entity fights on.
///
/// Exactly two entities exist per battle, one per role. Ties and default
/// policies favor the character side unless documented otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    Character,
    Monster,
}

impl Role {
    /// The opposing side.
    pub const fn opponent(&self) -> Role {
        match self {
            Role::Character => Role::Monster,
            Role::Monster => Role::Character,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_access_by_kind_round_trips() {
        let mut stats = StatBlock::new(100, 12, 17, 6, 5);
        assert_eq!(stats.get(StatKind::Defense), 17);
        stats.set(StatKind::Speed, 9);
        assert_eq!(stats.speed, 9);
    }

    #[test]
    fn growth_is_component_wise() {
        let base = StatBlock::new(100, 11, 13, 8, 8);
        let growth = StatBlock::new(10, 2, 1, 1, 0);
        let grown = base.grown_by(&growth, 3);
        assert_eq!(grown, StatBlock::new(130, 17, 16, 11, 8));
    }

    #[test]
    fn critical_above_hundred_is_invalid() {
        assert!(StatBlock::new(1, 1, 1, 1, 100).is_valid());
        assert!(!StatBlock::new(1, 1, 1, 1, 101).is_valid());
    }
}
