//! Battle entity projection.
//!
//! Characters and monsters live in very different shapes outside combat
//! (owned records, catalog variants, server payloads). The simulator only
//! ever sees a [`BattleEntity`]: a normalized, validated projection built
//! at the moment a battle starts and discarded with the outcome.

use crate::stats::{Role, StatBlock};

/// Rejection reasons at the projection boundary.
///
/// Malformed stats are stopped here so the simulator itself never has an
/// error path.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProjectionError {
    #[error("critical chance {critical} exceeds 100 for {name}")]
    CriticalOutOfRange { name: String, critical: u32 },
    #[error("combatant name is empty")]
    EmptyName,
}

/// A normalized combat participant.
///
/// Immutable for the duration of one simulation; the simulator keeps its
/// own mutable health counters and never writes back into the entity.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleEntity {
    pub name: String,
    pub role: Role,
    pub stats: StatBlock,
}

impl BattleEntity {
    /// Project a character-side combatant.
    pub fn character(name: impl Into<String>, stats: StatBlock) -> Result<Self, ProjectionError> {
        Self::project(name.into(), Role::Character, stats)
    }

    /// Project a monster-side combatant.
    pub fn monster(name: impl Into<String>, stats: StatBlock) -> Result<Self, ProjectionError> {
        Self::project(name.into(), Role::Monster, stats)
    }

    fn project(name: String, role: Role, stats: StatBlock) -> Result<Self, ProjectionError> {
        if name.is_empty() {
            return Err(ProjectionError::EmptyName);
        }
        if !stats.is_valid() {
            return Err(ProjectionError::CriticalOutOfRange {
                name,
                critical: stats.critical,
            });
        }
        Ok(Self { name, role, stats })
    }
}
