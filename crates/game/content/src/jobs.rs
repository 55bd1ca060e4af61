//! Job (class) definitions.
//!
//! Each job carries the base stat block a fresh character starts with and
//! the per-level growth deltas the progression engine hands back on
//! level-up.

use game_core::StatBlock;

/// A playable class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Job {
    pub id: u32,
    pub name: &'static str,
    pub base_status: StatBlock,
    pub growth_per_level: StatBlock,
}

const fn stats(health: u32, attack: u32, defense: u32, speed: u32, critical: u32) -> StatBlock {
    StatBlock {
        health,
        attack,
        defense,
        speed,
        critical,
    }
}

/// The four playable jobs. Base stats trade bulk for speed and crit.
pub const JOB_LIST: [Job; 4] = [
    Job {
        id: 1,
        name: "Barbarian",
        base_status: stats(100, 12, 17, 6, 5),
        growth_per_level: stats(15, 2, 2, 1, 0),
    },
    Job {
        id: 2,
        name: "Swordsman",
        base_status: stats(100, 11, 13, 8, 8),
        growth_per_level: stats(12, 2, 2, 1, 1),
    },
    Job {
        id: 3,
        name: "Archer",
        base_status: stats(100, 11, 9, 12, 8),
        growth_per_level: stats(10, 2, 1, 2, 1),
    },
    Job {
        id: 4,
        name: "Ninja",
        base_status: stats(100, 8, 4, 17, 11),
        growth_per_level: stats(8, 2, 1, 3, 2),
    },
];

/// Look a job up by id.
pub fn job(id: u32) -> Option<&'static Job> {
    JOB_LIST.iter().find(|job| job.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_job_has_valid_stats() {
        for job in &JOB_LIST {
            assert!(job.base_status.is_valid(), "{}", job.name);
            assert!(job.growth_per_level.is_valid(), "{}", job.name);
        }
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(job(4).unwrap().name, "Ninja");
        assert!(job(99).is_none());
    }
}
