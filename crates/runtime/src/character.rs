//! The owned character record.
//!
//! This is the one mutable piece of state in the system. The engine never
//! touches it: battles and progression hand back results, and the record
//! applies them here in one place.

use game_core::{BattleEntity, ProgressionResult, ProjectionError, StatBlock};
use game_content::Job;

/// A player character as the runtime owns it.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Character {
    pub name: String,
    pub job_id: u32,
    pub level: u8,
    pub experience: u64,
    pub gold: u64,
    pub status_points: u32,
    pub stats: StatBlock,
    pub growth_per_level: StatBlock,
}

impl Character {
    /// A fresh level-1 character of the given job.
    pub fn from_job(name: impl Into<String>, job: &Job) -> Self {
        Self {
            name: name.into(),
            job_id: job.id,
            level: 1,
            experience: 0,
            gold: 0,
            status_points: 0,
            stats: job.base_status,
            growth_per_level: job.growth_per_level,
        }
    }

    /// Project into the battle entity the simulator consumes.
    pub fn entity(&self) -> Result<BattleEntity, ProjectionError> {
        BattleEntity::character(self.name.clone(), self.stats)
    }

    pub fn add_gold(&mut self, amount: u64) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Adopt a progression result for an experience gain.
    ///
    /// Experience always advances; level, status points, and stats only
    /// move when at least one threshold was crossed. The stat growth is
    /// added once for the whole event, matching the progression engine's
    /// contract.
    pub fn apply_progression(&mut self, gained: u64, result: &ProgressionResult) {
        self.experience = self.experience.saturating_add(gained);
        if result.levels_gained > 0 {
            self.level = result.new_level;
            self.status_points = self.status_points.saturating_add(result.bonus_status_points);
            self.stats = self.stats.saturating_add(&result.stat_growth);
        }
    }
}
