//! Experience thresholds and level-up resolution.
//!
//! The experience table maps each level to the cumulative experience
//! required to hold it. Progression is a pure computation: callers hand in
//! the character's current level/experience and receive a
//! [`ProgressionResult`] describing the levels gained, the status-point
//! bonus, and the stat growth to apply.

use crate::config::BattleConfig;
use crate::stats::StatBlock;

/// One row of the experience table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExperienceRow {
    /// 1..=99.
    pub level: u8,
    /// Cumulative experience required to hold this level.
    pub experience: u64,
}

/// Borrowed view over the 99-row threshold table.
///
/// Rows are strictly increasing in both fields, sorted by level, with no
/// row beyond the level cap. The canonical data lives in `game-content`.
#[derive(Clone, Copy, Debug)]
pub struct ExperienceTable<'a> {
    rows: &'a [ExperienceRow],
}

impl<'a> ExperienceTable<'a> {
    pub fn new(rows: &'a [ExperienceRow]) -> Self {
        Self { rows }
    }

    /// Row for an exact level, if the table has one.
    pub fn row(&self, level: u8) -> Option<ExperienceRow> {
        self.rows.iter().copied().find(|row| row.level == level)
    }

    /// The highest level whose threshold is at or below `experience`.
    ///
    /// Scans from the top of the table down, mirroring how the thresholds
    /// are authored (sparse at the bottom, dense at the top).
    pub fn level_for(&self, experience: u64) -> Option<u8> {
        self.rows
            .iter()
            .rev()
            .find(|row| row.experience <= experience)
            .map(|row| row.level)
    }
}

/// Outcome of feeding one experience reward through the table.
///
/// Consumed by the owning character record: experience always advances by
/// the gained amount; level, status points, and stats advance only when
/// `levels_gained > 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressionResult {
    pub new_level: u8,
    pub levels_gained: u8,
    /// Flat bonus granted once per experience-gain event.
    pub bonus_status_points: u32,
    /// Per-level growth deltas, applied once per experience-gain event.
    pub stat_growth: StatBlock,
}

impl ProgressionResult {
    /// A result that changes nothing but the experience total.
    fn unchanged(level: u8) -> Self {
        Self {
            new_level: level,
            levels_gained: 0,
            bonus_status_points: 0,
            stat_growth: StatBlock::default(),
        }
    }
}

/// Resolve an experience gain against the table.
///
/// Finds the highest table row covered by `experience + gained`; if that
/// row's level exceeds the current one, the character levels up by the
/// difference. The status-point bonus and the per-level stat growth are
/// granted **once per gain event regardless of how many levels were
/// crossed**; this is long-standing behavior that migrated characters
/// depend on. Level never decreases and caps at
/// [`BattleConfig::MAX_LEVEL`].
pub fn apply_experience(
    level: u8,
    experience: u64,
    growth_per_level: &StatBlock,
    gained: u64,
    table: &ExperienceTable<'_>,
) -> ProgressionResult {
    if level >= BattleConfig::MAX_LEVEL {
        return ProgressionResult::unchanged(level);
    }

    let new_total = experience.saturating_add(gained);
    let reachable = match table.level_for(new_total) {
        Some(reachable) => reachable.min(BattleConfig::MAX_LEVEL),
        None => return ProgressionResult::unchanged(level),
    };

    if reachable <= level {
        return ProgressionResult::unchanged(level);
    }

    ProgressionResult {
        new_level: reachable,
        levels_gained: reachable - level,
        bonus_status_points: BattleConfig::BONUS_STATUS_POINT_PER_LEVEL,
        stat_growth: *growth_per_level,
    }
}

/// Snapshot of where a character sits inside their current level band.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExperienceProgress {
    pub current_level: u8,
    pub current_experience: u64,
    /// Experience earned past the current level's threshold.
    pub experience_in_current_level: u64,
    /// Width of the band between the current and next thresholds.
    pub experience_needed_for_next_level: u64,
    /// 0.0..=100.0.
    pub progress_percent: f32,
    pub can_level_up: bool,
    pub is_max_level: bool,
}

/// Pure progress query; mutates nothing and is safe to call repeatedly.
///
/// Returns `None` when the level has no table row, which cannot happen for
/// levels 1..=99 built from the canonical table.
pub fn experience_progress(
    level: u8,
    experience: u64,
    table: &ExperienceTable<'_>,
) -> Option<ExperienceProgress> {
    if level >= BattleConfig::MAX_LEVEL {
        return Some(ExperienceProgress {
            current_level: level,
            current_experience: experience,
            experience_in_current_level: 0,
            experience_needed_for_next_level: 0,
            progress_percent: 100.0,
            can_level_up: false,
            is_max_level: true,
        });
    }

    let current_row = table.row(level)?;
    let next_row = table.row(level + 1)?;

    let in_level = experience.saturating_sub(current_row.experience);
    let band = next_row.experience - current_row.experience;

    Some(ExperienceProgress {
        current_level: level,
        current_experience: experience,
        experience_in_current_level: in_level,
        experience_needed_for_next_level: band,
        progress_percent: (in_level as f32 / band as f32) * 100.0,
        can_level_up: experience >= next_row.experience,
        is_max_level: false,
    })
}
