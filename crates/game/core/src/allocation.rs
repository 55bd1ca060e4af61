//! Status-point allocation workflow.
//!
//! A small state machine that lets a player provisionally redistribute
//! earned status points before committing. The machine owns a scratch copy
//! of the stats; the character's committed record is only touched when the
//! external persistence call confirms.
//!
//! ```text
//! Idle ──begin──▶ Allocating ──submit──▶ Submitting ──confirm──▶ Idle
//!                   │    ▲                   │
//!                 cancel └──────reject───────┘
//! ```
//!
//! While a submission is in flight no further allocation input is
//! accepted; a rejected submission returns to `Allocating` with the
//! player's working stats intact.

use crate::config::BattleConfig;
use crate::stats::{StatBlock, StatKind};

/// Typed rejections from the workflow. State-machine violations are
/// explicit errors, never panics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
    #[error("no allocation session is active")]
    NotAllocating,
    #[error("an allocation session is already active")]
    AlreadyAllocating,
    #[error("no status points available to allocate")]
    NoPointsAvailable,
    #[error("not enough points: need {needed}, have {available}")]
    InsufficientPoints { needed: u32, available: u32 },
    #[error("{stat} cannot drop below its committed value")]
    BelowCommitted { stat: StatKind },
    #[error("{stat} cannot exceed {ceiling}")]
    AboveCeiling { stat: StatKind, ceiling: u32 },
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    #[error("no submission is in flight")]
    NotSubmitting,
    #[error("the working stats do not differ from the committed stats")]
    NothingToSubmit,
}

/// Ephemeral workspace while the player is redistributing points.
///
/// `remaining_points` only decreases when a stat is raised and only
/// increases when a stat is lowered back toward (never below) the
/// committed snapshot: points spent before the session began cannot be
/// refunded here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllocationSession {
    committed: StatBlock,
    working: StatBlock,
    remaining_points: u32,
}

impl AllocationSession {
    pub fn working(&self) -> &StatBlock {
        &self.working
    }

    pub fn committed(&self) -> &StatBlock {
        &self.committed
    }

    pub fn remaining_points(&self) -> u32 {
        self.remaining_points
    }

    /// Move `points` allocation points into or out of a stat.
    ///
    /// Each point moves the stat by its step (10 for health, 1 for the
    /// rest). Positive spends points, negative refunds them; zero is a
    /// no-op.
    fn allocate(&mut self, stat: StatKind, points: i32) -> Result<(), AllocationError> {
        if points == 0 {
            return Ok(());
        }

        let magnitude = points.unsigned_abs();
        let step = stat.step();
        let current = self.working.get(stat);

        if points > 0 {
            if magnitude > self.remaining_points {
                return Err(AllocationError::InsufficientPoints {
                    needed: magnitude,
                    available: self.remaining_points,
                });
            }
            // checked_mul: a spend too large for u32 is over any ceiling.
            let raised = magnitude
                .checked_mul(step)
                .and_then(|spend| current.checked_add(spend))
                .filter(|raised| *raised <= stat.ceiling())
                .ok_or(AllocationError::AboveCeiling {
                    stat,
                    ceiling: stat.ceiling(),
                })?;
            self.working.set(stat, raised);
            self.remaining_points -= magnitude;
        } else {
            let floor = self.committed.get(stat);
            // checked_mul: a refund too large for u32 is under any floor.
            let refund = magnitude
                .checked_mul(step)
                .filter(|refund| current >= floor.saturating_add(*refund))
                .ok_or(AllocationError::BelowCommitted { stat })?;
            self.working.set(stat, current - refund);
            self.remaining_points += magnitude;
        }

        Ok(())
    }

    /// Per-stat point spend between working and committed stats.
    fn delta(&self) -> AllocationDelta {
        AllocationDelta {
            health_points: (self.working.health - self.committed.health)
                / BattleConfig::HEALTH_PER_STATUS_POINT,
            attack_points: self.working.attack - self.committed.attack,
            defense_points: self.working.defense - self.committed.defense,
            speed_points: self.working.speed - self.committed.speed,
            critical_points: self.working.critical - self.committed.critical,
        }
    }
}

/// Point spend submitted to the persistence collaborator on apply.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllocationDelta {
    pub health_points: u32,
    pub attack_points: u32,
    pub defense_points: u32,
    pub speed_points: u32,
    pub critical_points: u32,
}

impl AllocationDelta {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Total points this delta spends.
    pub fn total_points(&self) -> u32 {
        self.health_points
            + self.attack_points
            + self.defense_points
            + self.speed_points
            + self.critical_points
    }
}

/// Current workflow state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AllocationState {
    Idle,
    Allocating(AllocationSession),
    Submitting(AllocationSession),
}

/// The allocation state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllocationWorkflow {
    state: AllocationState,
}

impl AllocationWorkflow {
    pub fn new() -> Self {
        Self {
            state: AllocationState::Idle,
        }
    }

    pub fn state(&self) -> &AllocationState {
        &self.state
    }

    /// The active session, whether allocating or submitting.
    pub fn session(&self) -> Option<&AllocationSession> {
        match &self.state {
            AllocationState::Idle => None,
            AllocationState::Allocating(session) | AllocationState::Submitting(session) => {
                Some(session)
            }
        }
    }

    /// Idle → Allocating. Requires at least one unspent point; snapshots
    /// the committed stats as the refund floor.
    pub fn begin(&mut self, committed: StatBlock, points: u32) -> Result<(), AllocationError> {
        match self.state {
            AllocationState::Idle => {
                if points == 0 {
                    return Err(AllocationError::NoPointsAvailable);
                }
                self.state = AllocationState::Allocating(AllocationSession {
                    committed,
                    working: committed,
                    remaining_points: points,
                });
                Ok(())
            }
            _ => Err(AllocationError::AlreadyAllocating),
        }
    }

    /// Allocating self-transition; rejected while a submission is in
    /// flight.
    pub fn allocate(&mut self, stat: StatKind, points: i32) -> Result<(), AllocationError> {
        match &mut self.state {
            AllocationState::Allocating(session) => session.allocate(stat, points),
            AllocationState::Submitting(_) => Err(AllocationError::SubmissionInFlight),
            AllocationState::Idle => Err(AllocationError::NotAllocating),
        }
    }

    /// Allocating → Idle; discards the working stats.
    pub fn cancel(&mut self) -> Result<(), AllocationError> {
        match self.state {
            AllocationState::Allocating(_) => {
                self.state = AllocationState::Idle;
                Ok(())
            }
            AllocationState::Submitting(_) => Err(AllocationError::SubmissionInFlight),
            AllocationState::Idle => Err(AllocationError::NotAllocating),
        }
    }

    /// Allocating → Submitting. Returns the delta for the persistence
    /// call; an unchanged session has nothing to submit.
    pub fn submit(&mut self) -> Result<AllocationDelta, AllocationError> {
        match self.state {
            AllocationState::Allocating(session) => {
                let delta = session.delta();
                if delta.is_empty() {
                    return Err(AllocationError::NothingToSubmit);
                }
                self.state = AllocationState::Submitting(session);
                Ok(delta)
            }
            AllocationState::Submitting(_) => Err(AllocationError::SubmissionInFlight),
            AllocationState::Idle => Err(AllocationError::NotAllocating),
        }
    }

    /// Submitting → Idle on collaborator confirmation. Yields the new
    /// committed stats and remaining point balance for the caller to
    /// adopt.
    pub fn confirm(&mut self) -> Result<(StatBlock, u32), AllocationError> {
        match self.state {
            AllocationState::Submitting(session) => {
                self.state = AllocationState::Idle;
                Ok((session.working, session.remaining_points))
            }
            _ => Err(AllocationError::NotSubmitting),
        }
    }

    /// Submitting → Allocating on collaborator failure. The player's
    /// working stats survive for a retry.
    pub fn reject(&mut self) -> Result<(), AllocationError> {
        match self.state {
            AllocationState::Submitting(session) => {
                self.state = AllocationState::Allocating(session);
                Ok(())
            }
            _ => Err(AllocationError::NotSubmitting),
        }
    }
}

impl Default for AllocationWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

/// Recompute a character's stats and point balance from scratch,
/// refunding every previously spent point.
///
/// Stats become `base + growth * level`; the point balance becomes one
/// level's worth short of `level * STATUS_POINTS_PER_LEVEL`. This is an
/// immediate, destructive operation independent of the allocation state
/// machine; the runtime performs the matching persistence call.
pub fn reset_status_points(base: &StatBlock, growth: &StatBlock, level: u8) -> (StatBlock, u32) {
    let stats = base.grown_by(growth, u32::from(level));
    // saturating_sub keeps a (never-issued) level 0 at zero points.
    let points = (u32::from(level) * BattleConfig::STATUS_POINTS_PER_LEVEL)
        .saturating_sub(BattleConfig::STATUS_POINTS_PER_LEVEL);
    (stats, points)
}
