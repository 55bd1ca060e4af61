//! Allocation service: the core state machine wired to persistence.
//!
//! The workflow in `game-core` is pure; this service owns the submit /
//! confirm / reject dance against the repository. A failed apply returns
//! the workflow to `Allocating` with the player's working stats intact so
//! they can retry instead of losing their edits.

use std::sync::Arc;

use game_core::{
    AllocationError, AllocationSession, AllocationWorkflow, StatKind, reset_status_points,
};

use crate::character::Character;
use crate::repository::{CharacterRepository, RepositoryError};

/// Failures surfaced by the allocation service.
#[derive(Debug, thiserror::Error)]
pub enum AllocationServiceError {
    #[error(transparent)]
    Workflow(#[from] AllocationError),
    /// Persistence failed; in-memory state was reverted and the operation
    /// may be retried.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("character references unknown job {job_id}")]
    UnknownJob { job_id: u32 },
    #[error("cannot reset status points while an allocation is active")]
    ResetWhileAllocating,
}

/// Drives [`AllocationWorkflow`] against a repository.
pub struct AllocationService {
    workflow: AllocationWorkflow,
    repository: Arc<dyn CharacterRepository>,
}

impl AllocationService {
    pub fn new(repository: Arc<dyn CharacterRepository>) -> Self {
        Self {
            workflow: AllocationWorkflow::new(),
            repository,
        }
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&AllocationSession> {
        self.workflow.session()
    }

    /// Start allocating the character's unspent points.
    pub fn begin(&mut self, character: &Character) -> Result<(), AllocationServiceError> {
        self.workflow.begin(character.stats, character.status_points)?;
        Ok(())
    }

    /// Move points into or out of a stat on the working copy.
    pub fn allocate(&mut self, stat: StatKind, points: i32) -> Result<(), AllocationServiceError> {
        self.workflow.allocate(stat, points)?;
        Ok(())
    }

    /// Abandon the session without touching the character.
    pub fn cancel(&mut self) -> Result<(), AllocationServiceError> {
        self.workflow.cancel()?;
        Ok(())
    }

    /// Submit the working stats for persistence and commit on success.
    ///
    /// On repository failure the workflow drops back to `Allocating` with
    /// the working stats intact and the error is surfaced as retryable.
    pub async fn apply(
        &mut self,
        character: &mut Character,
    ) -> Result<(), AllocationServiceError> {
        let delta = self.workflow.submit()?;

        match self
            .repository
            .allocate_status_points(&character.name, &delta)
            .await
        {
            Ok(()) => {
                let (stats, remaining) = self.workflow.confirm()?;
                character.stats = stats;
                character.status_points = remaining;
                tracing::info!(
                    character = %character.name,
                    points = delta.total_points(),
                    "allocation committed"
                );
                Ok(())
            }
            Err(error) => {
                // Back to Allocating; the player's edits survive.
                self.workflow.reject()?;
                tracing::warn!(%error, "allocation persistence failed");
                Err(error.into())
            }
        }
    }

    /// Destructively refund every spent point.
    ///
    /// Only available outside an allocation session. Recomputes stats from
    /// the job's base and growth, then asks the repository to do the same;
    /// a persistence failure reverts the in-memory record.
    pub async fn reset(
        &mut self,
        character: &mut Character,
    ) -> Result<(), AllocationServiceError> {
        if self.workflow.session().is_some() {
            return Err(AllocationServiceError::ResetWhileAllocating);
        }

        let job = game_content::job(character.job_id).ok_or(
            AllocationServiceError::UnknownJob {
                job_id: character.job_id,
            },
        )?;
        let (stats, points) =
            reset_status_points(&job.base_status, &job.growth_per_level, character.level);

        let snapshot = (character.stats, character.status_points);
        character.stats = stats;
        character.status_points = points;

        if let Err(error) = self.repository.reset_status_points(&character.name).await {
            (character.stats, character.status_points) = snapshot;
            tracing::warn!(%error, "status point reset failed, reverting");
            return Err(error.into());
        }

        tracing::info!(character = %character.name, points, "status points reset");
        Ok(())
    }
}
