//! Repository contracts for character persistence.
//!
//! The engine never talks to storage; the runtime does, through this
//! trait. Production backends sit behind a network; the in-memory
//! implementation covers tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use game_core::AllocationDelta;

use crate::character::Character;

/// Persistence failures surfaced to the runtime.
///
/// Repository errors are retryable from the caller's point of view: the
/// runtime reverts its in-memory state before surfacing them.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository lock poisoned")]
    LockPoisoned,
    #[error("no character named {name}")]
    NotFound { name: String },
    #[error("storage backend failed: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Repository for character persistence.
#[async_trait]
pub trait CharacterRepository: Send + Sync {
    /// Persist the full character record.
    async fn save(&self, character: &Character) -> Result<()>;

    /// Load a character by name.
    async fn load(&self, name: &str) -> Result<Option<Character>>;

    /// Commit a status-point allocation for a character.
    async fn allocate_status_points(&self, name: &str, delta: &AllocationDelta) -> Result<()>;

    /// Destructively refund every spent status point for a character.
    async fn reset_status_points(&self, name: &str) -> Result<()>;
}

/// In-memory CharacterRepository for tests and local runs.
pub struct InMemoryCharacterRepo {
    characters: RwLock<HashMap<String, Character>>,
}

impl InMemoryCharacterRepo {
    pub fn new() -> Self {
        Self {
            characters: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryCharacterRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CharacterRepository for InMemoryCharacterRepo {
    async fn save(&self, character: &Character) -> Result<()> {
        let mut characters = self
            .characters
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        characters.insert(character.name.clone(), character.clone());
        Ok(())
    }

    async fn load(&self, name: &str) -> Result<Option<Character>> {
        let characters = self
            .characters
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(characters.get(name).cloned())
    }

    async fn allocate_status_points(&self, name: &str, delta: &AllocationDelta) -> Result<()> {
        use game_core::{BattleConfig, StatKind};

        let mut characters = self
            .characters
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let character = characters.get_mut(name).ok_or(RepositoryError::NotFound {
            name: name.to_string(),
        })?;

        let spent = delta.total_points();
        if spent > character.status_points {
            return Err(RepositoryError::Backend(format!(
                "allocation spends {spent} points but only {} remain",
                character.status_points
            )));
        }

        let health_gain = delta.health_points * BattleConfig::HEALTH_PER_STATUS_POINT;
        let stats = &mut character.stats;
        stats.set(StatKind::Health, stats.health + health_gain);
        stats.set(StatKind::Attack, stats.attack + delta.attack_points);
        stats.set(StatKind::Defense, stats.defense + delta.defense_points);
        stats.set(StatKind::Speed, stats.speed + delta.speed_points);
        stats.set(StatKind::Critical, stats.critical + delta.critical_points);
        character.status_points -= spent;
        Ok(())
    }

    async fn reset_status_points(&self, name: &str) -> Result<()> {
        use game_core::reset_status_points;

        let mut characters = self
            .characters
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let character = characters.get_mut(name).ok_or(RepositoryError::NotFound {
            name: name.to_string(),
        })?;

        let job = game_content::job(character.job_id).ok_or_else(|| {
            RepositoryError::Backend(format!("character references unknown job {}", character.job_id))
        })?;
        let (stats, points) =
            reset_status_points(&job.base_status, &job.growth_per_level, character.level);
        character.stats = stats;
        character.status_points = points;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_content::job;

    #[tokio::test]
    async fn save_and_load_round_trip() {
        let repo = InMemoryCharacterRepo::new();
        let character = Character::from_job("Aria", job(1).unwrap());
        repo.save(&character).await.unwrap();
        assert_eq!(repo.load("Aria").await.unwrap(), Some(character));
        assert_eq!(repo.load("Nobody").await.unwrap(), None);
    }

    #[tokio::test]
    async fn allocation_updates_the_stored_record() {
        let repo = InMemoryCharacterRepo::new();
        let mut character = Character::from_job("Aria", job(1).unwrap());
        character.status_points = 3;
        repo.save(&character).await.unwrap();

        let delta = AllocationDelta {
            health_points: 1,
            attack_points: 2,
            ..Default::default()
        };
        repo.allocate_status_points("Aria", &delta).await.unwrap();

        let stored = repo.load("Aria").await.unwrap().unwrap();
        assert_eq!(stored.stats.health, 110);
        assert_eq!(stored.stats.attack, 14);
        assert_eq!(stored.status_points, 0);
    }

    #[tokio::test]
    async fn overspending_is_rejected() {
        let repo = InMemoryCharacterRepo::new();
        let character = Character::from_job("Aria", job(1).unwrap());
        repo.save(&character).await.unwrap();

        let delta = AllocationDelta {
            attack_points: 1,
            ..Default::default()
        };
        assert!(repo.allocate_status_points("Aria", &delta).await.is_err());
    }
}
