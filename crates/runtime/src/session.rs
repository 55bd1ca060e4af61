//! Battle session: one character against a stream of encounters.
//!
//! The simulator is pure; this is where its side effects live. A session
//! holds the character, the current encounter, and a resolution latch so a
//! battle's rewards can only be granted once. The latch resets when the
//! encounter changes, mirroring how the original client reset its
//! "battle started" flag on monster identity change.

use std::sync::Arc;

use game_core::{
    BattleEntity, BattleOutcome, BattleRewards, PcgRng, ProgressionResult, ProjectionError, Role,
    apply_experience, compute_seed, simulate,
};
use game_content::{Encounter, experience_table};

use crate::character::Character;
use crate::repository::{CharacterRepository, RepositoryError};

/// Failures surfaced by a battle session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The current encounter was already fought; call
    /// [`BattleSession::next_encounter`] first.
    #[error("this encounter is already resolved")]
    BattleAlreadyResolved,
    #[error(transparent)]
    Projection(#[from] ProjectionError),
    /// Persistence failed; the in-memory character was reverted and the
    /// battle may be retried.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Everything the caller needs after one battle.
#[derive(Clone, Debug)]
pub struct BattleReport {
    pub outcome: BattleOutcome,
    /// Present only when the character won; `levels_gained` may still be
    /// zero when the reward fell short of the next threshold.
    pub progression: Option<ProgressionResult>,
}

/// One character's battle loop against successive encounters.
pub struct BattleSession {
    character: Character,
    encounter: Encounter,
    repository: Arc<dyn CharacterRepository>,
    rng: PcgRng,
    session_seed: u64,
    battles_fought: u64,
    resolved: bool,
}

impl BattleSession {
    /// Open a session with an entropy-drawn seed.
    pub fn new(
        character: Character,
        encounter: Encounter,
        repository: Arc<dyn CharacterRepository>,
    ) -> Self {
        Self::with_seed(character, encounter, repository, rand::random())
    }

    /// Open a session with a fixed seed; battles replay identically.
    pub fn with_seed(
        character: Character,
        encounter: Encounter,
        repository: Arc<dyn CharacterRepository>,
        session_seed: u64,
    ) -> Self {
        Self {
            character,
            encounter,
            repository,
            rng: PcgRng,
            session_seed,
            battles_fought: 0,
            resolved: false,
        }
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn encounter(&self) -> &Encounter {
        &self.encounter
    }

    /// Replace the session's character after out-of-band changes, such as
    /// a committed status-point allocation.
    pub fn adopt_character(&mut self, character: Character) {
        self.character = character;
    }

    /// Swap in the next encounter, resetting the resolution latch.
    pub fn next_encounter(&mut self, encounter: Encounter) {
        self.encounter = encounter;
        self.resolved = false;
    }

    /// Fight the current encounter to completion and apply the outcome.
    ///
    /// Rewards are granted exactly once per encounter: the latch rejects a
    /// second run, and a persistence failure reverts the in-memory
    /// character (and leaves the latch open) so the whole battle can be
    /// retried safely.
    pub async fn run(&mut self) -> Result<BattleReport, SessionError> {
        if self.resolved {
            return Err(SessionError::BattleAlreadyResolved);
        }

        let character_entity = self.character.entity()?;
        let monster_entity =
            BattleEntity::monster(self.encounter.name.clone(), self.encounter.stats)?;
        let rewards = BattleRewards {
            experience: self.encounter.experience,
            gold: self.encounter.gold,
        };

        let battle_seed = compute_seed(
            self.session_seed,
            self.battles_fought,
            Role::Character,
            u32::MAX,
        );
        tracing::info!(
            character = %self.character.name,
            monster = %self.encounter.name,
            rank = %self.encounter.rank,
            seed = battle_seed,
            "battle start"
        );

        let outcome = simulate(
            &character_entity,
            &monster_entity,
            rewards,
            &self.rng,
            battle_seed,
        );

        let snapshot = self.character.clone();
        let mut progression = None;

        if outcome.winner == Role::Character {
            let result = apply_experience(
                self.character.level,
                self.character.experience,
                &self.character.growth_per_level,
                rewards.experience,
                &experience_table(),
            );
            self.character.apply_progression(rewards.experience, &result);
            self.character.add_gold(rewards.gold);

            if result.levels_gained > 0 {
                tracing::info!(
                    character = %self.character.name,
                    new_level = result.new_level,
                    levels_gained = result.levels_gained,
                    "level up"
                );
            }
            progression = Some(result);
        } else {
            tracing::info!(
                character = %self.character.name,
                monster = %self.encounter.name,
                "defeat"
            );
        }

        if let Err(error) = self.repository.save(&self.character).await {
            // Roll the record back; the battle never happened as far as
            // the caller is concerned and can be retried.
            self.character = snapshot;
            tracing::warn!(%error, "reward persistence failed, reverting");
            return Err(error.into());
        }

        self.battles_fought += 1;
        self.resolved = true;

        Ok(BattleReport {
            outcome,
            progression,
        })
    }
}
