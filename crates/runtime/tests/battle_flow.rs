//! End-to-end runtime flows: battles, rewards, allocation, reset.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use game_core::{AllocationDelta, Role, StatKind};
use game_content::{MonsterCatalog, Rank, job};
use runtime::{
    AllocationService, AllocationServiceError, BattleSession, Character, CharacterRepository,
    InMemoryCharacterRepo, RepositoryError, SessionError,
};

/// Repository decorator that fails operations while the fuse is lit.
struct FlakyRepo {
    inner: InMemoryCharacterRepo,
    fail: AtomicBool,
}

impl FlakyRepo {
    fn new() -> Self {
        Self {
            inner: InMemoryCharacterRepo::new(),
            fail: AtomicBool::new(false),
        }
    }

    fn fail_next(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.fail.swap(false, Ordering::SeqCst) {
            Err(RepositoryError::Backend("injected failure".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CharacterRepository for FlakyRepo {
    async fn save(&self, character: &Character) -> Result<(), RepositoryError> {
        self.check()?;
        self.inner.save(character).await
    }

    async fn load(&self, name: &str) -> Result<Option<Character>, RepositoryError> {
        self.inner.load(name).await
    }

    async fn allocate_status_points(
        &self,
        name: &str,
        delta: &AllocationDelta,
    ) -> Result<(), RepositoryError> {
        self.check()?;
        self.inner.allocate_status_points(name, delta).await
    }

    async fn reset_status_points(&self, name: &str) -> Result<(), RepositoryError> {
        self.check()?;
        self.inner.reset_status_points(name).await
    }
}

fn fresh_character() -> Character {
    Character::from_job("Aria", job(3).unwrap())
}

fn slime_encounter() -> game_content::Encounter {
    // Rank F slime from the builtin catalog keeps the fight winnable for
    // a level-1 character.
    let catalog = MonsterCatalog::builtin();
    let template = &catalog.templates_for_map(1)[0];
    let variant = catalog.variant(template.id, Rank::F).unwrap();
    game_content::Encounter {
        monster_id: template.id,
        map_id: template.map_id,
        name: template.name.clone(),
        rank: variant.rank,
        level: variant.level,
        stats: variant.stats,
        experience: variant.experience,
        gold: variant.gold,
    }
}

#[tokio::test]
async fn victory_grants_rewards_exactly_once() {
    let repo = Arc::new(InMemoryCharacterRepo::new());
    let mut session =
        BattleSession::with_seed(fresh_character(), slime_encounter(), repo.clone(), 42);

    let report = session.run().await.expect("battle runs");
    assert_eq!(report.outcome.winner, Role::Character);
    assert_eq!(session.character().gold, 35);
    assert_eq!(session.character().experience, 120);

    // The latch blocks a second run for the same encounter.
    let err = session.run().await.unwrap_err();
    assert!(matches!(err, SessionError::BattleAlreadyResolved));
    assert_eq!(session.character().gold, 35);

    // Swapping encounters re-arms the latch.
    session.next_encounter(slime_encounter());
    session.run().await.expect("second battle runs");
    assert_eq!(session.character().gold, 70);

    // And the repository saw every save.
    let stored = repo.load("Aria").await.unwrap().unwrap();
    assert_eq!(stored.gold, 70);
}

#[tokio::test]
async fn persistence_failure_reverts_and_allows_retry() {
    let repo = Arc::new(FlakyRepo::new());
    let mut session =
        BattleSession::with_seed(fresh_character(), slime_encounter(), repo.clone(), 42);

    repo.fail_next();
    let err = session.run().await.unwrap_err();
    assert!(matches!(err, SessionError::Repository(_)));

    // Nothing was granted.
    assert_eq!(session.character().gold, 0);
    assert_eq!(session.character().experience, 0);

    // The retry succeeds and grants once.
    session.run().await.expect("retry runs");
    assert_eq!(session.character().gold, 35);
}

#[tokio::test]
async fn grinding_levels_up_eventually() {
    // Level 2 needs 300 experience; three slimes at 120 cross it on the
    // third kill, granting the flat one-point bonus plus growth.
    let repo = Arc::new(InMemoryCharacterRepo::new());
    let mut session =
        BattleSession::with_seed(fresh_character(), slime_encounter(), repo, 42);

    let mut leveled = None;
    for round in 0..3 {
        if round > 0 {
            session.next_encounter(slime_encounter());
        }
        let report = session.run().await.expect("battle runs");
        assert_eq!(report.outcome.winner, Role::Character);
        if let Some(progression) = report.progression {
            if progression.levels_gained > 0 {
                leveled = Some(progression);
            }
        }
    }

    let progression = leveled.expect("should level up on 360 experience");
    assert_eq!(progression.new_level, 2);
    assert_eq!(session.character().level, 2);
    assert_eq!(session.character().status_points, 1);
}

#[tokio::test]
async fn allocation_apply_commits_through_the_repository() {
    let repo = Arc::new(InMemoryCharacterRepo::new());
    let mut character = fresh_character();
    character.status_points = 3;
    repo.save(&character).await.unwrap();

    let mut service = AllocationService::new(repo.clone());
    service.begin(&character).unwrap();
    service.allocate(StatKind::Attack, 2).unwrap();
    service.allocate(StatKind::Health, 1).unwrap();
    service.apply(&mut character).await.expect("apply commits");

    assert_eq!(character.stats.attack, 13);
    assert_eq!(character.stats.health, 110);
    assert_eq!(character.status_points, 0);
    assert!(service.session().is_none());

    let stored = repo.load("Aria").await.unwrap().unwrap();
    assert_eq!(stored.stats, character.stats);
}

#[tokio::test]
async fn failed_apply_keeps_the_working_stats() {
    let repo = Arc::new(FlakyRepo::new());
    let mut character = fresh_character();
    character.status_points = 2;
    repo.inner.save(&character).await.unwrap();

    let mut service = AllocationService::new(repo.clone());
    service.begin(&character).unwrap();
    service.allocate(StatKind::Speed, 2).unwrap();

    repo.fail_next();
    let err = service.apply(&mut character).await.unwrap_err();
    assert!(matches!(err, AllocationServiceError::Repository(_)));

    // The character is untouched and the session survives for a retry.
    assert_eq!(character.stats.speed, 12);
    let session = service.session().expect("still allocating");
    assert_eq!(session.working().speed, 14);

    service.apply(&mut character).await.expect("retry commits");
    assert_eq!(character.stats.speed, 14);
    assert_eq!(character.status_points, 0);
}

#[tokio::test]
async fn reset_reverts_when_persistence_fails() {
    let repo = Arc::new(FlakyRepo::new());
    let mut character = fresh_character();
    character.level = 5;
    character.status_points = 1;
    repo.inner.save(&character).await.unwrap();

    let mut service = AllocationService::new(repo.clone());
    let before = (character.stats, character.status_points);

    repo.fail_next();
    assert!(service.reset(&mut character).await.is_err());
    assert_eq!((character.stats, character.status_points), before);

    service.reset(&mut character).await.expect("reset commits");
    // Archer at level 5: base + growth * 5, points = level - 1.
    let archer = job(3).unwrap();
    assert_eq!(
        character.stats,
        archer.base_status.grown_by(&archer.growth_per_level, 5)
    );
    assert_eq!(character.status_points, 4);
}
