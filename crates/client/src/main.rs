//! Eldoria battle client binary.
//!
//! Composition root that assembles the engine, content, and runtime layers
//! into a playable grind loop: pick a job, walk onto a map, fight whatever
//! the encounter roll serves up, and spend the status points that victories
//! earn.
//!
//! Configuration comes from the environment (a `.env` file is honored):
//!
//! - `ELDORIA_NAME`: character name (default "Adventurer")
//! - `ELDORIA_JOB`: job id 1-4 (default 2, Swordsman)
//! - `ELDORIA_MAP`: map id 1-6 (default 1, the Forest of Eldoria)
//! - `ELDORIA_BATTLES`: battles to fight (default 5)
//! - `ELDORIA_SEED`: fixed session seed for reproducible runs (default random)

use std::sync::Arc;

use anyhow::{Context, Result, bail};

use game_content::{MonsterCatalog, job, map};
use game_core::{PcgRng, Role, StatKind, compute_seed};
use runtime::{AllocationService, BattleSession, Character, InMemoryCharacterRepo};

/// Roll context for per-battle encounter seeds; battle resolution itself
/// derives its seeds inside the session.
const CONTEXT_ENCOUNTER: u32 = u32::MAX - 1;

struct ClientConfig {
    name: String,
    job_id: u32,
    map_id: u32,
    battles: u64,
    seed: u64,
}

impl ClientConfig {
    fn from_env() -> Result<Self> {
        Ok(Self {
            name: std::env::var("ELDORIA_NAME").unwrap_or_else(|_| "Adventurer".to_string()),
            job_id: env_or("ELDORIA_JOB", 2)?,
            map_id: env_or("ELDORIA_MAP", 1)?,
            battles: env_or("ELDORIA_BATTLES", 5)?,
            seed: match std::env::var("ELDORIA_SEED") {
                Ok(raw) => raw
                    .parse()
                    .with_context(|| format!("ELDORIA_SEED is not a number: {raw}"))?,
                Err(_) => rand::random(),
            },
        })
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ClientConfig::from_env()?;
    run(config).await
}

async fn run(config: ClientConfig) -> Result<()> {
    let job = job(config.job_id)
        .with_context(|| format!("unknown job id {}", config.job_id))?;
    let map = map(config.map_id)
        .with_context(|| format!("unknown map id {}", config.map_id))?;

    let character = Character::from_job(config.name.clone(), job);
    let repository = Arc::new(InMemoryCharacterRepo::new());
    let catalog = MonsterCatalog::builtin();
    let rng = PcgRng;

    tracing::info!(seed = config.seed, "session start");
    println!(
        "{} the {} sets out for {} (recommended level {}).",
        character.name, job.name, map.name, map.recommended_level
    );

    let first = roll_encounter(&catalog, &config, &rng, 0)?;
    let mut session = BattleSession::with_seed(character, first, repository.clone(), config.seed);
    let mut allocation = AllocationService::new(repository);

    for battle in 0..config.battles {
        if battle > 0 {
            session.next_encounter(roll_encounter(&catalog, &config, &rng, battle)?);
        }

        let encounter = session.encounter();
        println!();
        println!(
            "Battle {}: {} [{}] (level {})",
            battle + 1,
            encounter.name,
            encounter.rank,
            encounter.level
        );

        let report = session.run().await?;
        for line in &report.outcome.log {
            println!("  {line}");
        }

        if let Some(progression) = report.progression {
            if progression.levels_gained > 0 {
                println!(
                    "  {} reached level {}!",
                    session.character().name,
                    progression.new_level
                );
                spend_points(&mut allocation, &mut session).await?;
            }
        } else {
            println!("  {} was defeated. The grind continues.", session.character().name);
        }
    }

    let character = session.character();
    println!();
    println!(
        "Done: level {}, {} experience, {} gold, {} unspent points.",
        character.level, character.experience, character.gold, character.status_points
    );
    Ok(())
}

fn roll_encounter(
    catalog: &MonsterCatalog,
    config: &ClientConfig,
    rng: &PcgRng,
    battle: u64,
) -> Result<game_content::Encounter> {
    let seed = compute_seed(config.seed, battle, Role::Monster, CONTEXT_ENCOUNTER);
    match catalog.random_encounter(config.map_id, rng, seed) {
        Some(encounter) => Ok(encounter),
        None => bail!("map {} has no monsters", config.map_id),
    }
}

/// Dump every fresh status point into attack.
///
/// A real frontend would put the allocation workflow behind a menu; the
/// grind loop just wants the numbers to go up.
async fn spend_points(
    allocation: &mut AllocationService,
    session: &mut BattleSession,
) -> Result<()> {
    let points = session.character().status_points;
    if points == 0 {
        return Ok(());
    }

    let mut character = session.character().clone();
    allocation.begin(&character)?;
    allocation.allocate(StatKind::Attack, points as i32)?;
    allocation.apply(&mut character).await?;
    println!("  Spent {points} point(s) on attack.");
    session.adopt_character(character);
    Ok(())
}
