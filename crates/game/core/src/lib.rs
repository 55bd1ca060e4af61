//! Deterministic battle and progression logic shared across clients.
//!
//! `game-core` defines the canonical rules of combat (turn scheduling,
//! damage resolution, full battle simulation) and character growth
//! (experience thresholds, level-ups, status-point allocation) and exposes
//! pure APIs that can be reused by the runtime and offline tools.
//!
//! Nothing in this crate performs I/O or keeps global state: randomness is
//! injected through [`rng::RngOracle`], and every operation takes state in
//! and hands state back to the caller.
pub mod allocation;
pub mod battle;
pub mod config;
pub mod entity;
pub mod progression;
pub mod rng;
pub mod stats;

pub use allocation::{
    AllocationDelta, AllocationError, AllocationSession, AllocationState, AllocationWorkflow,
    reset_status_points,
};
pub use battle::{
    AttackRoll, BattleOutcome, BattleRewards, TurnOrder, compute_turn_order, resolve_attack,
    simulate,
};
pub use config::BattleConfig;
pub use entity::{BattleEntity, ProjectionError};
pub use progression::{
    ExperienceProgress, ExperienceRow, ExperienceTable, ProgressionResult, apply_experience,
    experience_progress,
};
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use stats::{Role, StatBlock, StatKind};
