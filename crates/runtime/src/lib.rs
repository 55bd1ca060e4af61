//! Runtime orchestration around the pure battle/progression engine.
//!
//! `game-core` computes; this crate owns state and side effects. It holds
//! the character record, persists it through repository traits, runs
//! battles through [`session::BattleSession`] (including the re-entry
//! latch and the one-shot reward application), and drives the allocation
//! workflow against persistence with revert-on-failure semantics.
//!
//! Modules are organized by responsibility:
//! - [`character`] is the owned character record and its mutations
//! - [`repository`] defines persistence contracts and an in-memory impl
//! - [`session`] runs battles and applies rewards exactly once
//! - [`allocation`] drives the allocation state machine against a repository

pub mod allocation;
pub mod character;
pub mod repository;
pub mod session;

pub use allocation::{AllocationService, AllocationServiceError};
pub use character::Character;
pub use repository::{CharacterRepository, InMemoryCharacterRepo, RepositoryError};
pub use session::{BattleReport, BattleSession, SessionError};
