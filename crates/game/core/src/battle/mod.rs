//! Battle resolution system.
//!
//! This module owns one full combat between a character and a monster:
//!
//! - `turn`: precomputes the speed-proportional turn schedule
//! - `attack`: resolves a single attack (variance + critical roll)
//! - `simulate`: drives the schedule through attack resolution to a
//!   [`BattleOutcome`]
//!
//! Everything here is a pure function of its inputs plus the injected RNG
//! seed. Reward side effects (experience, gold) belong to the caller.

pub mod attack;
pub mod simulate;
pub mod turn;

pub use attack::{AttackRoll, resolve_attack};
pub use simulate::{BattleOutcome, BattleRewards, simulate};
pub use turn::{TurnOrder, compute_turn_order};
