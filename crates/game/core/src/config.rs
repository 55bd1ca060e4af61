/// Battle and progression constants shared by the whole engine.
///
/// Everything here is a compile-time constant: the engine has no runtime
/// configuration surface, and tuning happens by editing these values in one
/// place rather than threading parameters through every call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BattleConfig;

impl BattleConfig {
    // ===== combat =====
    /// Maximum number of scheduled turn slots in a single battle.
    /// A battle that exhausts the schedule is decided on remaining health.
    pub const MAX_TURNS: usize = 100;
    /// Damage variance around the attack stat: rolls land in
    /// `[attack * (1 - VARIANCE), attack * (1 + VARIANCE)]`.
    pub const DAMAGE_VARIANCE: f64 = 0.3;
    /// Critical hits add this fraction of the already-rolled base damage.
    pub const CRIT_BONUS: f64 = 0.5;
    /// Fraction of the defender's defense subtracted from incoming damage.
    pub const DEFENSE_DIVISOR: u32 = 2;

    // ===== progression =====
    /// Level cap; the experience table has exactly this many rows.
    pub const MAX_LEVEL: u8 = 99;
    /// Status points granted when an experience gain crosses at least one
    /// level threshold. Granted once per gain event, not per level.
    pub const BONUS_STATUS_POINT_PER_LEVEL: u32 = 1;
    /// Status points accounted per level when recomputing from scratch.
    pub const STATUS_POINTS_PER_LEVEL: u32 = 1;

    // ===== allocation =====
    /// One allocation point buys this much health; every other stat is 1:1.
    pub const HEALTH_PER_STATUS_POINT: u32 = 10;
    /// Hard ceilings on allocated stats.
    pub const MAX_HEALTH: u32 = 999;
    pub const MAX_STAT: u32 = 99;
}
