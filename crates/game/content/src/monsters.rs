//! Monster catalog and rank-weighted encounter selection.
//!
//! Every base monster belongs to one map and exists in eight rank
//! variants, F (weakest) through SS (strongest). An encounter picks a base
//! monster uniformly from the map's roster, draws a rank against the
//! probability ladder, and joins the two into a concrete battle monster.

use game_core::{RngOracle, Role, StatBlock, compute_seed};

/// Roll context tags for [`compute_seed`].
const CONTEXT_TEMPLATE: u32 = 0;
const CONTEXT_RANK: u32 = 1;

/// Monster rank tier. Order matters: weakest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rank {
    F,
    E,
    D,
    C,
    B,
    A,
    S,
    SS,
}

impl Rank {
    pub const ALL: [Rank; 8] = [
        Rank::F,
        Rank::E,
        Rank::D,
        Rank::C,
        Rank::B,
        Rank::A,
        Rank::S,
        Rank::SS,
    ];

    /// Map a uniform draw in `[0, 1)` onto a rank.
    ///
    /// The ladder is cumulative: SS below 0.10, S below 0.30, A below
    /// 0.45, B below 0.60, C below 0.65, D below 0.75, E below 0.85, F
    /// otherwise.
    pub fn from_roll(roll: f64) -> Rank {
        if roll < 0.10 {
            Rank::SS
        } else if roll < 0.30 {
            Rank::S
        } else if roll < 0.45 {
            Rank::A
        } else if roll < 0.60 {
            Rank::B
        } else if roll < 0.65 {
            Rank::C
        } else if roll < 0.75 {
            Rank::D
        } else if roll < 0.85 {
            Rank::E
        } else {
            Rank::F
        }
    }

    /// Stat scaling applied to the base monster at this rank.
    fn stat_multiplier(&self) -> f64 {
        match self {
            Rank::F => 1.0,
            Rank::E => 1.15,
            Rank::D => 1.35,
            Rank::C => 1.6,
            Rank::B => 1.9,
            Rank::A => 2.25,
            Rank::S => 2.7,
            Rank::SS => 3.25,
        }
    }

    /// Experience/gold scaling at this rank.
    fn reward_multiplier(&self) -> f64 {
        match self {
            Rank::F => 1.0,
            Rank::E => 1.3,
            Rank::D => 1.7,
            Rank::C => 2.2,
            Rank::B => 2.9,
            Rank::A => 3.8,
            Rank::S => 5.0,
            Rank::SS => 6.5,
        }
    }

    /// Levels added on top of the base monster's level.
    fn level_offset(&self) -> u8 {
        match self {
            Rank::F => 0,
            Rank::E => 1,
            Rank::D => 2,
            Rank::C => 4,
            Rank::B => 6,
            Rank::A => 9,
            Rank::S => 12,
            Rank::SS => 16,
        }
    }
}

/// A base monster as shown on the map page; rank-independent.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterTemplate {
    pub id: u32,
    pub map_id: u32,
    pub name: String,
    pub description: String,
}

/// Rank-specific numbers for one base monster.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterVariant {
    pub monster_id: u32,
    pub rank: Rank,
    pub level: u8,
    pub experience: u64,
    pub gold: u64,
    pub stats: StatBlock,
}

/// A fully resolved battle monster: template joined with one variant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Encounter {
    pub monster_id: u32,
    pub map_id: u32,
    pub name: String,
    pub rank: Rank,
    pub level: u8,
    pub stats: StatBlock,
    pub experience: u64,
    pub gold: u64,
}

/// The full monster roster: templates plus their rank variants.
#[derive(Clone, Debug, Default)]
pub struct MonsterCatalog {
    templates: Vec<MonsterTemplate>,
    variants: Vec<MonsterVariant>,
}

impl MonsterCatalog {
    pub fn new(templates: Vec<MonsterTemplate>, variants: Vec<MonsterVariant>) -> Self {
        Self {
            templates,
            variants,
        }
    }

    /// The built-in roster: one or more base monsters per map, each
    /// expanded into all eight rank variants.
    pub fn builtin() -> Self {
        let mut catalog = Self::default();
        for spec in BUILTIN_MONSTERS {
            catalog.add_expanded(spec);
        }
        catalog
    }

    /// Add a base monster and generate its eight rank variants from the
    /// rank scaling tables.
    fn add_expanded(&mut self, spec: &BuiltinMonster) {
        self.templates.push(MonsterTemplate {
            id: spec.id,
            map_id: spec.map_id,
            name: spec.name.to_string(),
            description: spec.description.to_string(),
        });
        for rank in Rank::ALL {
            self.variants.push(MonsterVariant {
                monster_id: spec.id,
                rank,
                level: spec.base_level.saturating_add(rank.level_offset()),
                experience: scale(spec.base_experience, rank.reward_multiplier()),
                gold: scale(spec.base_gold, rank.reward_multiplier()),
                stats: scale_stats(&spec.base_stats, rank.stat_multiplier()),
            });
        }
    }

    pub fn templates(&self) -> &[MonsterTemplate] {
        &self.templates
    }

    /// Base monsters roaming a given map.
    pub fn templates_for_map(&self, map_id: u32) -> Vec<&MonsterTemplate> {
        self.templates
            .iter()
            .filter(|template| template.map_id == map_id)
            .collect()
    }

    /// Join a base monster with one rank's numbers.
    pub fn variant(&self, monster_id: u32, rank: Rank) -> Option<&MonsterVariant> {
        self.variants
            .iter()
            .find(|variant| variant.monster_id == monster_id && variant.rank == rank)
    }

    /// Roll a random encounter on a map.
    ///
    /// Picks a base monster uniformly from the map's roster, draws a rank
    /// against the ladder, and joins them. Returns `None` when the map has
    /// no monsters or the variant row is missing; callers log and move on
    /// rather than fail.
    pub fn random_encounter(
        &self,
        map_id: u32,
        rng: &impl RngOracle,
        seed: u64,
    ) -> Option<Encounter> {
        let roster = self.templates_for_map(map_id);
        if roster.is_empty() {
            return None;
        }

        let template_seed = compute_seed(seed, 0, Role::Monster, CONTEXT_TEMPLATE);
        let rank_seed = compute_seed(seed, 0, Role::Monster, CONTEXT_RANK);

        let template = roster[rng.index(template_seed, roster.len())];
        let rank = Rank::from_roll(rng.unit(rank_seed));
        let variant = self.variant(template.id, rank)?;

        Some(Encounter {
            monster_id: template.id,
            map_id: template.map_id,
            name: template.name.clone(),
            rank: variant.rank,
            level: variant.level,
            stats: variant.stats,
            experience: variant.experience,
            gold: variant.gold,
        })
    }
}

fn scale(base: u64, multiplier: f64) -> u64 {
    (base as f64 * multiplier).round() as u64
}

fn scale_stats(base: &StatBlock, multiplier: f64) -> StatBlock {
    let scaled = |value: u32| (f64::from(value) * multiplier).round() as u32;
    StatBlock {
        health: scaled(base.health),
        attack: scaled(base.attack),
        defense: scaled(base.defense),
        speed: scaled(base.speed),
        // Critical chance stays a percentage, so it caps at 100.
        critical: scaled(base.critical).min(100),
    }
}

/// Authoring shape for the built-in roster.
struct BuiltinMonster {
    id: u32,
    map_id: u32,
    name: &'static str,
    description: &'static str,
    base_level: u8,
    base_stats: StatBlock,
    base_experience: u64,
    base_gold: u64,
}

const fn stats(health: u32, attack: u32, defense: u32, speed: u32, critical: u32) -> StatBlock {
    StatBlock {
        health,
        attack,
        defense,
        speed,
        critical,
    }
}

const BUILTIN_MONSTERS: &[BuiltinMonster] = &[
    BuiltinMonster {
        id: 1,
        map_id: 1,
        name: "Slime",
        description: "A wobbling blob that dissolves whatever it settles on.",
        base_level: 1,
        base_stats: stats(50, 5, 2, 5, 0),
        base_experience: 120,
        base_gold: 35,
    },
    BuiltinMonster {
        id: 2,
        map_id: 1,
        name: "Wild Boar",
        description: "Short-tempered and built like a battering ram.",
        base_level: 2,
        base_stats: stats(70, 8, 4, 7, 3),
        base_experience: 180,
        base_gold: 50,
    },
    BuiltinMonster {
        id: 3,
        map_id: 1,
        name: "Forest Wisp",
        description: "A flicker of light that stings like a hornet.",
        base_level: 3,
        base_stats: stats(45, 10, 1, 12, 8),
        base_experience: 210,
        base_gold: 60,
    },
    BuiltinMonster {
        id: 4,
        map_id: 2,
        name: "Sand Scorpion",
        description: "Armored, patient, and fond of ankles.",
        base_level: 4,
        base_stats: stats(90, 12, 8, 8, 6),
        base_experience: 320,
        base_gold: 90,
    },
    BuiltinMonster {
        id: 5,
        map_id: 2,
        name: "Dune Stalker",
        description: "You will hear the sand shift exactly once.",
        base_level: 6,
        base_stats: stats(110, 16, 6, 14, 10),
        base_experience: 450,
        base_gold: 130,
    },
    BuiltinMonster {
        id: 6,
        map_id: 3,
        name: "Frost Wolf",
        description: "Hunts in the thin air above the snow line.",
        base_level: 8,
        base_stats: stats(150, 20, 10, 16, 12),
        base_experience: 700,
        base_gold: 200,
    },
    BuiltinMonster {
        id: 7,
        map_id: 4,
        name: "Bog Lurker",
        description: "Mostly mud. The rest is teeth.",
        base_level: 11,
        base_stats: stats(230, 24, 16, 9, 5),
        base_experience: 1100,
        base_gold: 320,
    },
    BuiltinMonster {
        id: 8,
        map_id: 5,
        name: "Plains Raptor",
        description: "Faster than anything that has ever chased you.",
        base_level: 14,
        base_stats: stats(200, 30, 12, 22, 15),
        base_experience: 1600,
        base_gold: 470,
    },
    BuiltinMonster {
        id: 9,
        map_id: 6,
        name: "Back-Alley Bandit",
        description: "Charges city prices for the privilege of being robbed.",
        base_level: 18,
        base_stats: stats(280, 38, 20, 20, 18),
        base_experience: 2400,
        base_gold: 700,
    },
];
