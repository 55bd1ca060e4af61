//! Static game content: experience thresholds, jobs, maps, and monsters.
//!
//! This crate houses the data the engine computes against. Content is
//! consumed by the runtime and never appears inside `game-core` itself;
//! the monster catalog can optionally be overridden from a RON file via
//! the `loaders` feature.

pub mod experience;
pub mod jobs;
pub mod maps;
pub mod monsters;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use experience::{EXPERIENCE_TABLE, experience_table};
pub use jobs::{JOB_LIST, Job, job};
pub use maps::{MAPS, MapInfo, map};
pub use monsters::{Encounter, MonsterCatalog, MonsterTemplate, MonsterVariant, Rank};

#[cfg(feature = "loaders")]
pub use loaders::CatalogLoader;
