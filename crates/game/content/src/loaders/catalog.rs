//! Monster catalog loader.
//!
//! Parses a RON file holding templates and their rank variants into a
//! [`MonsterCatalog`], replacing the built-in roster wholesale.

use std::path::Path;

use anyhow::Context;

use crate::loaders::{LoadResult, read_file};
use crate::monsters::{MonsterCatalog, MonsterTemplate, MonsterVariant};

/// On-disk catalog shape.
#[derive(Debug, serde::Deserialize)]
struct CatalogSpec {
    templates: Vec<MonsterTemplate>,
    variants: Vec<MonsterVariant>,
}

/// Loader for monster catalog override files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load a full catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<MonsterCatalog> {
        let contents = read_file(path)?;
        let spec: CatalogSpec = ron::from_str(&contents)
            .with_context(|| format!("Failed to parse monster catalog {}", path.display()))?;
        Ok(MonsterCatalog::new(spec.templates, spec.variants))
    }
}
