use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::pack::Pack;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog file not found: {0}")]
    NotFound(PathBuf),
    #[error("unsupported catalog format: {0} (expected .json, .yaml, or .yml)")]
    UnsupportedFormat(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog at {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to parse catalog at {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("duplicate pack slug '{0}' in catalog")]
    DuplicateSlug(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Loads a pack catalogue from a JSON or YAML file, chosen by extension.
/// Slugs must be unique within one catalogue.
pub fn load_catalog(path: &Path) -> Result<Vec<Pack>> {
    if !path.is_file() {
        return Err(CatalogError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    let packs: Vec<Pack> = match path.extension().and_then(OsStr::to_str) {
        Some("json") => {
            serde_json::from_str(&content).map_err(|source| CatalogError::Json {
                path: path.to_path_buf(),
                source,
            })?
        }
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(&content).map_err(|source| CatalogError::Yaml {
                path: path.to_path_buf(),
                source,
            })?
        }
        _ => return Err(CatalogError::UnsupportedFormat(path.to_path_buf())),
    };
    validate_slugs(&packs)?;
    Ok(packs)
}

pub fn validate_slugs(packs: &[Pack]) -> Result<()> {
    let mut seen = HashSet::new();
    for pack in packs {
        if !seen.insert(pack.slug.as_str()) {
            return Err(CatalogError::DuplicateSlug(pack.slug.clone()));
        }
    }
    Ok(())
}
