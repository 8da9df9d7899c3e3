use thiserror::Error;

use crate::catalog::CatalogError;

#[derive(Debug, Error)]
pub enum PackgraphError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, PackgraphError>;
