//! Error types for loading declaration dumps

use crate::model::SourceLoc;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to build a declaration tree
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read declaration dump {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed declaration dump: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate USR `{0}` in declaration dump")]
    DuplicateUsr(String),

    #[error("declaration at {loc} references unknown USR `{usr}`")]
    UnresolvedUsr { usr: String, loc: SourceLoc },
}
