use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the depot library.
///
/// Commands wrap these in `anyhow` for display; tests match on the variants.
#[derive(Debug, Error)]
pub enum DepotError {
    #[error("invalid {kind} name '{name}': only letters, digits, '_' and '-' are allowed")]
    InvalidName { kind: &'static str, name: String },

    #[error("{kind} '{name}' already exists")]
    DuplicateName { kind: &'static str, name: String },

    #[error("template not found: {}", .0.display())]
    TemplateMissing(PathBuf),

    #[error("editor '{0}' not found on PATH")]
    LauncherNotFound(String),

    #[error("no editor is associated with {}", .0.display())]
    UnsupportedFile(PathBuf),

    #[error("unknown asset type '{0}'")]
    UnknownAssetType(String),

    #[error("project '{0}' is not registered")]
    UnknownProject(String),

    #[error("asset '{name}' is not registered in project '{project}'")]
    UnknownAsset { project: String, name: String },

    #[error("{0} assets must reference exactly one asset")]
    ReferenceRequired(String),

    #[error("{0} assets cannot carry a reference")]
    ReferenceNotAllowed(String),

    #[error("registry {} is corrupt: {source}", .path.display())]
    RegistryCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("filesystem error at {}: {source}", .path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DepotError {
    pub(crate) fn fs(path: impl Into<PathBuf>, source: io::Error) -> Self {
        DepotError::FileSystem {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, DepotError>;
