//! Error types for detector construction.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the geometry registry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("a solid named '{0}' is already registered")]
    DuplicateSolid(String),

    #[error("a logical volume named '{0}' is already registered")]
    DuplicateLogicalVolume(String),

    #[error("a different material named '{0}' is already registered")]
    ConflictingMaterial(String),

    #[error("logical volume '{volume}' references unknown {kind} '{target}'")]
    DanglingReference {
        volume: String,
        kind: &'static str,
        target: String,
    },
}

/// Errors raised while building an HPGe detector.
#[derive(Error, Debug)]
pub enum HpgeError {
    #[error("the enrichment in the metadata is not set and no material was given")]
    MissingEnrichment,

    #[error("the name of the detector in the metadata is not set and no name was given")]
    MissingName,

    #[error("unknown detector type: {0:?}")]
    UnknownDetectorType(Option<String>),

    #[error("failed to read metadata file: {path}")]
    MetadataRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse detector metadata")]
    MetadataParse {
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid profile for detector '{name}': {reason}")]
    InvalidProfile { name: String, reason: String },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

pub type Result<T> = std::result::Result<T, HpgeError>;
