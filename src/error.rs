//! Error types for pvreplace
//!
//! Usage errors abort before any processing. Everything else is reported
//! and the current unit of work is skipped.

use thiserror::Error;

use crate::models::{PartKind, SubstitutionKind};

/// Main error type for pvreplace operations
#[derive(Error, Debug)]
pub enum PvError {
    /// Conflicting or misplaced command-line flags
    #[error(transparent)]
    Usage(#[from] UsageError),

    /// Unsupported or unknown fuzzing settings
    #[error(transparent)]
    Fuzz(#[from] FuzzError),

    /// A file that had to be read could not be
    #[error("error opening {what} {path}: {source}")]
    Read {
        what: &'static str,
        path: String,
        source: std::io::Error,
    },

    /// A file or directory that had to be created could not be
    #[error("error creating {what} {path}: {source}")]
    Create {
        what: &'static str,
        path: String,
        source: std::io::Error,
    },

    /// An output artifact could not be written
    #[error("error writing output file {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    /// Malformed YAML configuration
    #[error("error parsing config file {path}: {source}")]
    Config {
        path: String,
        source: serde_yaml::Error,
    },

    /// Directory given to -raw holds no files
    #[error("no files found in directory: {0}")]
    EmptyDirectory(String),

    /// Remote asset could not be fetched
    #[error("error downloading {asset}: {source}")]
    Download {
        asset: String,
        source: reqwest::Error,
    },

    /// Remote asset host answered with something other than 200
    #[error("error downloading {asset}: HTTP {status}")]
    DownloadStatus { asset: String, status: u16 },

    #[error("could not determine home directory")]
    NoHomeDir,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Flag validation failures
#[derive(Error, Debug, PartialEq, Eq)]
pub enum UsageError {
    #[error("-ignore-lines flag can only be used with -raw flag")]
    IgnoreLinesWithoutRaw,

    #[error("-output flag can only be used with -raw flag")]
    OutputWithoutRaw,

    #[error("-config flag cannot be used with {} flags", .0.join(", "))]
    ConfigWithFuzzingFlags(Vec<String>),
}

/// Per-combination fuzzing failures
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FuzzError {
    #[error("invalid fuzzing part: {0}")]
    UnknownPart(String),

    #[error("invalid fuzzing type: {0}")]
    UnknownType(String),

    #[error("invalid fuzzing mode: {0}")]
    UnknownMode(String),

    #[error("invalid fuzzing type: {kind} ({part} only supports replace)")]
    UnsupportedType { part: PartKind, kind: SubstitutionKind },

    #[error("you cannot use -fuzzing-mode single with -fuzzing-part {0}")]
    SingleModeUnsupported(PartKind),
}

pub type Result<T> = std::result::Result<T, PvError>;
