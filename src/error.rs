use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Category of a failure, attached to the report node where it occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Filesystem,
    Parse,
    Construction,
    UriParse,
    RuntimeValidation,
    AssertionMismatch,
    Internal,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Filesystem => "filesystem",
            Self::Parse => "parse",
            Self::Construction => "construction",
            Self::UriParse => "uri_parse",
            Self::RuntimeValidation => "runtime_validation",
            Self::AssertionMismatch => "assertion_mismatch",
            Self::Internal => "internal",
        }
    }
}

/// Failure to enumerate, read, or parse a fixture or suite document.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot access '{}': {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Filesystem { .. } => ErrorKind::Filesystem,
            Self::Parse { .. } => ErrorKind::Parse,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Filesystem { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}

/// The engine rejected the combined schema set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("validator construction failed: {reason}")]
pub struct ConstructionError {
    pub reason: String,
}

impl ConstructionError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

/// The engine itself failed while validating an instance.
///
/// Distinct from an `invalid` verdict, which is a successful validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("validation engine error: {reason}")]
pub struct RuntimeValidationError {
    pub reason: String,
}

impl RuntimeValidationError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

/// The schema's identifier field could not be turned into a base URI.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UriParseError {
    #[error("identifier field '{keyword}' is not a string")]
    NotAString { keyword: String },
    #[error("identifier '{id}' is not a valid URI: {source}")]
    Invalid {
        id: String,
        #[source]
        source: url::ParseError,
    },
    #[error("identifier '{id}' is not a URI reference: {reason}")]
    Malformed { id: String, reason: String },
}

/// Anything that stops a test group from running its cases.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GroupError {
    #[error(transparent)]
    Construction(#[from] ConstructionError),
    #[error(transparent)]
    BaseUri(#[from] UriParseError),
}

impl GroupError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Construction(_) => ErrorKind::Construction,
            Self::BaseUri(_) => ErrorKind::UriParse,
        }
    }
}
