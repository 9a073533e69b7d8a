use std::path::{Path, PathBuf};

use serde_json::Value;

use super::walk::FileWalk;
use crate::error::LoadError;

/// A document available for cross-document references but not under test.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteSchema {
    pub path: PathBuf,
    pub schema: Value,
}

/// Every remote document found under the fixture root.
///
/// Read-only once loaded; share it behind an `Arc` across sessions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemoteCollection {
    schemas: Vec<RemoteSchema>,
}

impl RemoteCollection {
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RemoteSchema> {
        self.schemas.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.schemas.iter().map(|remote| &remote.schema)
    }
}

impl FromIterator<RemoteSchema> for RemoteCollection {
    fn from_iter<I: IntoIterator<Item = RemoteSchema>>(iter: I) -> Self {
        Self {
            schemas: iter.into_iter().collect(),
        }
    }
}

/// Load every file under `root` as a JSON document.
///
/// All-or-nothing: the first unreadable entry or malformed document aborts the
/// load, since a partial reference set would change every downstream verdict.
pub fn load_remotes(root: impl AsRef<Path>) -> Result<RemoteCollection, LoadError> {
    let root = root.as_ref();
    let mut schemas = Vec::new();

    for path in FileWalk::new(root) {
        let path = path?;
        let schema = read_json(&path)?;
        schemas.push(RemoteSchema { path, schema });
    }

    tracing::debug!(root = %root.display(), count = schemas.len(), "loaded remote schemas");
    Ok(RemoteCollection { schemas })
}

pub(crate) fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Filesystem {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
