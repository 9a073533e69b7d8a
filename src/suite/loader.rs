use std::path::{Path, PathBuf};

use super::model::{TestGroup, TestSuiteFile};
use super::remotes::read_json;
use super::walk::FileWalk;
use crate::error::LoadError;

/// Lazily parsed suite documents, one file per item.
///
/// A file that cannot be read or parsed yields an error carrying its path, so
/// the failure stays attached to that file and the walk continues.
#[derive(Debug)]
pub struct SuiteFiles {
    walk: FileWalk,
}

impl SuiteFiles {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            walk: FileWalk::new(root),
        }
    }

    /// Enumerate the files without parsing them.
    pub fn paths(self) -> impl Iterator<Item = Result<PathBuf, LoadError>> {
        self.walk
    }
}

impl Iterator for SuiteFiles {
    type Item = Result<TestSuiteFile, LoadError>;

    fn next(&mut self) -> Option<Self::Item> {
        let path = match self.walk.next()? {
            Ok(path) => path,
            Err(e) => return Some(Err(e)),
        };
        Some(load_suite_file(&path))
    }
}

/// Parse one suite document into its ordered test groups.
pub fn load_suite_file(path: &Path) -> Result<TestSuiteFile, LoadError> {
    let groups: Vec<TestGroup> = read_json(path)?;
    tracing::debug!(path = %path.display(), groups = groups.len(), "loaded suite file");
    Ok(TestSuiteFile {
        path: path.to_path_buf(),
        groups,
    })
}
