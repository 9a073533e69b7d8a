use std::path::{Path, PathBuf};

use crate::error::LoadError;

/// Depth-first enumeration of the regular files under a root directory.
///
/// Directories are visited lazily and their entries in file-name order, so
/// two walks over the same tree yield the same sequence. A directory that
/// cannot be listed yields a single `Err` and the walk moves on. Symlinks to
/// files are yielded; symlinks to directories below the root are not followed.
#[derive(Debug)]
pub struct FileWalk {
    root: Option<PathBuf>,
    // Pending entries, reversed so that `pop` returns the next one in order.
    pending: Vec<PathBuf>,
}

impl FileWalk {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: Some(root.as_ref().to_path_buf()),
            pending: Vec::new(),
        }
    }

    fn expand(&mut self, dir: &Path) -> Result<(), LoadError> {
        let filesystem = |source| LoadError::Filesystem {
            path: dir.to_path_buf(),
            source,
        };

        let mut children = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(filesystem)? {
            children.push(entry.map_err(filesystem)?.path());
        }

        children.sort_by(|a, b| b.file_name().cmp(&a.file_name()));
        self.pending.extend(children);
        Ok(())
    }
}

impl Iterator for FileWalk {
    type Item = Result<PathBuf, LoadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.root.take() {
            match std::fs::metadata(&root) {
                Ok(meta) if meta.is_dir() => {
                    if let Err(e) = self.expand(&root) {
                        return Some(Err(e));
                    }
                }
                Ok(_) => return Some(Ok(root)),
                Err(source) => return Some(Err(LoadError::Filesystem { path: root, source })),
            }
        }

        while let Some(path) = self.pending.pop() {
            let meta = match std::fs::symlink_metadata(&path) {
                Ok(meta) => meta,
                Err(source) => return Some(Err(LoadError::Filesystem { path, source })),
            };

            if meta.file_type().is_symlink() {
                if std::fs::metadata(&path).is_ok_and(|target| target.is_dir()) {
                    tracing::debug!(path = %path.display(), "not following directory symlink");
                    continue;
                }
                return Some(Ok(path));
            }

            if !meta.is_dir() {
                return Some(Ok(path));
            }

            if let Err(e) = self.expand(&path) {
                return Some(Err(e));
            }
        }
        None
    }
}
