//! Fixture discovery: remote documents and suite documents on disk.

pub mod loader;
pub mod model;
pub mod remotes;
pub mod walk;

pub use loader::{load_suite_file, SuiteFiles};
pub use model::{TestCase, TestGroup, TestSuiteFile};
pub use remotes::{load_remotes, RemoteCollection, RemoteSchema};
pub use walk::FileWalk;
