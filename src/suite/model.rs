use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One `{ description, schema, tests }` entry of a suite document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestGroup {
    pub description: String,
    pub schema: Value,
    pub tests: Vec<TestCase>,
}

/// A single instance paired with its expected verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub description: String,
    pub data: Value,
    pub valid: bool,
}

/// All groups loaded from one suite document, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct TestSuiteFile {
    pub path: PathBuf,
    pub groups: Vec<TestGroup>,
}
