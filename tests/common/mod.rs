//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use jsonschema_conformance::engine::{Engine, Verdict};
use jsonschema_conformance::error::{ConstructionError, RuntimeValidationError};
use jsonschema_conformance::uri::BaseUri;
use serde_json::{json, Value};

/// Write `value` as pretty JSON at `root/rel`, creating parent directories.
pub fn write_json(root: &Path, rel: &str, value: &Value) {
    write_raw(root, rel, &serde_json::to_string_pretty(value).unwrap());
}

pub fn write_raw(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A suite document with one group over `{"type": "integer"}`.
pub fn integer_suite() -> Value {
    json!([
        {
            "description": "integer type",
            "schema": { "type": "integer" },
            "tests": [
                { "description": "an integer is valid", "data": 5, "valid": true },
                { "description": "a string is invalid", "data": "x", "valid": false }
            ]
        }
    ])
}

/// Engine whose behaviour is scripted by marker keywords in the schema.
///
/// - `"x-reject": true` in the schema under test fails construction
/// - `"x-valid": <bool>` fixes the verdict (default `true`)
/// - the instance `"boom"` makes validation itself fail
#[derive(Default)]
pub struct ScriptedEngine {
    pub constructed: AtomicUsize,
    pub validated: AtomicUsize,
    pub base_uris: Mutex<Vec<String>>,
    pub schema_counts: Mutex<Vec<usize>>,
}

impl Engine for ScriptedEngine {
    type Validator = Value;

    fn construct(&self, schemas: &[&Value]) -> Result<Value, ConstructionError> {
        self.constructed.fetch_add(1, Ordering::SeqCst);
        self.schema_counts.lock().unwrap().push(schemas.len());

        let root = schemas[0];
        if root.get("x-reject").and_then(Value::as_bool) == Some(true) {
            return Err(ConstructionError::new("schema rejected by script"));
        }
        Ok(root.clone())
    }

    fn validate(
        &self,
        validator: &Value,
        base_uri: &BaseUri,
        instance: &Value,
    ) -> Result<Verdict, RuntimeValidationError> {
        self.validated.fetch_add(1, Ordering::SeqCst);
        self.base_uris.lock().unwrap().push(base_uri.to_string());

        if instance == &json!("boom") {
            return Err(RuntimeValidationError::new("scripted engine failure"));
        }
        let is_valid = validator
            .get("x-valid")
            .and_then(Value::as_bool)
            .unwrap_or(true);
        Ok(Verdict { is_valid })
    }
}
