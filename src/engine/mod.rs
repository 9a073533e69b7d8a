//! Boundary to the validation engine under test.
//!
//! The harness never interprets schemas itself. It hands the engine a schema
//! set, asks for a verdict on an instance, and compares that verdict with the
//! expectation recorded in the suite.

pub mod native;

pub use native::{CompiledSchemaSet, JsonSchemaEngine};

use serde_json::Value;

use crate::error::{ConstructionError, RuntimeValidationError};
use crate::uri::BaseUri;

/// Outcome of a successful validation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub is_valid: bool,
}

/// A JSON Schema implementation driven by the harness.
pub trait Engine: Send + Sync {
    type Validator: Send + Sync;

    /// Build a validator over `schemas`.
    ///
    /// `schemas[0]` is the schema under test; the rest are remote documents
    /// available for cross-document references.
    fn construct(&self, schemas: &[&Value]) -> Result<Self::Validator, ConstructionError>;

    /// Validate `instance` against the schema identified by `base_uri`.
    ///
    /// An empty `base_uri` selects the schema under test.
    fn validate(
        &self,
        validator: &Self::Validator,
        base_uri: &BaseUri,
        instance: &Value,
    ) -> Result<Verdict, RuntimeValidationError>;
}
