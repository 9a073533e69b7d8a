//! Conformance harness for JSON Schema validators.
//!
//! Loads the remote documents and suite files of the
//! [JSON Schema Test Suite](https://github.com/json-schema-org/JSON-Schema-Test-Suite),
//! drives a validation engine through `construct` / `validate`, and reports
//! pass/fail per suite file, test group and test case.
//!
//! The harness does not interpret schemas. Any engine implementing
//! [`engine::Engine`] can be plugged in; [`engine::JsonSchemaEngine`] wraps the
//! `jsonschema` crate.

pub mod config;
pub mod draft;
pub mod engine;
pub mod error;
pub mod harness;
pub mod report;
pub mod runner;
pub mod session;
pub mod suite;
pub mod uri;
