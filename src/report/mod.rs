//! Hierarchical pass/fail results: suite file → test group → test case.
//!
//! Every node is built once from its children's finished results, so a
//! failure is recorded only in the subtree where it happened.

pub mod render;
pub mod tree;

pub use render::{render_json, render_text};
pub use tree::{
    CaseFailure, CaseReport, Counts, FileReport, GroupReport, NodeError, Status, Summary,
    SuiteReport,
};
