use jsonschema::Validator;
use serde_json::Value;
use url::Url;

use super::{Engine, Verdict};
use crate::draft::Draft;
use crate::error::{ConstructionError, RuntimeValidationError};
use crate::uri::BaseUri;

/// Engine backed by the `jsonschema` crate.
///
/// Remote documents are registered as resources under their own identifier.
/// Documents without an absolute identifier are passed in but cannot be
/// referenced.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaEngine {
    draft: Draft,
}

/// A compiled schema under test plus the documents it may reference.
pub struct CompiledSchemaSet {
    root: Validator,
    root_id: Option<String>,
    documents: Vec<(String, Value)>,
}

impl CompiledSchemaSet {
    /// Identifiers registered for cross-document resolution.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.documents.iter().map(|(id, _)| id.as_str())
    }
}

impl JsonSchemaEngine {
    pub fn new(draft: Draft) -> Self {
        Self { draft }
    }

    fn compile(
        &self,
        schema: &Value,
        documents: &[(String, Value)],
    ) -> Result<Validator, String> {
        let draft = jsonschema_draft(self.draft);
        let resources = documents
            .iter()
            .map(|(id, doc)| (id.clone(), draft.create_resource(doc.clone())));

        jsonschema::options()
            .with_draft(draft)
            .with_resources(resources)
            .build(schema)
            .map_err(|e| e.to_string())
    }

    fn identifier<'a>(&self, schema: &'a Value) -> Option<&'a str> {
        schema.get(self.draft.id_keyword()).and_then(Value::as_str)
    }
}

impl Engine for JsonSchemaEngine {
    type Validator = CompiledSchemaSet;

    fn construct(&self, schemas: &[&Value]) -> Result<CompiledSchemaSet, ConstructionError> {
        let (root, remotes) = schemas
            .split_first()
            .ok_or_else(|| ConstructionError::new("empty schema set"))?;

        let root_id = self.identifier(root);
        let mut documents = Vec::with_capacity(remotes.len());
        for remote in remotes {
            match self.identifier(remote) {
                Some(id) if Some(id) == root_id => {
                    tracing::debug!(id, "remote document shadows the schema under test; skipped");
                }
                Some(id) if Url::parse(id).is_err() => {
                    tracing::debug!(id, "remote identifier is not absolute; not registered");
                }
                Some(id) => documents.push((id.to_string(), (*remote).clone())),
                None => {}
            }
        }

        let validator = self
            .compile(root, &documents)
            .map_err(ConstructionError::new)?;

        Ok(CompiledSchemaSet {
            root: validator,
            root_id: root_id.map(str::to_string),
            documents,
        })
    }

    fn validate(
        &self,
        validator: &CompiledSchemaSet,
        base_uri: &BaseUri,
        instance: &Value,
    ) -> Result<Verdict, RuntimeValidationError> {
        let anchors_root = base_uri.is_empty()
            || validator
                .root_id
                .as_deref()
                .is_some_and(|id| base_uri.identifies(id));
        if anchors_root {
            return Ok(Verdict {
                is_valid: validator.root.is_valid(instance),
            });
        }

        // Anchored at one of the remote documents: compile it against the same set.
        let document = validator
            .documents
            .iter()
            .find(|(id, _)| base_uri.identifies(id))
            .map(|(_, doc)| doc)
            .ok_or_else(|| {
                RuntimeValidationError::new(format!(
                    "no schema identified by '{base_uri}' in the set"
                ))
            })?;

        let compiled = self.compile(document, &validator.documents).map_err(|e| {
            RuntimeValidationError::new(format!("cannot compile schema '{base_uri}': {e}"))
        })?;

        Ok(Verdict {
            is_valid: compiled.is_valid(instance),
        })
    }
}

fn jsonschema_draft(draft: Draft) -> jsonschema::Draft {
    match draft {
        Draft::Draft4 => jsonschema::Draft::Draft4,
        Draft::Draft6 => jsonschema::Draft::Draft6,
        Draft::Draft7 => jsonschema::Draft::Draft7,
        Draft::Draft201909 => jsonschema::Draft::Draft201909,
        Draft::Draft202012 => jsonschema::Draft::Draft202012,
    }
}
