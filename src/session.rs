use serde_json::Value;

use crate::draft::Draft;
use crate::engine::{Engine, Verdict};
use crate::error::{GroupError, RuntimeValidationError};
use crate::suite::{RemoteCollection, TestGroup};
use crate::uri::BaseUri;

/// A validator scoped to one test group's schema plus the remote documents.
///
/// Lives for the duration of the group's cases and is then dropped.
pub struct ValidationSession<'a, E: Engine> {
    engine: &'a E,
    validator: E::Validator,
    base_uri: BaseUri,
}

impl<'a, E: Engine> ValidationSession<'a, E> {
    /// Construct the validator for `group` and derive its base URI.
    ///
    /// The schema under test goes first, followed by the remotes in load order.
    pub fn build(
        engine: &'a E,
        group: &TestGroup,
        remotes: &RemoteCollection,
        draft: Draft,
    ) -> Result<Self, GroupError> {
        let mut schemas: Vec<&Value> = Vec::with_capacity(remotes.len() + 1);
        schemas.push(&group.schema);
        schemas.extend(remotes.values());

        let validator = engine.construct(&schemas)?;
        let base_uri = BaseUri::for_schema(&group.schema, draft)?;

        Ok(Self {
            engine,
            validator,
            base_uri,
        })
    }

    pub fn base_uri(&self) -> &BaseUri {
        &self.base_uri
    }

    pub fn validator(&self) -> &E::Validator {
        &self.validator
    }

    /// Ask the engine for a verdict on `instance`, anchored at the base URI.
    pub fn validate(&self, instance: &Value) -> Result<Verdict, RuntimeValidationError> {
        self.engine
            .validate(&self.validator, &self.base_uri, instance)
    }
}
