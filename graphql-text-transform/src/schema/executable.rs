use std::sync::Arc;

use apollo_compiler::Name;
use apollo_compiler::Schema;
use apollo_compiler::validation::Valid;
use indexmap::IndexMap;
use serde_json_bytes::Value;

use super::FieldDefinition;
use super::SchemaGraph;
use super::TypeDefinition;
use super::sdl;
use crate::error::FieldError;
use crate::error::SchemaError;

/// A validated, immutable schema whose fields can be resolved.
///
/// Cloning is cheap; clones share the type definitions and their resolvers.
#[derive(Clone)]
pub struct ExecutableSchema {
    inner: Arc<Inner>,
}

struct Inner {
    types: IndexMap<Name, TypeDefinition>,
    schema: Valid<Schema>,
}

impl ExecutableSchema {
    pub(crate) fn new(graph: SchemaGraph) -> Result<Self, SchemaError> {
        let schema = sdl::to_compiler_schema(&graph)?
            .validate()
            .map_err(|invalid| SchemaError::Validation(invalid.errors.to_string()))?;
        let types = graph.into_types();
        tracing::debug!(types = types.len(), "schema finalized");
        Ok(Self {
            inner: Arc::new(Inner { types, schema }),
        })
    }

    /// The validated apollo-compiler schema.
    pub fn schema(&self) -> &Valid<Schema> {
        &self.inner.schema
    }

    /// The schema printed as SDL.
    pub fn sdl(&self) -> String {
        self.inner.schema.to_string()
    }

    pub fn get_type(&self, name: &str) -> Option<&TypeDefinition> {
        self.inner.types.get(name)
    }

    pub fn field(&self, type_name: &str, field_name: &str) -> Option<&FieldDefinition> {
        match self.inner.types.get(type_name) {
            Some(TypeDefinition::Object(object)) => object.fields.get(field_name),
            _ => None,
        }
    }

    /// Runs the data fetcher of an object field.
    pub async fn resolve_field(
        &self,
        type_name: &str,
        field_name: &str,
        parent: &Value,
        arguments: &Value,
    ) -> Result<Value, FieldError> {
        let field = self
            .field(type_name, field_name)
            .ok_or_else(|| FieldError::UnknownField {
                type_name: type_name.to_string(),
                field_name: field_name.to_string(),
            })?;
        field.effective_resolver().resolve(parent, arguments).await
    }
}

impl std::fmt::Debug for ExecutableSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutableSchema")
            .field("types", &self.inner.types.keys().collect::<Vec<_>>())
            .finish()
    }
}
