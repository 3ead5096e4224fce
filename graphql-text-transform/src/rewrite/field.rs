use std::sync::Arc;

use apollo_compiler::Name;
use serde_json_bytes::Value;

use crate::error::FieldError;
use crate::error::SchemaError;
use crate::schema::ArgumentDefinition;
use crate::schema::FieldDefinition;
use crate::schema::FieldResolver;
use crate::transform::Transform;
use crate::transform::build_transform;

/// The data fetcher of a rewritten field: the original resolver followed by the transform.
pub struct TransformingResolver {
    original: Arc<dyn FieldResolver>,
    transform: Transform,
    argument: Name,
}

impl TransformingResolver {
    pub fn new(original: Arc<dyn FieldResolver>, transform: Transform, argument: Name) -> Self {
        Self {
            original,
            transform,
            argument,
        }
    }

    /// The caller-supplied mode. `null` counts as absent, as do non-object arguments.
    fn mode<'a>(&self, arguments: &'a Value) -> Option<&'a Value> {
        arguments
            .as_object()
            .and_then(|arguments| arguments.get(self.argument.as_str()))
            .filter(|mode| !mode.is_null())
    }
}

#[async_trait::async_trait]
impl FieldResolver for TransformingResolver {
    async fn resolve(&self, parent: &Value, arguments: &Value) -> Result<Value, FieldError> {
        let value = self.original.resolve(parent, arguments).await?;
        self.transform.apply(value, self.mode(arguments))
    }
}

/// Adds the transform argument to one field and wraps its resolver.
///
/// Returns `Ok(false)` and leaves the field untouched when its type is not text.
pub(crate) fn rewrite_field(
    type_name: &Name,
    field: &mut FieldDefinition,
    argument: &ArgumentDefinition,
) -> Result<bool, SchemaError> {
    let Some(transform) = build_transform(&field.ty, &argument.name)? else {
        tracing::trace!(
            type_name = %type_name,
            field_name = %field.name(),
            ty = %field.ty,
            "skipping non-text field"
        );
        return Ok(false);
    };
    if field.arguments.contains_key(&argument.name) {
        return Err(SchemaError::ArgumentConflict {
            type_name: type_name.clone(),
            field_name: field.name().clone(),
            argument: argument.name.clone(),
        });
    }

    let original = field.effective_resolver();
    field.arguments.insert(argument.name.clone(), argument.clone());
    field.resolver = Some(Arc::new(TransformingResolver::new(
        original,
        transform,
        argument.name.clone(),
    )));
    tracing::debug!(
        type_name = %type_name,
        field_name = %field.name(),
        ty = %field.ty,
        "added text transform"
    );
    Ok(true)
}
