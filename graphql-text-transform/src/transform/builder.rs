use apollo_compiler::Name;

use super::Transform;
use crate::error::SchemaError;
use crate::schema::OutputType;
use crate::schema::STRING;

/// Builds the transform for a field's output type.
///
/// Returns `Ok(None)` when the innermost type, once non-null, list and deferred wrappers are
/// removed, is not `String`: such a field cannot be transformed. Each wrapper layer is
/// analyzed once here; the returned [`Transform`] only walks the resolved value.
///
/// Fails when a deferred reference is undefined or refers back to itself.
pub fn build_transform(ty: &OutputType, argument: &Name) -> Result<Option<Transform>, SchemaError> {
    let mut seen = Vec::new();
    build(ty, argument, &mut seen)
}

fn build(
    ty: &OutputType,
    argument: &Name,
    seen: &mut Vec<usize>,
) -> Result<Option<Transform>, SchemaError> {
    match ty {
        OutputType::Named(name) if name.as_str() == STRING => {
            Ok(Some(Transform::text(argument.clone())))
        }
        OutputType::Named(_) => Ok(None),
        OutputType::NonNull(inner) => build(inner, argument, seen),
        OutputType::List(inner) => Ok(build(inner, argument, seen)?.map(Transform::list)),
        OutputType::Deferred(deferred) => {
            deferred.with_target(seen, |target, seen| build(target, argument, seen))
        }
    }
}
