//! The one-time rewrite pass over a schema graph.
//!
//! Registers the transform enumeration, then visits every field of every concrete object type.
//! Fields whose output type terminates in `String` gain an optional transform argument and have
//! their resolver wrapped in a [`TransformingResolver`]. Every other field is left untouched.

use apollo_compiler::Name;

use crate::config::Configuration;
use crate::error::SchemaError;
use crate::schema::SchemaGraph;

pub mod enum_injector;
mod field;

pub use field::TransformingResolver;

/// What a rewrite pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteReport {
    /// Coordinates of the fields that gained the transform argument, as `(type, field)`.
    pub augmented: Vec<(Name, Name)>,
    /// Number of object fields left untouched.
    pub skipped: usize,
}

/// Rewrites every text field of the graph in place.
///
/// Any error is fatal: the graph may be partially rewritten and must not be served.
/// Running the pass twice on the same graph fails with [`SchemaError::DuplicateType`].
#[tracing::instrument(skip_all)]
pub fn rewrite_schema(
    graph: &mut SchemaGraph,
    config: &Configuration,
) -> Result<RewriteReport, SchemaError> {
    if !config.enabled {
        tracing::debug!("text transform disabled, leaving schema untouched");
        return Ok(RewriteReport::default());
    }
    let enum_name = config.enum_name()?;
    let argument_name = config.argument_name()?;

    enum_injector::register_transform_enum(graph, enum_name.clone())?;
    let argument = enum_injector::transform_argument(graph, &enum_name, argument_name)?;

    let mut report = RewriteReport::default();
    for object in graph.objects_mut() {
        for field in object.fields.values_mut() {
            if field::rewrite_field(&object.name, field, &argument)? {
                report.augmented.push((object.name.clone(), field.name().clone()));
            } else {
                report.skipped += 1;
            }
        }
    }
    tracing::info!(
        augmented = report.augmented.len(),
        skipped = report.skipped,
        enum_name = %enum_name,
        "text transform applied"
    );
    Ok(report)
}
