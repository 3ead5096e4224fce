use apollo_compiler::Name;
use apollo_compiler::Node;
use apollo_compiler::ast::InputValueDefinition;

use crate::error::SchemaError;
use crate::schema::ArgumentDefinition;
use crate::schema::EnumType;
use crate::schema::SchemaGraph;
use crate::transform::TextCase;

/// Registers the enumeration of [`TextCase`] modes under `enum_name`.
///
/// Must run before any field is rewritten. Fails if the name is already taken.
pub fn register_transform_enum(
    graph: &mut SchemaGraph,
    enum_name: Name,
) -> Result<(), SchemaError> {
    let definition = TextCase::ALL.into_iter().fold(
        EnumType::new(enum_name).description("Text transformation applied to a String field"),
        |definition, case| {
            let description = case.description().to_string();
            definition.value(case.value_name(), Some(description))
        },
    );
    tracing::debug!(enum_name = %definition.name, "registering text transform enum");
    graph.register(definition)?;
    Ok(())
}

/// The optional argument added to rewritten fields, typed as the registered enumeration.
pub(crate) fn transform_argument(
    graph: &SchemaGraph,
    enum_name: &Name,
    argument_name: Name,
) -> Result<ArgumentDefinition, SchemaError> {
    let enum_type = graph.get_enum(enum_name.as_str())?;
    Ok(Node::new(InputValueDefinition {
        description: Some("Transformation applied to the text value".into()),
        name: argument_name,
        ty: Node::new(graph.named_type(enum_type.name.as_str())?),
        default_value: None,
        directives: Default::default(),
    }))
}

#[cfg(test)]
mod tests {
    use apollo_compiler::name;
    use apollo_compiler::ty;

    use super::*;

    #[test]
    fn registers_three_modes() {
        let mut graph = SchemaGraph::new();
        register_transform_enum(&mut graph, name!("TextTransform")).unwrap();
        let values: Vec<_> = graph
            .get_enum("TextTransform")
            .unwrap()
            .values
            .keys()
            .map(Name::as_str)
            .collect();
        assert_eq!(values, ["UPPERCASE", "LOWERCASE", "TITLECASE"]);
    }

    #[test]
    fn registering_twice_is_rejected() {
        let mut graph = SchemaGraph::new();
        register_transform_enum(&mut graph, name!("TextTransform")).unwrap();
        insta::assert_snapshot!(
            register_transform_enum(&mut graph, name!("TextTransform")).unwrap_err(),
            @"type 'TextTransform' is already defined"
        );
    }

    #[test]
    fn argument_is_optional_and_typed_as_the_enum() {
        let mut graph = SchemaGraph::new();
        assert!(transform_argument(&graph, &name!("TextTransform"), name!("transform")).is_err());

        register_transform_enum(&mut graph, name!("TextTransform")).unwrap();
        let argument =
            transform_argument(&graph, &name!("TextTransform"), name!("transform")).unwrap();
        assert_eq!(argument.name.as_str(), "transform");
        assert_eq!(*argument.ty, ty!(TextTransform));
        assert!(!argument.ty.is_non_null());
        assert!(argument.default_value.is_none());
    }
}
