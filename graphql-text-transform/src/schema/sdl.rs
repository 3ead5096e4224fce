//! Conversions between the schema graph and apollo-compiler schemas.

use apollo_compiler::Name;
use apollo_compiler::Node;
use apollo_compiler::Schema;
use apollo_compiler::ast;
use apollo_compiler::schema as compiler;
use apollo_compiler::schema::Component;
use apollo_compiler::schema::ComponentName;
use apollo_compiler::schema::ExtendedType;
use indexmap::IndexMap;

use super::EnumType;
use super::EnumValueDefinition;
use super::FieldDefinition;
use super::InputObjectType;
use super::InterfaceType;
use super::ObjectType;
use super::OutputType;
use super::RootOperations;
use super::ScalarType;
use super::SchemaGraph;
use super::TypeDefinition;
use super::UnionType;
use crate::error::SchemaError;

/// Definitions read out of a fragment of SDL.
pub(crate) struct Definitions {
    pub(crate) types: Vec<TypeDefinition>,
    pub(crate) directives: Vec<Node<ast::DirectiveDefinition>>,
    /// Only set when the fragment has a `schema { ... }` definition.
    pub(crate) roots: Option<RootOperations>,
}

/// Parses type and directive definitions out of GraphQL SDL, skipping built-in ones.
///
/// Definitions are not validated: they may reference types registered separately.
pub(crate) fn parse_definitions(sdl: &str) -> Result<Definitions, SchemaError> {
    let document = ast::Document::parse(sdl, "definitions.graphql")
        .map_err(|invalid| SchemaError::Parse(invalid.errors.to_string()))?;
    let has_schema_definition = document
        .definitions
        .iter()
        .any(|definition| matches!(definition, ast::Definition::SchemaDefinition(_)));
    let schema = document
        .to_schema()
        .map_err(|invalid| SchemaError::Parse(invalid.errors.to_string()))?;

    let roots = has_schema_definition.then(|| {
        let root = |name: &Option<ComponentName>| name.as_ref().map(|root| root.name.clone());
        RootOperations {
            query: root(&schema.schema_definition.query),
            mutation: root(&schema.schema_definition.mutation),
            subscription: root(&schema.schema_definition.subscription),
        }
    });
    let built_in = Schema::new();
    let directives = schema
        .directive_definitions
        .iter()
        .filter(|(name, _)| !built_in.directive_definitions.contains_key(*name))
        .map(|(_, definition)| definition.clone())
        .collect();
    let types = schema
        .types
        .values()
        .filter(|ty| !ty.is_built_in())
        .map(definition_from_extended_type)
        .collect();
    Ok(Definitions {
        types,
        directives,
        roots,
    })
}

fn description(description: &Option<Node<str>>) -> Option<String> {
    description.as_ref().map(|d| d.to_string())
}

fn fields_from<'a>(
    fields: impl Iterator<Item = &'a Component<ast::FieldDefinition>>,
) -> IndexMap<Name, FieldDefinition> {
    fields
        .map(|field| {
            let ty = OutputType::from(&field.ty);
            let mut definition = FieldDefinition::new(field.name.clone(), ty);
            definition.description = description(&field.description);
            definition.directives = field.directives.clone();
            definition.arguments = field
                .arguments
                .iter()
                .map(|argument| (argument.name.clone(), argument.clone()))
                .collect();
            (field.name.clone(), definition)
        })
        .collect()
}

fn definition_from_extended_type(ty: &ExtendedType) -> TypeDefinition {
    match ty {
        ExtendedType::Scalar(scalar) => TypeDefinition::Scalar(ScalarType {
            name: scalar.name.clone(),
            description: description(&scalar.description),
            directives: scalar.directives.clone(),
        }),
        ExtendedType::Object(object) => TypeDefinition::Object(ObjectType {
            name: object.name.clone(),
            description: description(&object.description),
            implements_interfaces: object
                .implements_interfaces
                .iter()
                .map(|itf| itf.name.clone())
                .collect(),
            directives: object.directives.clone(),
            fields: fields_from(object.fields.values()),
        }),
        ExtendedType::Interface(interface) => TypeDefinition::Interface(InterfaceType {
            name: interface.name.clone(),
            description: description(&interface.description),
            implements_interfaces: interface
                .implements_interfaces
                .iter()
                .map(|itf| itf.name.clone())
                .collect(),
            directives: interface.directives.clone(),
            fields: fields_from(interface.fields.values()),
        }),
        ExtendedType::Union(union_) => TypeDefinition::Union(UnionType {
            name: union_.name.clone(),
            description: description(&union_.description),
            directives: union_.directives.clone(),
            members: union_.members.iter().map(|m| m.name.clone()).collect(),
        }),
        ExtendedType::Enum(enum_) => TypeDefinition::Enum(EnumType {
            name: enum_.name.clone(),
            description: description(&enum_.description),
            directives: enum_.directives.clone(),
            values: enum_
                .values
                .iter()
                .map(|(name, value)| {
                    let value = EnumValueDefinition {
                        description: description(&value.description),
                        directives: value.directives.clone(),
                    };
                    (name.clone(), value)
                })
                .collect(),
        }),
        ExtendedType::InputObject(input) => TypeDefinition::InputObject(InputObjectType {
            name: input.name.clone(),
            description: description(&input.description),
            directives: input.directives.clone(),
            fields: input
                .fields
                .iter()
                .map(|(name, field)| (name.clone(), field.node.clone()))
                .collect(),
        }),
    }
}

fn description_node(description: &Option<String>) -> Option<Node<str>> {
    description.as_deref().map(Node::from)
}

fn compiler_field(
    (name, field): (&Name, &FieldDefinition),
) -> Result<(Name, Component<ast::FieldDefinition>), SchemaError> {
    let definition = Component::new(ast::FieldDefinition {
        description: description_node(&field.description),
        name: field.name().clone(),
        arguments: field.arguments.values().cloned().collect(),
        ty: field.ty.to_compiler_type()?,
        directives: field.directives.clone(),
    });
    Ok((name.clone(), definition))
}

fn extended_type(definition: &TypeDefinition) -> Result<ExtendedType, SchemaError> {
    Ok(match definition {
        TypeDefinition::Scalar(scalar) => ExtendedType::Scalar(Node::new(compiler::ScalarType {
            description: description_node(&scalar.description),
            name: scalar.name.clone(),
            directives: scalar.directives.clone(),
        })),
        TypeDefinition::Object(object) => ExtendedType::Object(Node::new(compiler::ObjectType {
            description: description_node(&object.description),
            name: object.name.clone(),
            implements_interfaces: object
                .implements_interfaces
                .iter()
                .cloned()
                .map(ComponentName::from)
                .collect(),
            directives: object.directives.clone(),
            fields: object
                .fields
                .iter()
                .map(compiler_field)
                .collect::<Result<_, _>>()?,
        })),
        TypeDefinition::Interface(interface) => {
            ExtendedType::Interface(Node::new(compiler::InterfaceType {
                description: description_node(&interface.description),
                name: interface.name.clone(),
                implements_interfaces: interface
                    .implements_interfaces
                    .iter()
                    .cloned()
                    .map(ComponentName::from)
                    .collect(),
                directives: interface.directives.clone(),
                fields: interface
                    .fields
                    .iter()
                    .map(compiler_field)
                    .collect::<Result<_, _>>()?,
            }))
        }
        TypeDefinition::Union(union_) => ExtendedType::Union(Node::new(compiler::UnionType {
            description: description_node(&union_.description),
            name: union_.name.clone(),
            directives: union_.directives.clone(),
            members: union_
                .members
                .iter()
                .cloned()
                .map(ComponentName::from)
                .collect(),
        })),
        TypeDefinition::Enum(enum_) => ExtendedType::Enum(Node::new(compiler::EnumType {
            description: description_node(&enum_.description),
            name: enum_.name.clone(),
            directives: enum_.directives.clone(),
            values: enum_
                .values
                .iter()
                .map(|(name, value)| {
                    let value = Component::new(compiler::EnumValueDefinition {
                        description: description_node(&value.description),
                        value: name.clone(),
                        directives: value.directives.clone(),
                    });
                    (name.clone(), value)
                })
                .collect(),
        })),
        TypeDefinition::InputObject(input) => {
            ExtendedType::InputObject(Node::new(compiler::InputObjectType {
                description: description_node(&input.description),
                name: input.name.clone(),
                directives: input.directives.clone(),
                fields: input
                    .fields
                    .iter()
                    .map(|(name, field)| (name.clone(), Component::new((**field).clone())))
                    .collect(),
            }))
        }
    })
}

/// Builds an (unvalidated) apollo-compiler schema out of the graph.
///
/// Root operation types are the ones set on the graph, or else the object types named `Query`,
/// `Mutation` and `Subscription`.
pub(crate) fn to_compiler_schema(graph: &SchemaGraph) -> Result<Schema, SchemaError> {
    let mut schema = Schema::new();
    for definition in graph.directive_definitions.values() {
        schema
            .directive_definitions
            .insert(definition.name.clone(), definition.clone());
    }
    for definition in graph.types.values().filter(|ty| !ty.is_built_in()) {
        schema
            .types
            .insert(definition.name().clone(), extended_type(definition)?);
    }

    let roots = graph.effective_roots();
    let root_definitions = schema.schema_definition.make_mut();
    root_definitions.query = roots.query.map(ComponentName::from);
    root_definitions.mutation = roots.mutation.map(ComponentName::from);
    root_definitions.subscription = roots.subscription.map(ComponentName::from);
    Ok(schema)
}
