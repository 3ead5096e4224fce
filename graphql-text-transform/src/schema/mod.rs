//! The mutable schema graph that the rewrite pass works on.
//!
//! A [`SchemaGraph`] holds named type definitions. Object fields carry an [`OutputType`], their
//! arguments and an optional [`FieldResolver`]. Once every mutation is done the graph is turned
//! into an [`ExecutableSchema`] with [`SchemaGraph::finish`].

use std::sync::Arc;

use apollo_compiler::Name;
use apollo_compiler::Node;
use apollo_compiler::ast;
use apollo_compiler::ast::DirectiveDefinition;
use apollo_compiler::ast::InputValueDefinition;
use apollo_compiler::name;
use apollo_compiler::schema::DirectiveList;
use apollo_compiler::schema::Type;
use indexmap::IndexMap;

use crate::error::SchemaError;

mod executable;
mod output_type;
mod resolver;
pub(crate) mod sdl;

pub use executable::ExecutableSchema;
pub use output_type::DeferredType;
pub use output_type::OutputType;
pub use resolver::FieldResolver;
pub use resolver::FnResolver;
pub use resolver::PropertyResolver;
pub use resolver::resolver_fn;

/// Name of the built-in text scalar.
pub const STRING: &str = "String";

const BUILT_IN_SCALARS: [&str; 5] = [STRING, "Int", "Float", "Boolean", "ID"];

/// A field argument, as declared in SDL.
pub type ArgumentDefinition = Node<InputValueDefinition>;

/// A field of an object or interface type.
#[derive(Clone)]
pub struct FieldDefinition {
    name: Name,
    pub description: Option<String>,
    pub ty: OutputType,
    pub arguments: IndexMap<Name, ArgumentDefinition>,
    pub directives: ast::DirectiveList,
    /// Data fetcher. When absent, the same-named property is read off the parent value.
    pub resolver: Option<Arc<dyn FieldResolver>>,
}

impl FieldDefinition {
    pub fn new(name: Name, ty: OutputType) -> Self {
        Self {
            name,
            description: None,
            ty,
            arguments: IndexMap::new(),
            directives: Default::default(),
            resolver: None,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn argument(mut self, argument: ArgumentDefinition) -> Self {
        self.arguments.insert(argument.name.clone(), argument);
        self
    }

    pub fn resolver(mut self, resolver: Arc<dyn FieldResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// The resolver used at execution time, falling back to [`PropertyResolver`].
    pub fn effective_resolver(&self) -> Arc<dyn FieldResolver> {
        match &self.resolver {
            Some(resolver) => resolver.clone(),
            None => Arc::new(PropertyResolver::new(self.name.clone())),
        }
    }
}

impl std::fmt::Debug for FieldDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDefinition")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("arguments", &self.arguments.keys().collect::<Vec<_>>())
            .field("resolver", &self.resolver.as_ref().map(|_| "<resolver>"))
            .finish()
    }
}

/// A concrete object type.
#[derive(Debug, Clone)]
pub struct ObjectType {
    pub name: Name,
    pub description: Option<String>,
    pub implements_interfaces: Vec<Name>,
    pub directives: DirectiveList,
    pub fields: IndexMap<Name, FieldDefinition>,
}

impl ObjectType {
    pub fn new(name: Name) -> Self {
        Self {
            name,
            description: None,
            implements_interfaces: Vec::new(),
            directives: Default::default(),
            fields: IndexMap::new(),
        }
    }

    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.insert(field.name.clone(), field);
        self
    }

    pub fn implements(mut self, interface: Name) -> Self {
        self.implements_interfaces.push(interface);
        self
    }
}

/// An abstract contract: its fields are never resolved directly.
#[derive(Debug, Clone)]
pub struct InterfaceType {
    pub name: Name,
    pub description: Option<String>,
    pub implements_interfaces: Vec<Name>,
    pub directives: DirectiveList,
    pub fields: IndexMap<Name, FieldDefinition>,
}

#[derive(Debug, Clone)]
pub struct UnionType {
    pub name: Name,
    pub description: Option<String>,
    pub directives: DirectiveList,
    pub members: Vec<Name>,
}

#[derive(Debug, Clone)]
pub struct EnumValueDefinition {
    pub description: Option<String>,
    pub directives: ast::DirectiveList,
}

#[derive(Debug, Clone)]
pub struct EnumType {
    pub name: Name,
    pub description: Option<String>,
    pub directives: DirectiveList,
    pub values: IndexMap<Name, EnumValueDefinition>,
}

impl EnumType {
    pub fn new(name: Name) -> Self {
        Self {
            name,
            description: None,
            directives: Default::default(),
            values: IndexMap::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn value(mut self, value: Name, description: Option<String>) -> Self {
        let definition = EnumValueDefinition {
            description,
            directives: Default::default(),
        };
        self.values.insert(value, definition);
        self
    }
}

#[derive(Debug, Clone)]
pub struct ScalarType {
    pub name: Name,
    pub description: Option<String>,
    pub directives: DirectiveList,
}

#[derive(Debug, Clone)]
pub struct InputObjectType {
    pub name: Name,
    pub description: Option<String>,
    pub directives: DirectiveList,
    pub fields: IndexMap<Name, ArgumentDefinition>,
}

/// A named type definition of the schema graph.
#[derive(Debug, Clone)]
pub enum TypeDefinition {
    Scalar(ScalarType),
    Object(ObjectType),
    Interface(InterfaceType),
    Union(UnionType),
    Enum(EnumType),
    InputObject(InputObjectType),
}

impl TypeDefinition {
    pub fn name(&self) -> &Name {
        match self {
            TypeDefinition::Scalar(ty) => &ty.name,
            TypeDefinition::Object(ty) => &ty.name,
            TypeDefinition::Interface(ty) => &ty.name,
            TypeDefinition::Union(ty) => &ty.name,
            TypeDefinition::Enum(ty) => &ty.name,
            TypeDefinition::InputObject(ty) => &ty.name,
        }
    }

    pub fn is_built_in(&self) -> bool {
        matches!(self, TypeDefinition::Scalar(ty) if BUILT_IN_SCALARS.contains(&ty.name.as_str()))
    }
}

macro_rules! impl_from_definition {
    ($($variant: ident($ty: ty)),*) => {
        $(
            impl From<$ty> for TypeDefinition {
                fn from(ty: $ty) -> Self {
                    TypeDefinition::$variant(ty)
                }
            }
        )*
    };
}

impl_from_definition!(
    Scalar(ScalarType),
    Object(ObjectType),
    Interface(InterfaceType),
    Union(UnionType),
    Enum(EnumType),
    InputObject(InputObjectType)
);

/// Names of the root operation types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootOperations {
    pub query: Option<Name>,
    pub mutation: Option<Name>,
    pub subscription: Option<Name>,
}

impl RootOperations {
    /// The object types named `Query`, `Mutation` and `Subscription`, when present.
    fn by_convention(types: &IndexMap<Name, TypeDefinition>) -> Self {
        let root = |name: Name| match types.get(&name) {
            Some(TypeDefinition::Object(_)) => Some(name),
            _ => None,
        };
        Self {
            query: root(name!("Query")),
            mutation: root(name!("Mutation")),
            subscription: root(name!("Subscription")),
        }
    }
}

/// A mutable collection of named type definitions.
#[derive(Debug, Clone)]
pub struct SchemaGraph {
    types: IndexMap<Name, TypeDefinition>,
    directive_definitions: IndexMap<Name, Node<DirectiveDefinition>>,
    roots: Option<RootOperations>,
}

impl Default for SchemaGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaGraph {
    /// A graph holding only the built-in scalars.
    pub fn new() -> Self {
        let types: IndexMap<Name, TypeDefinition> = [
            name!("String"),
            name!("Int"),
            name!("Float"),
            name!("Boolean"),
            name!("ID"),
        ]
        .into_iter()
        .map(|name| {
            let scalar = ScalarType {
                name: name.clone(),
                description: None,
                directives: Default::default(),
            };
            (name, TypeDefinition::Scalar(scalar))
        })
        .collect();
        Self {
            types,
            directive_definitions: IndexMap::new(),
            roots: None,
        }
    }

    /// Builds a graph from GraphQL SDL. Fields start without resolvers.
    pub fn parse(sdl: &str) -> Result<Self, SchemaError> {
        let mut graph = Self::new();
        graph.register_sdl(sdl)?;
        Ok(graph)
    }

    /// Registers a new named type definition and returns a reference to it.
    pub fn register(&mut self, definition: impl Into<TypeDefinition>) -> Result<Type, SchemaError> {
        let definition = definition.into();
        let name = definition.name().clone();
        if self.types.contains_key(&name) {
            return Err(SchemaError::DuplicateType(name));
        }
        tracing::trace!(type_name = %name, "registering type");
        self.types.insert(name.clone(), definition);
        Ok(Type::Named(name))
    }

    /// Registers a custom directive definition.
    pub fn register_directive(
        &mut self,
        definition: Node<DirectiveDefinition>,
    ) -> Result<(), SchemaError> {
        if self.directive_definitions.contains_key(&definition.name) {
            return Err(SchemaError::DuplicateDirective(definition.name.clone()));
        }
        tracing::trace!(directive_name = %definition.name, "registering directive");
        self.directive_definitions.insert(definition.name.clone(), definition);
        Ok(())
    }

    /// Registers every type and directive defined in a fragment of GraphQL SDL.
    ///
    /// A `schema { ... }` definition in the fragment sets the root operation types; it may only
    /// be given once per graph. Returns the names of the registered types, in definition order.
    pub fn register_sdl(&mut self, sdl: &str) -> Result<Vec<Name>, SchemaError> {
        let definitions = sdl::parse_definitions(sdl)?;
        if let Some(roots) = definitions.roots {
            if self.roots.is_some() {
                return Err(SchemaError::DuplicateSchemaDefinition);
            }
            self.roots = Some(roots);
        }
        for directive in definitions.directives {
            self.register_directive(directive)?;
        }
        definitions
            .types
            .into_iter()
            .map(|definition| {
                let name = definition.name().clone();
                self.register(definition)?;
                Ok::<_, SchemaError>(name)
            })
            .collect()
    }

    /// Retrieves a reference to a previously registered type.
    pub fn named_type(&self, name: &str) -> Result<Type, SchemaError> {
        self.types
            .get_key_value(name)
            .map(|(name, _)| Type::Named(name.clone()))
            .ok_or_else(|| SchemaError::UnknownType(name.to_string()))
    }

    pub fn get_type(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    pub fn get_enum(&self, name: &str) -> Result<&EnumType, SchemaError> {
        match self.types.get(name) {
            Some(TypeDefinition::Enum(ty)) => Ok(ty),
            Some(ty) => Err(SchemaError::UnexpectedTypeKind {
                name: ty.name().clone(),
                expected: "an enum type",
            }),
            None => Err(SchemaError::UnknownType(name.to_string())),
        }
    }

    pub fn get_object(&self, name: &str) -> Option<&ObjectType> {
        match self.types.get(name) {
            Some(TypeDefinition::Object(ty)) => Some(ty),
            _ => None,
        }
    }

    pub fn get_object_mut(&mut self, name: &str) -> Option<&mut ObjectType> {
        match self.types.get_mut(name) {
            Some(TypeDefinition::Object(ty)) => Some(ty),
            _ => None,
        }
    }

    /// Explicitly set root operation types.
    ///
    /// When none are set, `finish` uses the object types named `Query`, `Mutation` and
    /// `Subscription`.
    pub fn roots(&self) -> Option<&RootOperations> {
        self.roots.as_ref()
    }

    pub fn set_roots(&mut self, roots: RootOperations) {
        self.roots = Some(roots);
    }

    /// The root operation types `finish` will declare.
    pub(crate) fn effective_roots(&self) -> RootOperations {
        match &self.roots {
            Some(roots) => roots.clone(),
            None => RootOperations::by_convention(&self.types),
        }
    }

    /// Custom directive definitions. Built-in directives are always available.
    pub fn directive_definitions(&self) -> impl Iterator<Item = &Node<DirectiveDefinition>> {
        self.directive_definitions.values()
    }

    /// All type definitions, built-in scalars included.
    pub fn types(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.types.values()
    }

    /// Concrete object types only. Interfaces, unions, enums and scalars are skipped.
    pub fn objects_mut(&mut self) -> impl Iterator<Item = &mut ObjectType> {
        self.types.values_mut().filter_map(|ty| match ty {
            TypeDefinition::Object(object) => Some(object),
            _ => None,
        })
    }

    /// Validates the graph and freezes it into an executable schema.
    pub fn finish(self) -> Result<ExecutableSchema, SchemaError> {
        ExecutableSchema::new(self)
    }

    pub(crate) fn into_types(self) -> IndexMap<Name, TypeDefinition> {
        self.types
    }
}
