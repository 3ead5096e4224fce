//! Schema rewriting errors.
use apollo_compiler::Name;
use displaydoc::Display;
use thiserror::Error;

pub use crate::config::ConfigurationError;

/// Errors raised while building or rewriting a schema graph.
///
/// These happen once, during initialization, and are not recoverable: a schema that could
/// not be rewritten consistently must not be served.
#[derive(Error, Display, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SchemaError {
    /// type '{0}' is already defined
    DuplicateType(Name),

    /// directive '@{0}' is already defined
    DuplicateDirective(Name),

    /// the schema definition is given more than once
    DuplicateSchemaDefinition,

    /// type '{0}' is not defined
    UnknownType(String),

    /// type '{name}' is not {expected}
    UnexpectedTypeKind {
        /// Name of the type that was looked up.
        name: Name,
        /// The kind of type that was expected.
        expected: &'static str,
    },

    /// could not parse schema definitions: {0}
    Parse(String),

    /// schema validation failed: {0}
    Validation(String),

    /// deferred type reference was used before it was defined
    UnresolvedDeferredType,

    /// deferred type reference is already defined as '{0}'
    AlreadyDefined(String),

    /// deferred type reference refers back to itself
    CyclicTypeReference,

    /// invalid type wrapping: {0}
    InvalidWrapping(String),

    /// field '{type_name}.{field_name}' already has an argument named '{argument}'
    ArgumentConflict {
        /// The type declaring the field.
        type_name: Name,
        /// The field that could not be augmented.
        field_name: Name,
        /// The conflicting argument name.
        argument: Name,
    },

    /// invalid configuration: {0}
    Configuration(#[from] ConfigurationError),
}

/// Errors raised while resolving a single field at request time.
///
/// A field error aborts the resolution of that field only. It never affects the schema graph.
#[derive(Error, Display, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FieldError {
    /// invalid value for argument '{argument}': {value}
    InvalidArgument {
        /// Name of the argument.
        argument: String,
        /// The rejected value, as JSON.
        value: String,
    },

    /// cannot query field '{field_name}' on type '{type_name}'
    UnknownField {
        /// The type that was queried.
        type_name: String,
        /// The missing field.
        field_name: String,
    },

    /// resolver error: {message}
    Resolver {
        /// The error message reported by the resolver.
        message: String,
    },
}

impl FieldError {
    /// Builds a resolver error from any message.
    pub fn resolver(message: impl Into<String>) -> Self {
        FieldError::Resolver {
            message: message.into(),
        }
    }

    /// The GraphQL error extension code for this error.
    pub fn extension_code(&self) -> &'static str {
        match self {
            FieldError::InvalidArgument { .. } => "INVALID_ARGUMENT",
            FieldError::UnknownField { .. } => "INVALID_FIELD",
            FieldError::Resolver { .. } => "RESOLVER_ERROR",
        }
    }
}
