use std::fmt;
use std::sync::Arc;
use std::sync::OnceLock;

use apollo_compiler::Name;
use apollo_compiler::schema::Type;

use crate::error::SchemaError;

/// The declared output type of a field.
///
/// Unlike [`apollo_compiler::schema::Type`], non-null is a wrapper of its own and a type
/// can be a [`DeferredType`], resolved lazily for forward or circular references.
#[derive(Clone)]
pub enum OutputType {
    /// A named type
    Named(Name),
    /// Non null type
    NonNull(Box<OutputType>),
    /// List type
    List(Box<OutputType>),
    /// Deferred type reference
    Deferred(DeferredType),
}

impl OutputType {
    pub fn named(name: Name) -> Self {
        OutputType::Named(name)
    }

    pub fn non_null(self) -> Self {
        OutputType::NonNull(Box::new(self))
    }

    pub fn list(self) -> Self {
        OutputType::List(Box::new(self))
    }

    /// Converts to the apollo-compiler representation, resolving deferred references.
    ///
    /// Fails on a non-null type directly wrapping another non-null type.
    pub fn to_compiler_type(&self) -> Result<Type, SchemaError> {
        let mut seen = Vec::new();
        self.to_compiler_type_inner(&mut seen)
    }

    fn to_compiler_type_inner(&self, seen: &mut Vec<usize>) -> Result<Type, SchemaError> {
        match self {
            OutputType::Named(name) => Ok(Type::Named(name.clone())),
            OutputType::List(inner) => Ok(Type::List(Box::new(
                inner.to_compiler_type_inner(seen)?,
            ))),
            OutputType::NonNull(inner) => match inner.to_compiler_type_inner(seen)? {
                Type::Named(name) => Ok(Type::NonNullNamed(name)),
                Type::List(item) => Ok(Type::NonNullList(item)),
                ty @ (Type::NonNullNamed(_) | Type::NonNullList(_)) => Err(
                    SchemaError::InvalidWrapping(format!("non-null type wraps {ty}")),
                ),
            },
            OutputType::Deferred(deferred) => deferred.with_target(seen, |target, seen| {
                target.to_compiler_type_inner(seen)
            }),
        }
    }

    /// return the name of the innermost named type, if it can be reached
    pub fn inner_type_name(&self) -> Option<Name> {
        self.to_compiler_type()
            .ok()
            .map(|ty| ty.inner_named_type().clone())
    }
}

impl From<&'_ Type> for OutputType {
    fn from(ty: &'_ Type) -> Self {
        match ty {
            Type::Named(name) => OutputType::Named(name.clone()),
            Type::NonNullNamed(name) => OutputType::Named(name.clone()).non_null(),
            Type::List(inner) => OutputType::from(&**inner).list(),
            Type::NonNullList(inner) => OutputType::from(&**inner).list().non_null(),
        }
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputType::Named(name) => write!(f, "{name}"),
            OutputType::NonNull(inner) => write!(f, "{inner}!"),
            OutputType::List(inner) => write!(f, "[{inner}]"),
            // Printing the target could loop on a circular reference.
            OutputType::Deferred(deferred) => match deferred.0.target.get() {
                Some(OutputType::Named(name)) => write!(f, "{name}"),
                Some(_) => f.write_str("<deferred>"),
                None => f.write_str("<unresolved>"),
            },
        }
    }
}

impl fmt::Debug for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OutputType({self})")
    }
}

type Thunk = Box<dyn Fn() -> OutputType + Send + Sync>;

struct DeferredCell {
    target: OnceLock<OutputType>,
    thunk: Option<Thunk>,
}

/// A shared, lazily resolved reference to another output type.
///
/// Clones point to the same cell, so a type can be referenced before it is defined:
///
/// ```
/// # use apollo_compiler::name;
/// # use graphql_text_transform::schema::{DeferredType, OutputType};
/// let later = DeferredType::new();
/// let list = OutputType::Deferred(later.clone()).list();
/// later.define(OutputType::named(name!("String"))).unwrap();
/// assert_eq!(list.to_string(), "[String]");
/// ```
#[derive(Clone)]
pub struct DeferredType(Arc<DeferredCell>);

impl DeferredType {
    /// An empty reference, to be filled with [`DeferredType::define`].
    pub fn new() -> Self {
        DeferredType(Arc::new(DeferredCell {
            target: OnceLock::new(),
            thunk: None,
        }))
    }

    /// A reference computed on first resolution.
    pub fn from_fn(thunk: impl Fn() -> OutputType + Send + Sync + 'static) -> Self {
        DeferredType(Arc::new(DeferredCell {
            target: OnceLock::new(),
            thunk: Some(Box::new(thunk)),
        }))
    }

    pub fn define(&self, target: OutputType) -> Result<(), SchemaError> {
        self.0
            .target
            .set(target)
            .map_err(|_| SchemaError::AlreadyDefined(self.to_string()))
    }

    /// Resolves the reference to its target type.
    pub fn resolve(&self) -> Result<&OutputType, SchemaError> {
        if let Some(target) = self.0.target.get() {
            return Ok(target);
        }
        match &self.0.thunk {
            Some(thunk) => Ok(self.0.target.get_or_init(thunk)),
            None => Err(SchemaError::UnresolvedDeferredType),
        }
    }

    fn id(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }

    /// Resolves the reference and runs `f` on its target, failing if this reference is
    /// already being unwrapped further up the stack.
    pub(crate) fn with_target<T>(
        &self,
        seen: &mut Vec<usize>,
        f: impl FnOnce(&OutputType, &mut Vec<usize>) -> Result<T, SchemaError>,
    ) -> Result<T, SchemaError> {
        let id = self.id();
        if seen.contains(&id) {
            return Err(SchemaError::CyclicTypeReference);
        }
        let target = self.resolve()?;
        seen.push(id);
        let result = f(target, seen);
        seen.pop();
        result
    }
}

impl Default for DeferredType {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DeferredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        OutputType::Deferred(self.clone()).fmt(f)
    }
}

impl fmt::Debug for DeferredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeferredType({self})")
    }
}
