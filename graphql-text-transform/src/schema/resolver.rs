use std::future::Future;
use std::sync::Arc;

use apollo_compiler::Name;
use serde_json_bytes::Value;

use crate::error::FieldError;

/// Abstraction for field data fetchers.
///
/// `parent` is the resolved value of the object the field belongs to, `arguments` the
/// coerced field arguments (normally a JSON object).
#[async_trait::async_trait]
pub trait FieldResolver: Send + Sync {
    async fn resolve(&self, parent: &Value, arguments: &Value) -> Result<Value, FieldError>;
}

/// The resolver used by fields that don't declare one: reads the same-named property off
/// the parent value.
#[derive(Debug, Clone)]
pub struct PropertyResolver {
    property: Name,
}

impl PropertyResolver {
    pub fn new(property: Name) -> Self {
        Self { property }
    }

    fn read(&self, parent: &Value) -> Value {
        match parent {
            Value::Object(object) => object
                .get(self.property.as_str())
                .cloned()
                .unwrap_or(Value::Null),
            _ => Value::Null,
        }
    }
}

#[async_trait::async_trait]
impl FieldResolver for PropertyResolver {
    async fn resolve(&self, parent: &Value, _arguments: &Value) -> Result<Value, FieldError> {
        Ok(self.read(parent))
    }
}

/// Wraps an async closure taking `(parent, arguments)`.
pub struct FnResolver<F>(F);

#[async_trait::async_trait]
impl<F, Fut> FieldResolver for FnResolver<F>
where
    F: Fn(Value, Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, FieldError>> + Send + 'static,
{
    async fn resolve(&self, parent: &Value, arguments: &Value) -> Result<Value, FieldError> {
        (self.0)(parent.clone(), arguments.clone()).await
    }
}

/// Builds a shared resolver from an async closure.
///
/// ```
/// # use graphql_text_transform::FieldError;
/// # use graphql_text_transform::schema::resolver_fn;
/// # use serde_json_bytes::json;
/// let resolver = resolver_fn(|_parent, _arguments| async { Ok::<_, FieldError>(json!("hello")) });
/// ```
pub fn resolver_fn<F, Fut>(f: F) -> Arc<dyn FieldResolver>
where
    F: Fn(Value, Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, FieldError>> + Send + 'static,
{
    Arc::new(FnResolver(f))
}
