//! Text casing for GraphQL schemas.
//!
//! [`rewrite_schema`] walks a [`SchemaGraph`](schema::SchemaGraph) once, before it is served.
//! Every object field whose type terminates in `String`, through any combination of non-null,
//! list and deferred wrappers, gains an optional `transform: TextTransform` argument. Its resolver
//! is wrapped so that the resolved value is upper-cased, lower-cased or title-cased on request.
//!
//! ```
//! use graphql_text_transform::Configuration;
//! use graphql_text_transform::rewrite_schema;
//! use graphql_text_transform::schema::SchemaGraph;
//!
//! let mut graph = SchemaGraph::parse("type Query { greeting: String }").unwrap();
//! let report = rewrite_schema(&mut graph, &Configuration::default()).unwrap();
//! assert_eq!(report.augmented.len(), 1);
//!
//! let schema = graph.finish().unwrap();
//! assert!(schema.sdl().contains("enum TextTransform"));
//! let greeting = schema.field("Query", "greeting").unwrap();
//! assert!(greeting.arguments.contains_key("transform"));
//! ```

#![warn(unreachable_pub)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::panic))]

pub mod config;
pub mod error;
pub mod rewrite;
pub mod schema;
pub mod transform;

pub use crate::config::Configuration;
pub use crate::error::FieldError;
pub use crate::error::SchemaError;
pub use crate::rewrite::RewriteReport;
pub use crate::rewrite::rewrite_schema;
pub use crate::transform::TextCase;
pub use crate::transform::Transform;
pub use crate::transform::build_transform;
