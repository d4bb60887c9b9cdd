//! Workspace schema loading and caching.
//!
//! The schema for a workspace is described by its GraphQL config, extended
//! with Relay's client directives, and cached per workspace root by
//! [`SchemaCache`]. Consumers receive an `Arc<Schema>` snapshot and never
//! observe a later refresh mid-computation.

mod cache;
mod directives;
mod error;
mod loader;

pub use cache::SchemaCache;
pub use directives::RELAY_DIRECTIVES;
pub use error::{Result, SchemaError};
pub use loader::{build_schema, ConfigSchemaLoader, SchemaLoader};
