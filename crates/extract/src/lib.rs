//! Locate GraphQL regions embedded in host documents.
//!
//! - [`extract_sources`] finds every region in a document
//! - [`select_operation_at`] picks the region under a cursor
//! - [`mapping`] converts positions between host and region space

mod extractor;
mod line_index;
pub mod mapping;
mod scanner;
mod source;

pub use extractor::{extract_sources, select_operation_at, select_source};
pub use line_index::LineIndex;
pub use mapping::{normalize_selection, to_host_space, to_region_space, RegionLocator};
pub use source::GraphQLSource;

// Re-export types from relay-types for convenience
pub use relay_types::{Language, Position, Range, RegionPosition};
