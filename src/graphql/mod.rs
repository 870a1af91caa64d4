//! GraphQL layer: canonical type registry and the executable schema.
//!
//! - [`field_map`] - builders turning attribute names into field maps
//! - [`registry`] - the ten canonical object types, built once per process
//! - [`schema`] - the root `parse` query and schema assembly

pub mod field_map;
pub mod registry;
pub mod schema;

pub use registry::{TypeRegistry, canonical_types};
pub use schema::{FetchErrorMode, QUERY, build_schema};
