//! Intermediate records between the document model and emission.
//!
//! - `api`: rendering records (paths, parameters, components, properties)
//! - `walk`: document walker, path table -> ordered `Path` records
//! - `resolve`: schema type resolver, schema nodes -> type descriptors
//! - `utils`: identifier canonicalizer and reference resolver

pub mod api;
pub mod resolve;
pub mod utils;
pub mod walk;

pub use resolve::collect_components;
pub use walk::collect_paths;
