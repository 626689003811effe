//! Top-level error type for a generation run.
//!
//! Each pipeline layer wraps its failure exactly once with the identity of
//! the offending path, schema, or artifact; resolution-level fallbacks never
//! surface here.

use thiserror::Error;

use crate::finalize::FinalizeError;
use crate::ir::resolve::TypeError;
use crate::ir::walk::WalkError;
use crate::spec::ParseError;

/// A fatal generation failure. No partial output is produced.
#[derive(Debug, Error)]
pub enum Error {
    /// The raw document could not be deserialized.
    #[error("could not parse document: {0}")]
    Parse(#[from] ParseError),

    /// A path-table entry could not be collected.
    #[error("could not collect {method} {url}: {source}")]
    CollectPath {
        method: &'static str,
        url: String,
        #[source]
        source: WalkError,
    },

    /// A component schema could not be resolved.
    #[error("could not resolve schema {name:?}: {source}")]
    Schema {
        name: String,
        #[source]
        source: TypeError,
    },

    /// A single artifact failed to render.
    #[error("could not render {artifact}: {source}")]
    Render {
        artifact: String,
        #[source]
        source: tera::Error,
    },

    /// The concatenated output is not a valid source unit.
    #[error("could not finalize source: {0}")]
    Finalize(#[from] FinalizeError),
}
