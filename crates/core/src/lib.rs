//! OpenAPI-style document to typed Go HTTP client generator.
//!
//! The pipeline is:
//! 1. Parse: JSON/YAML -> `Document`
//! 2. Walk: `Document` -> ordered path records (all document logic resolved)
//! 3. Resolve: component schemas -> struct records
//! 4. Render: records -> Go artifacts via embedded templates
//! 5. Finalize: concatenated buffer -> validated, normalized source unit
//!
//! Generation is single-threaded and fully sequential; emitted artifact
//! order matches document declaration order. A run either completes or
//! aborts on the first fatal error with no partial output.

mod error;
mod finalize;
mod ir;
mod render;
mod spec;

pub use error::Error;
pub use finalize::FinalizeError;
pub use ir::resolve::TypeError;
pub use ir::utils::canonicalize;
pub use ir::walk::WalkError;
pub use spec::ParseError;

use render::Renderer;
use spec::Document;

/// Generate Go client source from a raw document.
///
/// `client_name` is canonicalized before use; `invocation` is reproduced in
/// the generated `// Code generated by ...` header. A document with an
/// empty path table produces empty output.
pub fn generate(raw: &str, client_name: &str, invocation: &str) -> Result<String, Error> {
    let doc = Document::parse(raw)?;
    let client = canonicalize(client_name);

    let paths = ir::collect_paths(&doc)?;
    if paths.is_empty() {
        return Ok(String::new());
    }

    let components = ir::collect_components(&doc)?;

    let mut renderer = Renderer::new();
    renderer.client(&client, invocation)?;
    renderer.components(&components)?;
    renderer.config(&paths)?;
    for path in &paths {
        renderer.method(&client, path)?;
    }

    Ok(finalize::finalize(&renderer.into_source())?)
}
