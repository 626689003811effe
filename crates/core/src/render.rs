//! Emission assembler: resolved records -> rendered Go artifacts.
//!
//! Templates are embedded and parsed once into a process-wide immutable
//! singleton. Rendering appends to an internal buffer; any render failure
//! aborts the run with the artifact identity.

use std::sync::LazyLock;

use tera::{Context, Tera};

use crate::error::Error;
use crate::ir::api::{Component, Path};

// Embedded templates are parsed exactly once; a parse failure here is a
// packaging defect covered by `templates_parse`.
#[allow(clippy::expect_used)]
static TEMPLATES: LazyLock<Tera> = LazyLock::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("client", include_str!("../templates/client.tera")),
        ("components", include_str!("../templates/components.tera")),
        ("config", include_str!("../templates/config.tera")),
        ("request", include_str!("../templates/request.tera")),
    ])
    .expect("embedded templates must parse");
    tera
});

/// Accumulates rendered artifacts in emission order.
#[derive(Debug, Default)]
pub struct Renderer {
    buf: String,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the client shell once.
    pub fn client(&mut self, client: &str, invocation: &str) -> Result<(), Error> {
        let mut context = Context::new();
        context.insert("client", client);
        context.insert("package", &client.to_lowercase());
        context.insert("invocation", invocation);

        self.render("client", "client".to_string(), &context)
    }

    /// Render one struct per object component schema, in declaration order.
    pub fn components(&mut self, components: &[Component]) -> Result<(), Error> {
        for component in components {
            let mut context = Context::new();
            context.insert("name", &component.name);
            context.insert("properties", &component.properties);

            self.render(
                "components",
                format!("component {}", component.name),
                &context,
            )?;
        }

        Ok(())
    }

    /// Render the aggregated per-operation configuration list.
    pub fn config(&mut self, paths: &[Path]) -> Result<(), Error> {
        let mut context = Context::new();
        context.insert("paths", paths);

        self.render("config", "config".to_string(), &context)
    }

    /// Render the request type, response type, and method for one path.
    pub fn method(&mut self, client: &str, path: &Path) -> Result<(), Error> {
        let mut context = Context::new();
        context.insert("client", client);
        context.insert("path", path);

        self.render("request", format!("method {}", path.canonical_name), &context)
    }

    fn render(&mut self, template: &str, artifact: String, context: &Context) -> Result<(), Error> {
        let rendered = TEMPLATES
            .render(template, context)
            .map_err(|source| Error::Render { artifact, source })?;

        self.buf.push_str(&rendered);
        self.buf.push('\n');

        Ok(())
    }

    pub fn into_source(self) -> String {
        self.buf
    }
}
