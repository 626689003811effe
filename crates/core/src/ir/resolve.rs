//! Schema type resolution: schema nodes -> Go type descriptors.
//!
//! Resolution is recover-with-fallback wherever a safe fallback exists: a
//! missing reference synthesizes a name, an unrecognized kind maps to `any`.
//! Only the cases with no safe fallback (an array item with no declared
//! kind, a nested array) are errors.

use thiserror::Error;
use tracing::warn;

use crate::error::Error;
use crate::ir::api::{Component, Property};
use crate::ir::utils::{canonicalize, resolve_reference};
use crate::spec::{Document, Schema};

/// A schema shape with no safe fallback type.
#[derive(Debug, Error)]
pub enum TypeError {
    #[error("array property {key:?} has no item kind")]
    MissingItemType { key: String },

    #[error("array property {key:?} nests another array")]
    NestedArray { key: String },
}

/// Resolve a schema node to a type descriptor string.
///
/// `parent_name` is the enclosing schema's canonical name (empty for
/// operation-scoped inline bodies); object and array-of-object nodes without
/// a reference synthesize `parent_name + canonicalize(key)`.
pub fn resolve_type(node: &Schema, parent_name: &str, key: &str) -> Result<String, TypeError> {
    match node.kind.as_deref() {
        Some("integer") => Ok("int64".to_string()),
        Some("string") => Ok("string".to_string()),
        Some("boolean") => Ok("bool".to_string()),
        Some("number") => Ok("float64".to_string()),
        Some("object") => Ok(object_name(node, parent_name, key)),
        Some("array") => {
            let item = node
                .items
                .as_deref()
                .ok_or_else(|| TypeError::MissingItemType { key: key.to_string() })?;
            Ok(format!("[]{}", resolve_item_type(item, parent_name, key)?))
        }
        Some(_) => Ok("any".to_string()),
        // A bare reference carries no kind; anything else is unresolved.
        None => match &node.reference {
            Some(_) => Ok(object_name(node, parent_name, key)),
            None => Ok("any".to_string()),
        },
    }
}

/// Resolve an array's item schema. Recursion is one level deep: object items
/// follow the reference/fallback rule, nested arrays are not supported.
fn resolve_item_type(item: &Schema, parent_name: &str, key: &str) -> Result<String, TypeError> {
    match item.kind.as_deref() {
        Some("integer") => Ok("int64".to_string()),
        Some("string") => Ok("string".to_string()),
        Some("boolean") => Ok("bool".to_string()),
        Some("number") => Ok("float64".to_string()),
        Some("object") => Ok(object_name(item, parent_name, key)),
        Some("array") => Err(TypeError::NestedArray { key: key.to_string() }),
        Some(_) => Ok("any".to_string()),
        None => match &item.reference {
            Some(_) => Ok(object_name(item, parent_name, key)),
            None => Err(TypeError::MissingItemType { key: key.to_string() }),
        },
    }
}

fn object_name(node: &Schema, parent_name: &str, key: &str) -> String {
    let fallback = format!("{parent_name}{}", canonicalize(key));
    resolve_reference(node.reference.as_deref(), &fallback)
}

/// Collect the ordered property descriptors of an object schema.
///
/// Property order follows the schema's declared order; a property's tag
/// omits `,omitempty` iff its key is in the parent's `required` list.
pub fn collect_properties(schema: &Schema, parent_name: &str) -> Result<Vec<Property>, TypeError> {
    let Some(properties) = &schema.properties else {
        return Ok(Vec::new());
    };

    let required = schema.required.as_deref().unwrap_or_default();

    let mut result = Vec::with_capacity(properties.len());
    for (key, node) in properties {
        let ty = resolve_type(node, parent_name, key)?;

        let tag = if required.iter().any(|name| name == key) {
            key.clone()
        } else {
            format!("{key},omitempty")
        };

        result.push(Property {
            name: canonicalize(key),
            ty,
            tag,
        });
    }

    Ok(result)
}

/// Collect object-shaped component schemas in declaration order.
///
/// A schema with no declared kind is logged and excluded; non-object kinds
/// are skipped without logging.
pub fn collect_components(doc: &Document) -> Result<Vec<Component>, Error> {
    let Some(schemas) = doc.components.as_ref().and_then(|c| c.schemas.as_ref()) else {
        return Ok(Vec::new());
    };

    let mut result = Vec::new();
    for (name, schema) in schemas {
        let Some(kind) = schema.kind.as_deref() else {
            warn!(schema = %name, "schema has no declared kind; skipping");
            continue;
        };

        if kind != "object" {
            continue;
        }

        let properties = collect_properties(schema, name).map_err(|source| Error::Schema {
            name: name.clone(),
            source,
        })?;

        result.push(Component {
            name: name.clone(),
            properties,
        });
    }

    Ok(result)
}
