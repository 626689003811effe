//! API-description document structs for serde deserialization.
//!
//! This module defines the minimal subset of an OpenAPI-style document the
//! pipeline consumes: the ordered path table, the ordered component-schema
//! table, and per-operation parameters, request body, and responses. All
//! tables are `IndexMap`s so declaration order survives parsing; emitted
//! artifact order depends on it.

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

/// The raw document text could not be deserialized.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

/// Root document.
#[derive(Debug, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
    pub components: Option<Components>,
}

/// Components section containing reusable named schemas.
#[derive(Debug, Deserialize)]
pub struct Components {
    pub schemas: Option<IndexMap<String, Schema>>,
}

/// One URL template with its per-method operations.
#[derive(Debug, Deserialize)]
pub struct PathItem {
    pub get: Option<Operation>,
    pub head: Option<Operation>,
    pub put: Option<Operation>,
    pub post: Option<Operation>,
    pub delete: Option<Operation>,
}

/// A single method+path operation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    pub request_body: Option<RequestBody>,
    #[serde(default)]
    pub responses: IndexMap<String, Response>,
}

/// A parameter (header, query, or another location the pipeline ignores).
#[derive(Debug, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: String,
    #[serde(default)]
    pub required: bool,
}

/// A request body definition.
#[derive(Debug, Deserialize)]
pub struct RequestBody {
    #[serde(default)]
    pub required: bool,
    pub content: Option<IndexMap<String, MediaType>>,
}

/// A response definition, keyed by status-code string in the operation.
#[derive(Debug, Deserialize)]
pub struct Response {
    pub content: Option<IndexMap<String, MediaType>>,
}

/// Media type content (e.g. application/json).
#[derive(Debug, Deserialize)]
pub struct MediaType {
    pub schema: Option<Schema>,
}

/// A schema node: primitive, object, or array.
#[derive(Debug, Clone, Deserialize)]
pub struct Schema {
    /// Declared kind (integer, string, boolean, number, object, array).
    #[serde(rename = "type")]
    pub kind: Option<String>,

    /// Reference to a named component schema.
    #[serde(rename = "$ref")]
    pub reference: Option<String>,

    /// Ordered properties for object kinds.
    pub properties: Option<IndexMap<String, Schema>>,

    /// Required property keys for object kinds.
    pub required: Option<Vec<String>>,

    /// Item schema for array kinds.
    pub items: Option<Box<Schema>>,
}

impl Document {
    /// Parse a document from raw JSON or YAML text.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        if raw.trim_start().starts_with('{') {
            Ok(serde_json::from_str(raw)?)
        } else {
            Ok(serde_yaml::from_str(raw)?)
        }
    }
}

impl Schema {
    /// The schema attached to this node's `application/json` media type
    /// entry, if the content table has one.
    pub(crate) fn json_schema(content: Option<&IndexMap<String, MediaType>>) -> Option<&Schema> {
        content
            .and_then(|media| media.get("application/json"))
            .and_then(|media| media.schema.as_ref())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_json_documents() {
        let doc = Document::parse(
            r#"{
  "paths": {
    "/api/v1/messages": {
      "get": { "responses": {} }
    }
  },
  "components": { "schemas": { "Message": { "type": "object" } } }
}"#,
        )
        .unwrap();

        assert_eq!(doc.paths.len(), 1);
        assert!(doc.paths["/api/v1/messages"].get.is_some());
        let components = doc.components.unwrap();
        assert!(components.schemas.unwrap().contains_key("Message"));
    }

    #[test]
    fn parses_yaml_documents() {
        let doc = Document::parse(
            "paths:\n  /ping:\n    get:\n      responses: {}\n",
        )
        .unwrap();

        assert!(doc.paths["/ping"].get.is_some());
    }

    #[test]
    fn preserves_path_declaration_order() {
        let doc = Document::parse(
            r#"{
  "paths": {
    "/zebra": {},
    "/apple": {},
    "/mango": {}
  }
}"#,
        )
        .unwrap();

        let urls: Vec<_> = doc.paths.keys().collect();
        assert_eq!(urls, ["/zebra", "/apple", "/mango"]);
    }

    #[test]
    fn parse_error_keeps_the_serde_source() {
        let err = Document::parse("{ not json").unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));

        let wrapped = crate::error::Error::from(err);
        assert!(wrapped.to_string().contains("could not parse"));
        assert!(std::error::Error::source(&wrapped).is_some());
    }
}
