//! Rendering records produced by the walker and the schema resolver.
//!
//! These are the template inputs: everything here serializes into a
//! `tera::Context`. Construction happens fresh per generation run; nothing
//! is cached across runs.

use serde::{Serialize, Serializer};

/// Supported HTTP methods, in the order operations are visited per path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
    Put,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl Serialize for Method {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One collected method+path pair.
#[derive(Debug, Clone, Serialize)]
pub struct Path {
    /// `Method + Canonicalize(url)`, e.g. `GETApiV1Messages`. Assumed unique;
    /// collisions are a caller-visible defect and are not deduplicated.
    pub canonical_name: String,
    pub url: String,
    pub method: Method,

    pub request: Request,
    pub response: Response,
}

/// Request side of a path record.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    pub name: String,
    pub headers: Vec<Parameter>,
    pub query: Vec<Parameter>,
    pub body: Option<RequestBody>,
}

/// A header or query parameter.
#[derive(Debug, Clone, Serialize)]
pub struct Parameter {
    /// Canonical field name.
    pub name: String,
    /// Raw wire key.
    pub key: String,
    pub required: bool,
}

/// Request body descriptor: a referenced or synthesized type name.
#[derive(Debug, Clone, Serialize)]
pub struct RequestBody {
    pub name: String,
    pub required: bool,
}

/// Response side of a path record.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    pub name: String,
    pub codes: Vec<ResponseCode>,
}

/// A retained success status code and its body type name.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseCode {
    pub code: u16,
    pub name: String,
}

/// An object-shaped component schema ready for struct emission.
#[derive(Debug, Clone, Serialize)]
pub struct Component {
    pub name: String,
    pub properties: Vec<Property>,
}

/// One resolved object property.
#[derive(Debug, Clone, Serialize)]
pub struct Property {
    /// Canonical field name.
    pub name: String,
    /// Resolved target type string.
    pub ty: String,
    /// Serialization tag: `key` or `key,omitempty`.
    pub tag: String,
}
