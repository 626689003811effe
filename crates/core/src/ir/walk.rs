//! Document walker: the ordered path table -> ordered `Path` records.

use thiserror::Error;

use crate::error::Error;
use crate::ir::api::{Method, Parameter, Path, Request, RequestBody, Response, ResponseCode};
use crate::ir::utils::{canonicalize, resolve_reference};
use crate::spec::{Document, Operation, PathItem, Schema};

/// Success responses are modeled below this status; everything at or above
/// is dropped (error bodies are not modeled).
const STATUS_BAD_REQUEST: u16 = 400;

/// A fatal condition while collecting one method+path pair.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("invalid status code {code:?}: {source}")]
    InvalidStatusCode {
        code: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("success response {code} has no application/json schema")]
    MissingResponseSchema { code: u16 },
}

impl PathItem {
    fn operations(&self) -> impl Iterator<Item = (Method, &Operation)> {
        [
            (Method::Get, self.get.as_ref()),
            (Method::Head, self.head.as_ref()),
            (Method::Put, self.put.as_ref()),
            (Method::Post, self.post.as_ref()),
            (Method::Delete, self.delete.as_ref()),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.map(|op| (method, op)))
    }
}

/// Walk the path table in declaration order and build one record per
/// present method. Returns the complete ordered list or the first fatal
/// error, wrapped with the offending path and method.
pub fn collect_paths(doc: &Document) -> Result<Vec<Path>, Error> {
    let mut result = Vec::new();

    for (url, item) in &doc.paths {
        for (method, op) in item.operations() {
            let path = build_path(url, method, op).map_err(|source| Error::CollectPath {
                method: method.as_str(),
                url: url.clone(),
                source,
            })?;

            result.push(path);
        }
    }

    Ok(result)
}

fn build_path(url: &str, method: Method, op: &Operation) -> Result<Path, WalkError> {
    let canonical_name = format!("{}{}", method.as_str(), canonicalize(url));

    let (headers, query) = collect_params(op);
    let body = collect_request_body(&canonical_name, op);
    let codes = collect_response_codes(&canonical_name, op)?;

    Ok(Path {
        request: Request {
            name: format!("{canonical_name}Request"),
            headers,
            query,
            body,
        },
        response: Response {
            name: format!("{canonical_name}Response"),
            codes,
        },
        canonical_name,
        url: url.to_string(),
        method,
    })
}

/// Split parameters into header and query groups; any other location is
/// silently ignored.
fn collect_params(op: &Operation) -> (Vec<Parameter>, Vec<Parameter>) {
    let mut headers = Vec::new();
    let mut query = Vec::new();

    for param in &op.parameters {
        let parameter = Parameter {
            name: canonicalize(&param.name),
            key: param.name.clone(),
            required: param.required,
        };

        match param.location.as_str() {
            "header" => headers.push(parameter),
            "query" => query.push(parameter),
            _ => {}
        }
    }

    (headers, query)
}

fn collect_request_body(canonical_name: &str, op: &Operation) -> Option<RequestBody> {
    let body = op.request_body.as_ref()?;

    let fallback = format!("{canonical_name}RequestBody");
    let name = Schema::json_schema(body.content.as_ref()).map_or_else(
        || fallback.clone(),
        |schema| resolve_reference(schema.reference.as_deref(), &fallback),
    );

    Some(RequestBody {
        name,
        required: body.required,
    })
}

/// Collect retained success codes in declaration order. A non-numeric
/// status key is fatal; a success status without a JSON body schema is a
/// document defect, also fatal.
fn collect_response_codes(
    canonical_name: &str,
    op: &Operation,
) -> Result<Vec<ResponseCode>, WalkError> {
    let mut result = Vec::with_capacity(op.responses.len());

    for (key, response) in &op.responses {
        let code: u16 = key.parse().map_err(|source| WalkError::InvalidStatusCode {
            code: key.clone(),
            source,
        })?;

        if code >= STATUS_BAD_REQUEST {
            continue;
        }

        let schema = Schema::json_schema(response.content.as_ref())
            .ok_or(WalkError::MissingResponseSchema { code })?;

        let fallback = format!("{canonical_name}ResponseBody{code}");
        result.push(ResponseCode {
            code,
            name: resolve_reference(schema.reference.as_deref(), &fallback),
        });
    }

    Ok(result)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn document(raw: &str) -> Document {
        serde_json::from_str(raw).unwrap()
    }

    const MESSAGES_DOC: &str = r##"{
  "paths": {
    "/api/v1/messages": {
      "get": {
        "parameters": [
          { "name": "User-Agent", "in": "header", "required": true },
          { "name": "limit", "in": "query", "required": true },
          { "name": "sender_id", "in": "query" },
          { "name": "session", "in": "cookie" }
        ],
        "responses": {
          "200": {
            "content": {
              "application/json": {
                "schema": { "$ref": "#/components/schemas/MessagesResponseBody" }
              }
            }
          },
          "404": {
            "content": {
              "application/json": {
                "schema": { "$ref": "#/components/schemas/NotFound" }
              }
            }
          }
        }
      }
    }
  }
}"##;

    #[test]
    fn collects_a_get_path() {
        let paths = collect_paths(&document(MESSAGES_DOC)).unwrap();
        assert_eq!(paths.len(), 1);

        let path = &paths[0];
        assert_eq!(path.canonical_name, "GETApiV1Messages");
        assert_eq!(path.url, "/api/v1/messages");
        assert_eq!(path.method.as_str(), "GET");
        assert_eq!(path.request.name, "GETApiV1MessagesRequest");
        assert_eq!(path.response.name, "GETApiV1MessagesResponse");
    }

    #[test]
    fn splits_parameters_and_ignores_unsupported_locations() {
        let paths = collect_paths(&document(MESSAGES_DOC)).unwrap();
        let request = &paths[0].request;

        assert_eq!(request.headers.len(), 1);
        assert_eq!(request.headers[0].name, "UserAgent");
        assert_eq!(request.headers[0].key, "User-Agent");
        assert!(request.headers[0].required);

        assert_eq!(request.query.len(), 2);
        assert_eq!(request.query[0].name, "Limit");
        assert_eq!(request.query[1].name, "SenderId");
        assert!(!request.query[1].required);
    }

    #[test]
    fn drops_error_status_codes() {
        let paths = collect_paths(&document(MESSAGES_DOC)).unwrap();
        let codes = &paths[0].response.codes;

        assert_eq!(codes.len(), 1);
        assert_eq!(codes[0].code, 200);
        assert_eq!(codes[0].name, "MessagesResponseBody");
    }

    #[test]
    fn request_body_uses_reference_or_fallback() {
        let doc = document(
            r##"{
  "paths": {
    "/message": {
      "post": {
        "requestBody": {
          "required": true,
          "content": {
            "application/json": {
              "schema": { "$ref": "#/components/schemas/MessageRequestBody" }
            }
          }
        },
        "responses": {}
      }
    },
    "/note": {
      "post": {
        "requestBody": { "required": false },
        "responses": {}
      }
    }
  }
}"##,
        );

        let paths = collect_paths(&doc).unwrap();

        let message = paths[0].request.body.as_ref().unwrap();
        assert_eq!(message.name, "MessageRequestBody");
        assert!(message.required);

        let note = paths[1].request.body.as_ref().unwrap();
        assert_eq!(note.name, "POSTNoteRequestBody");
        assert!(!note.required);
    }

    #[test]
    fn non_numeric_status_code_is_fatal() {
        let doc = document(
            r#"{
  "paths": {
    "/ping": {
      "get": {
        "responses": { "2XX": { "content": {} } }
      }
    }
  }
}"#,
        );

        let err = collect_paths(&doc).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("GET"));
        assert!(message.contains("/ping"));
        assert!(message.contains("2XX"));
    }

    #[test]
    fn success_response_without_body_schema_is_fatal() {
        let doc = document(
            r#"{
  "paths": {
    "/ping": {
      "get": {
        "responses": { "204": {} }
      }
    }
  }
}"#,
        );

        let err = collect_paths(&doc).unwrap_err();
        assert!(err.to_string().contains("204"));
    }

    #[test]
    fn visits_methods_in_fixed_order() {
        let doc = document(
            r#"{
  "paths": {
    "/thing": {
      "delete": { "responses": {} },
      "post": { "responses": {} },
      "get": { "responses": {} },
      "put": { "responses": {} },
      "head": { "responses": {} }
    }
  }
}"#,
        );

        let methods: Vec<_> = collect_paths(&doc)
            .unwrap()
            .into_iter()
            .map(|p| p.method.as_str())
            .collect();
        assert_eq!(methods, ["GET", "HEAD", "PUT", "POST", "DELETE"]);
    }

    #[test]
    fn preserves_path_declaration_order() {
        let doc = document(
            r#"{
  "paths": {
    "/zebra": { "get": { "responses": {} } },
    "/apple": { "get": { "responses": {} } }
  }
}"#,
        );

        let names: Vec<_> = collect_paths(&doc)
            .unwrap()
            .into_iter()
            .map(|p| p.canonical_name)
            .collect();
        assert_eq!(names, ["GETZebra", "GETApple"]);
    }
}
