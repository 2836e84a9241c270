//! Merged action parameters.
//!
//! Query string first, then the request body on top (body wins on conflicts).
//! Body parsing itself is delegated to axum's `Json` / `Form` extractors, so their
//! rejections (malformed JSON, body too large, ...) keep their own status codes.

use std::collections::HashMap;

use axum::{
    Form, Json,
    extract::{FromRequest, Query, Request},
    http::header,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};

pub struct Params(pub Map<String, Value>);

impl Params {
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

enum BodyKind {
    Json,
    Form,
    Other,
}

fn body_kind(req: &Request) -> BodyKind {
    let Some(content_type) = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return BodyKind::Other;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if essence == "application/json" || essence.ends_with("+json") {
        BodyKind::Json
    } else if essence == "application/x-www-form-urlencoded" {
        BodyKind::Form
    } else {
        BodyKind::Other
    }
}

impl<S> FromRequest<S> for Params
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut params = Map::new();

        if req.uri().query().is_some() {
            let Query(query) = Query::<HashMap<String, String>>::try_from_uri(req.uri())
                .map_err(IntoResponse::into_response)?;
            params.extend(query.into_iter().map(|(k, v)| (k, Value::String(v))));
        }

        match body_kind(&req) {
            BodyKind::Json => {
                // non-strict: any JSON value is accepted
                let Json(body) = Json::<Value>::from_request(req, state)
                    .await
                    .map_err(IntoResponse::into_response)?;
                match body {
                    Value::Object(fields) => params.extend(fields),
                    Value::Null => {}
                    other => {
                        params.insert("body".to_string(), other);
                    }
                }
            }
            BodyKind::Form => {
                let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                    .await
                    .map_err(IntoResponse::into_response)?;
                params.extend(fields.into_iter().map(|(k, v)| (k, Value::String(v))));
            }
            BodyKind::Other => {}
        }

        Ok(Params(params))
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::StatusCode};
    use serde_json::json;

    use super::*;

    async fn extract(req: Request) -> Params {
        match Params::from_request(req, &()).await {
            Ok(params) => params,
            Err(res) => panic!("rejected with {}", res.status()),
        }
    }

    #[tokio::test]
    async fn merges_query_and_json_body() {
        let req = Request::builder()
            .method("POST")
            .uri("/welcome?name=query&lang=en")
            .header(header::CONTENT_TYPE, "application/json; charset=utf-8")
            .body(Body::from(r#"{"name":"body","age":3}"#))
            .unwrap();

        let Params(params) = extract(req).await;
        assert_eq!(params.get("name"), Some(&json!("body")));
        assert_eq!(params.get("lang"), Some(&json!("en")));
        assert_eq!(params.get("age"), Some(&json!(3)));
    }

    #[tokio::test]
    async fn non_object_json_lands_under_body() {
        let req = Request::builder()
            .method("POST")
            .uri("/welcome")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#""just a string""#))
            .unwrap();

        let params = extract(req).await;
        assert_eq!(params.get_str("body"), Some("just a string"));
    }

    #[tokio::test]
    async fn merges_urlencoded_body() {
        let req = Request::builder()
            .method("POST")
            .uri("/welcome?name=query")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("name=form+user&x=1"))
            .unwrap();

        let params = extract(req).await;
        assert_eq!(params.get_str("name"), Some("form user"));
        assert_eq!(params.get_str("x"), Some("1"));
    }

    #[tokio::test]
    async fn ignores_unknown_body_types() {
        let req = Request::builder()
            .method("POST")
            .uri("/welcome?name=q")
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Body::from("name=ignored"))
            .unwrap();

        let params = extract(req).await;
        assert_eq!(params.get_str("name"), Some("q"));
        assert_eq!(params.0.len(), 1);
    }

    #[tokio::test]
    async fn malformed_json_is_rejected_by_parser() {
        let req = Request::builder()
            .method("POST")
            .uri("/welcome")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let res = Params::from_request(req, &()).await.err().unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
