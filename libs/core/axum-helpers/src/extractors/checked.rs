//! Extractor that runs a route's declared rules before the handler.

use crate::errors::AppError;
use crate::validation::{FieldError, RuleSet, ValidationErrorsBody, ValidationFault};
use axum::{
    Json,
    body::{Body, Bytes},
    extract::{
        FromRequest, FromRequestParts, Path, Request,
        rejection::{BytesRejection, JsonRejection},
    },
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Typed input of one route, together with the rules that guard it.
pub trait RouteInput: DeserializeOwned {
    /// Whether the route reads a JSON body in addition to path parameters.
    const READS_BODY: bool;

    /// Rules evaluated, in order, against the merged payload.
    fn rules() -> &'static RuleSet;

    /// Adjust fields after validation passed and before deserialization.
    fn normalize(_fields: &mut Map<String, Value>) {}
}

/// Validated route input.
///
/// Path parameters and JSON body fields are merged into one payload; a path
/// parameter wins over a body field with the same name. A request without a
/// `Content-Type` header is treated as having no body fields. An empty body, or
/// a body that is not a JSON object, contributes no fields either.
///
/// ```ignore
/// async fn get_one(Checked(ProductIdParam { id }): Checked<ProductIdParam>) { ... }
/// ```
#[derive(Debug, Clone)]
pub struct Checked<T>(pub T);

#[derive(Debug)]
pub enum CheckRejection {
    /// One or more rules failed.
    Invalid(Vec<FieldError>),
    /// The engine could not evaluate a rule.
    Fault(ValidationFault),
    /// The body could not be read.
    Read(BytesRejection),
    /// The body was not readable JSON.
    Body(JsonRejection),
    /// The validated payload did not fit the input type.
    Shape(serde_json::Error),
}

impl IntoResponse for CheckRejection {
    fn into_response(self) -> Response {
        match self {
            CheckRejection::Invalid(errors) => {
                (StatusCode::BAD_REQUEST, Json(ValidationErrorsBody { errors })).into_response()
            }
            CheckRejection::Fault(fault) => AppError::ValidationFault(fault.to_string()).into_response(),
            CheckRejection::Read(rejection) => rejection.into_response(),
            CheckRejection::Body(rejection) => AppError::from(rejection).into_response(),
            CheckRejection::Shape(err) => {
                tracing::warn!(error = %err, "validated payload did not deserialize");
                let errors = vec![FieldError::new("body", "invalid request body.")];
                (StatusCode::BAD_REQUEST, Json(ValidationErrorsBody { errors })).into_response()
            }
        }
    }
}

impl<T, S> FromRequest<S> for Checked<T>
where
    T: RouteInput,
    S: Send + Sync,
{
    type Rejection = CheckRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();

        let params = Path::<HashMap<String, String>>::from_request_parts(&mut parts, state)
            .await
            .map(|Path(params)| params)
            .unwrap_or_default();

        let has_body = T::READS_BODY && parts.headers.contains_key(CONTENT_TYPE);
        let mut fields = if has_body {
            let headers = parts.headers.clone();
            let bytes = Bytes::from_request(Request::from_parts(parts, body), state)
                .await
                .map_err(CheckRejection::Read)?;

            if bytes.is_empty() {
                Map::new()
            } else {
                let mut req = Request::new(Body::from(bytes));
                *req.headers_mut() = headers;
                match Json::<Value>::from_request(req, state).await {
                    Ok(Json(Value::Object(fields))) => fields,
                    Ok(Json(_)) => Map::new(),
                    Err(rejection) => return Err(CheckRejection::Body(rejection)),
                }
            }
        } else {
            Map::new()
        };

        for (key, value) in params {
            fields.insert(key, Value::String(value));
        }

        let mut payload = Value::Object(fields);
        let errors = T::rules()
            .evaluate(&payload)
            .map_err(CheckRejection::Fault)?;

        if !errors.is_empty() {
            tracing::info!(
                input = std::any::type_name::<T>(),
                failed_rules = errors.len(),
                "request rejected by validation"
            );
            return Err(CheckRejection::Invalid(errors));
        }

        if let Value::Object(fields) = &mut payload {
            T::normalize(fields);
        }

        serde_json::from_value(payload)
            .map(Checked)
            .map_err(CheckRejection::Shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::predicates::{is_boolean, is_integer, not_empty, optional};
    use axum::{Router, http::Request, routing::patch};
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use std::sync::LazyLock;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize)]
    struct Toggle {
        id: i32,
        flag: Option<bool>,
        label: Option<String>,
    }

    static TOGGLE_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
        RuleSet::new()
            .rule("id", is_integer, "bad id")
            .rule("flag", optional(is_boolean), "bad flag")
    });

    impl RouteInput for Toggle {
        const READS_BODY: bool = true;

        fn rules() -> &'static RuleSet {
            &TOGGLE_RULES
        }

        fn normalize(fields: &mut Map<String, Value>) {
            crate::validation::coerce_integer(fields, "id");
        }
    }

    #[derive(Debug, Deserialize)]
    struct Named {
        #[allow(dead_code)]
        name: String,
    }

    static NAMED_RULES: LazyLock<RuleSet> =
        LazyLock::new(|| RuleSet::new().rule("name", not_empty, "name empty"));

    impl RouteInput for Named {
        const READS_BODY: bool = true;

        fn rules() -> &'static RuleSet {
            &NAMED_RULES
        }
    }

    fn app() -> Router {
        Router::new()
            .route(
                "/items/{id}",
                patch(|Checked(input): Checked<Toggle>| async move {
                    format!("{}:{:?}:{:?}", input.id, input.flag, input.label)
                }),
            )
            .route(
                "/named",
                patch(|Checked(_): Checked<Named>| async { "ok" }),
            )
    }

    async fn send(uri: &str, body: Option<&str>) -> (StatusCode, String) {
        let builder = Request::builder().method("PATCH").uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_path_and_body_are_merged() {
        let (status, text) = send("/items/7", Some(r#"{"flag":true,"label":"x"}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(text, r#"7:Some(true):Some("x")"#);
    }

    #[tokio::test]
    async fn test_missing_content_type_means_no_body() {
        let (status, text) = send("/items/3", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(text, "3:None:None");
    }

    #[tokio::test]
    async fn test_empty_json_body_means_no_body_fields() {
        let (status, text) = send("/items/3", Some("")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(text, "3:None:None");

        let (status, text) = send("/named", Some("")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(text.contains("name empty"));
    }

    #[tokio::test]
    async fn test_path_param_wins_over_body_field() {
        let (status, text) = send("/items/5", Some(r#"{"id":"abc"}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(text.starts_with("5:"));
    }

    #[tokio::test]
    async fn test_failed_rules_are_reported() {
        let (status, text) = send("/items/abc", Some(r#"{"flag":"yes"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let body: ValidationErrorsBody = serde_json::from_str(&text).unwrap();
        assert_eq!(
            body.errors,
            vec![
                FieldError::new("id", "bad id"),
                FieldError::new("flag", "bad flag"),
            ]
        );
    }

    #[tokio::test]
    async fn test_non_object_body_has_no_fields() {
        let (status, text) = send("/named", Some("[1,2,3]")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(text.contains("name empty"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected() {
        let (status, _) = send("/named", Some("{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
