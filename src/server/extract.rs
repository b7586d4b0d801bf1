//! Request extractors.

use axum::extract::FromRequest;
use axum::extract::rejection::JsonRejection;

use super::response::ApiError;
use crate::error::MarketError;

/// JSON body extractor whose rejections use the error envelope.
///
/// Any body rejection answers `400 INVALID_REQUEST` instead of axum's
/// plain-text 415 or 422.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub(super) struct ApiJson<T>(pub T);

impl From<JsonRejection> for MarketError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Request(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;
    use axum::http::{Request, StatusCode};
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Sample {
        max_results: Option<i64>,
    }

    async fn extract(content_type: Option<&str>, body: &'static str) -> Result<Sample, ApiError> {
        let mut builder = Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        let request = builder.body(Body::from(body)).expect("request");
        ApiJson::<Sample>::from_request(request, &())
            .await
            .map(|ApiJson(sample)| sample)
    }

    #[tokio::test]
    async fn well_formed_body_is_extracted() {
        let sample = extract(Some("application/json"), r#"{"max_results":3}"#)
            .await
            .expect("extracted");
        assert_eq!(sample.max_results, Some(3));
    }

    #[tokio::test]
    async fn wrong_field_type_is_bad_request() {
        let err = extract(Some("application/json"), r#"{"max_results":"five"}"#)
            .await
            .expect_err("rejected");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn syntax_error_and_missing_content_type_are_bad_request() {
        let err = extract(Some("application/json"), "{not json")
            .await
            .expect_err("rejected");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = extract(None, r#"{"max_results":3}"#)
            .await
            .expect_err("rejected");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
