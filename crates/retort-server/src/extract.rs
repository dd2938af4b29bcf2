//! Extractors whose rejections use the [`ApiError`] body

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts};
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use retort_core::{ErrorResult, IntoErrorReply};

use crate::error::ApiError;

/// JSON body, rejected with `400` (malformed) or `422` (wrong shape)
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Rejection))]
pub struct Json<T>(pub T);

/// Path parameters, rejected with `400`
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Rejection))]
pub struct Path<T>(pub T);

/// Request that could not be parsed
#[derive(Debug)]
pub struct Rejection(ErrorResult<ApiError>);

impl Rejection {
    fn new(status: StatusCode, message: String) -> Self {
        let body = ApiError::new("invalid_request_error", message);

        Self(if status == StatusCode::UNPROCESSABLE_ENTITY {
            ErrorResult::unprocessable_entity(body)
        } else {
            ErrorResult::bad_request_with(body)
        })
    }
}

impl From<JsonRejection> for Rejection {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "rejected request body");
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for Rejection {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "rejected path parameters");
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        self.0.into_error_reply::<()>().into_response()
    }
}
