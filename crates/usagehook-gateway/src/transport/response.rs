//! HTTP mapping for core errors (plain-text bodies).

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use usagehook_core::error::{ClientCode, UsageHookError};

/// Response wrapper so core errors can leave a handler with `?`.
#[derive(Debug)]
pub struct ApiError(pub UsageHookError);

impl From<UsageHookError> for ApiError {
    fn from(e: UsageHookError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0.client_code() {
            ClientCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ClientCode::BadRequest => StatusCode::BAD_REQUEST,
            ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            format!("{}\n", self.0.client_message()),
        )
            .into_response()
    }
}
