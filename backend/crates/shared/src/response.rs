//! Response Envelope
//!
//! Every JSON endpoint answers with the same shape:
//!
//! ```json
//! { "meta": { "message": "...", "code": 200, "status": "success" }, "data": ... }
//! ```

use std::borrow::Cow;

use serde::Serialize;

/// Outcome label carried in `meta.status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// `meta` block of the envelope
#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    pub message: Cow<'static, str>,
    pub code: u16,
    pub status: Status,
}

/// Uniform API response envelope
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub meta: Meta,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 response with payload
    pub fn success(message: impl Into<Cow<'static, str>>, data: T) -> Self {
        Self::with_code(message, 200, Status::Success, data)
    }

    pub fn with_code(
        message: impl Into<Cow<'static, str>>,
        code: u16,
        status: Status,
        data: T,
    ) -> Self {
        Self {
            meta: Meta {
                message: message.into(),
                code,
                status,
            },
            data,
        }
    }
}

#[cfg(feature = "axum")]
impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        let status = http::StatusCode::from_u16(self.meta.code)
            .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR);
        (status, axum::Json(self)).into_response()
    }
}
