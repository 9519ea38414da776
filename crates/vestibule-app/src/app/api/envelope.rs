//! JSON response envelopes shared by every API handler.
//!
//! Success: `{"status":"success","message":…,"data":…}`.
//! Error: `{"status":"error","message":…}`.

use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::Response;
use serde::Serialize;

use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct SuccessEnvelope<T> {
    pub status: &'static str,
    pub message: String,
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub status: &'static str,
    pub message: String,
}

/// Writes a success envelope with the given status code.
pub fn render_success<T>(res: &mut Response, code: StatusCode, message: impl Into<String>, data: T)
where
    T: Serialize + Send,
{
    res.status_code(code);
    res.render(Json(SuccessEnvelope {
        status: "success",
        message: message.into(),
        data,
    }));
}

/// ## Summary
/// Writes the error envelope for `err`.
///
/// Server-side failures are logged with their full detail; the client only
/// sees [`AppError::client_message`].
pub fn render_error(res: &mut Response, err: &AppError) {
    let code = err.status_code();
    if code.is_server_error() {
        tracing::error!(error = ?err, status = %code, "Request failed");
    } else {
        tracing::debug!(error = %err, status = %code, "Request rejected");
    }

    res.status_code(code);
    res.render(Json(ErrorEnvelope {
        status: "error",
        message: err.client_message(),
    }));
}
