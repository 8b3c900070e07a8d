//! HTTP error mapping.
//!
//! Handler failures become JSON bodies of the form `{"error": ..., "code": ...}`.
//! Warp's own rejections (unknown route, wrong method) get the same shape.

use serde::Serialize;
use std::convert::Infallible;
use surfsup_climate::ClimateError;
use thiserror::Error;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Rejection, Reply};

#[derive(Debug, Error)]
pub enum ApiError {
    /// A `start`/`end` segment that is not a valid `YYYYMMDD` date.
    #[error("Invalid date {segment:?}: {reason}. Dates must use the YYYYMMDD format, e.g. 20170823")]
    MalformedDate { segment: String, reason: String },

    #[error(transparent)]
    Climate(#[from] ClimateError),
}

impl ApiError {
    pub fn malformed_date(segment: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedDate {
            segment: segment.into(),
            reason: reason.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MalformedDate { .. } => StatusCode::BAD_REQUEST,
            Self::Climate(ClimateError::DataUnavailable(_)) => StatusCode::NOT_FOUND,
            Self::Climate(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message returned to the client. Input errors echo the detail; storage
    /// errors do not.
    pub fn client_message(&self) -> String {
        match self {
            Self::MalformedDate { .. } => self.to_string(),
            Self::Climate(e) => e.user_message().to_string(),
        }
    }
}

impl Reply for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }
        error_reply(status, self.client_message())
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    code: u16,
}

fn error_reply(status: StatusCode, message: impl Into<String>) -> Response {
    let body = ErrorBody {
        error: message.into(),
        code: status.as_u16(),
    };
    warp::reply::with_status(warp::reply::json(&body), status).into_response()
}

/// Turn warp rejections into JSON error responses.
pub async fn handle_rejection(err: Rejection) -> Result<Response, Infallible> {
    if err.is_not_found() {
        return Ok(error_reply(StatusCode::NOT_FOUND, "Route not found. See / for available routes."));
    }

    if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        return Ok(error_reply(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed"));
    }

    tracing::error!("Unhandled rejection: {:?}", err);
    Ok(error_reply(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"))
}
