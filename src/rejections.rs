use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{html, Markup};

use crate::views;

/// Error type returned by handlers. The message is static so nothing
/// from the underlying failure leaks into the response.
#[derive(Debug)]
pub enum AppError {
    Internal(&'static str),
    Input(&'static str),
    NotFound,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            AppError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_SERVER_ERROR")
            }
            AppError::Input(msg) => {
                tracing::warn!("bad input: {msg}");
                (StatusCode::BAD_REQUEST, "INPUT_ERROR")
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        };

        (code, error_page(message)).into_response()
    }
}

pub trait ResultExt<T> {
    /// Logs the underlying error and turns it into `AppError::Internal(msg)`.
    fn reject(self, msg: &'static str) -> Result<T, AppError>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn reject(self, msg: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::error!("{msg}: {e}");
            AppError::Internal(msg)
        })
    }
}

fn error_page(message: &str) -> Markup {
    views::page(
        "Error",
        html! {
            h1 { (message) }
        },
        crate::names::DEFAULT_LOCALE,
    )
}
