//! Error types and their HTTP status mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json as AxumJson, Response};

use site_compiler::CompileError;

use super::response::ErrorBody;

/// Public message for 404 responses.
pub const NOT_FOUND_MESSAGE: &str = "No data found for the given website ID";

/// Public message for 500 responses; details only go to the log.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// All errors that can occur in the compile server.
#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    #[error("No data found for website: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::InternalError(_) | ServerError::Transport(_) | ServerError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to return to the caller.
    pub fn public_message(&self) -> String {
        match self {
            ServerError::NotFound(_) => NOT_FOUND_MESSAGE.to_string(),
            ServerError::InvalidRequest(_) => self.to_string(),
            _ => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<CompileError> for ServerError {
    fn from(e: CompileError) -> Self {
        match e {
            CompileError::NotFound(id) => ServerError::NotFound(id),
            CompileError::InvalidIdentifier { .. } => ServerError::InvalidRequest(e.to_string()),
            CompileError::Io(io) => ServerError::Io(io),
            CompileError::InvalidData(_) | CompileError::Source(_) => {
                ServerError::InternalError(e.to_string())
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Error compiling website: {self}");
        } else {
            tracing::warn!("Compile request rejected: {self}");
        }
        let body = ErrorBody {
            message: self.public_message(),
        };
        (status, AxumJson(body)).into_response()
    }
}

pub type ServerResult<T> = Result<T, ServerError>;
