use astra::Response;
use thiserror::Error;

use crate::directory::DirectoryError;

/// Errors originating from either the server logic
/// (routing, missing resources, etc.) or downstream layers (DB, directory).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Database Error: {0}")]
    DbError(String),
    #[error("Property directory error: {0}")]
    Directory(#[from] DirectoryError),
    #[error("Internal Server Error")]
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl ServerError {
    pub fn status_code(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::Directory(_) => 502,
            ServerError::DbError(_) | ServerError::InternalError => 500,
        }
    }
}

impl From<rusqlite::Error> for ServerError {
    fn from(e: rusqlite::Error) -> Self {
        ServerError::DbError(e.to_string())
    }
}

impl From<serde_json::Error> for ServerError {
    fn from(e: serde_json::Error) -> Self {
        ServerError::BadRequest(format!("Invalid JSON: {e}"))
    }
}
