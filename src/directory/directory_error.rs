use thiserror::Error;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Directory returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    JsonParse(String),
    #[error("Unexpected data shape: {0}")]
    UnexpectedShape(String),
}
