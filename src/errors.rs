use astra::Response;
use thiserror::Error;

/// Errors originating from either the server logic
/// (routing, bad input, etc.) or downstream layers (DB, files, Google Maps).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Database Error: {0}")]
    DbError(String),

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Google Maps request failed: {0}")]
    Http(String),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Internal Server Error")]
    InternalError,
}

impl From<rusqlite::Error> for ServerError {
    fn from(e: rusqlite::Error) -> Self {
        ServerError::DbError(e.to_string())
    }
}

impl From<reqwest::Error> for ServerError {
    fn from(e: reqwest::Error) -> Self {
        ServerError::Http(e.to_string())
    }
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            _ => 500,
        }
    }
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;
