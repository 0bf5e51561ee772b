use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

/// Where the login page sends the operator back when a field was left blank.
pub const EMPTY_CREDENTIALS_REDIRECT: &str = "/?error=empty_credentials";

#[derive(Debug, ThisError)]
pub enum RegistryError {
    #[error("invalid age: {0:?}")]
    InvalidAge(String),

    #[error("missing patient id")]
    MissingPatientId,

    #[error("invalid patient id: {0:?}")]
    InvalidPatientId(String),

    #[error("username or password is empty")]
    EmptyCredentials,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("stored password hash is malformed")]
    MalformedPasswordHash,

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Template error: {0}")]
    RenderError(String),

    #[error("Blocking task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl From<tera::Error> for RegistryError {
    fn from(e: tera::Error) -> Self {
        // tera keeps the useful part (line, variable name) in the source chain
        let mut detail = e.to_string();
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            detail.push_str(": ");
            detail.push_str(&cause.to_string());
            source = cause.source();
        }
        RegistryError::RenderError(detail)
    }
}

impl RegistryError {
    pub fn status(&self) -> StatusCode {
        match self {
            RegistryError::InvalidAge(_)
            | RegistryError::MissingPatientId
            | RegistryError::InvalidPatientId(_) => StatusCode::BAD_REQUEST,
            RegistryError::EmptyCredentials => StatusCode::FOUND,
            RegistryError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            RegistryError::MalformedPasswordHash
            | RegistryError::DatabaseError(_)
            | RegistryError::RenderError(_)
            | RegistryError::TaskJoin(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            RegistryError::EmptyCredentials => {
                (status, [(header::LOCATION, EMPTY_CREDENTIALS_REDIRECT)]).into_response()
            }
            RegistryError::InvalidAge(_) => (status, "Invalid age").into_response(),
            RegistryError::MissingPatientId | RegistryError::InvalidPatientId(_) => {
                (status, self.to_string()).into_response()
            }
            RegistryError::InvalidCredentials => (status, self.to_string()).into_response(),
            RegistryError::MalformedPasswordHash
            | RegistryError::DatabaseError(_)
            | RegistryError::RenderError(_)
            | RegistryError::TaskJoin(_) => {
                error!(error = %self, "request failed");
                (status, "Internal server error").into_response()
            }
        }
    }
}
