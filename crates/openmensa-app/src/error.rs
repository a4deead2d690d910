use salvo::http::StatusCode;
use thiserror::Error;

use openmensa_db::model::user::{Role, User};
use openmensa_service::error::ServiceError;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] ServiceError),

    #[error(transparent)]
    DatabaseError(#[from] openmensa_db::error::DbError),

    #[error(transparent)]
    CoreError(#[from] openmensa_core::error::CoreError),

    #[error("Unsupported format.")]
    UnsupportedFormat,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Failed to encode response: {0}")]
    Encoding(String),
}

impl AppError {
    /// ## Summary
    /// Maps the error to a response status. A denied request is
    /// `401 Unauthorized` for the anonymous user, who may still sign in, and
    /// `403 Forbidden` for everyone else.
    #[must_use]
    pub fn status_code(&self, actor: &User) -> StatusCode {
        match self {
            Self::ServiceError(ServiceError::AccessDenied(_)) => {
                if actor.role() == Role::Anonymous {
                    StatusCode::UNAUTHORIZED
                } else {
                    StatusCode::FORBIDDEN
                }
            }
            Self::ServiceError(ServiceError::NotFound(_)) | Self::NotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::ServiceError(ServiceError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ServiceError(ServiceError::NotDestructible(_)) => StatusCode::FORBIDDEN,
            Self::UnsupportedFormat => StatusCode::NOT_ACCEPTABLE,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::ServiceError(_) | Self::DatabaseError(_) | Self::CoreError(_) | Self::Encoding(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show to clients. Internal failures are not detailed.
    #[must_use]
    pub fn public_message(&self) -> String {
        if self.status_code(&User::anonymous()).is_server_error() {
            "Internal Server Error".to_string()
        } else {
            self.to_string()
        }
    }

    /// Fields that failed validation, if any.
    #[must_use]
    pub fn invalid_fields(&self) -> Vec<&'static str> {
        match self {
            Self::ServiceError(ServiceError::Validation(errors)) => errors.fields(),
            _ => Vec::new(),
        }
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
