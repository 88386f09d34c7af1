use axum::http::StatusCode;
use thiserror::Error;

/// Failures raised by the ledger, profile store and mock listing.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A climb was logged for a gym that has no visit record yet.
    #[error("cannot log climb for unvisited gym '{gym_id}'")]
    PreconditionViolation { gym_id: String },

    #[error("Failed to load gyms")]
    ListingFetchFailure,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        let status = match &err {
            StoreError::PreconditionViolation { .. } => StatusCode::CONFLICT,
            StoreError::ListingFetchFailure => StatusCode::SERVICE_UNAVAILABLE,
            StoreError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
