use actix_web::{http::StatusCode, HttpResponse};
use tanam_api_structs::ErrorResponse;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TanamError {
    #[error("Internal server error")]
    InternalError,
    #[error("Failed to fetch reminders")]
    TransientFetchError,
    #[error("Invalid data provided: Error message: `{0}`")]
    BadClientData(String),
    #[error("Unauthorized request. Error message: `{0}`")]
    Unauthorized(String),
    #[error("404 Not found. Error message: `{0}`")]
    NotFound(String),
}

impl TanamError {
    /// The message sent to the client. Unauthorized and not found requests
    /// get a fixed message so that nothing is revealed about other users.
    fn public_message(&self) -> String {
        match self {
            Self::Unauthorized(_) => "Unauthorized".into(),
            Self::NotFound(_) => "Not found".into(),
            e => e.to_string(),
        }
    }
}

impl actix_web::error::ResponseError for TanamError {
    fn status_code(&self) -> StatusCode {
        match *self {
            Self::InternalError | Self::TransientFetchError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadClientData(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.public_message()))
    }
}
