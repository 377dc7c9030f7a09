use crate::pipeline::coverage::DecodeError;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Decode(#[from] DecodeError),

    #[error("Invalid input: {0}")]
    InvalidConfig(String),

    #[error("Upload error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

const IMAGE_HEADING: &str = "Error processing the image. Please try another file.";
const FORM_HEADING: &str = "Please check the form and try again.";

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Decode(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidConfig(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Multipart(e) => e.status(),
            AppError::Template(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show the operator.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Template(_) | AppError::Internal(_) => IMAGE_HEADING.into(),
            other => other.to_string(),
        }
    }

    /// Error page heading: image failures point at the file, input failures at the form.
    pub fn heading(&self) -> &'static str {
        match self {
            AppError::InvalidConfig(_) | AppError::BadRequest(_) | AppError::Multipart(_) => {
                FORM_HEADING
            }
            AppError::Decode(_) | AppError::Template(_) | AppError::Internal(_) => IMAGE_HEADING,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(%status, error = %self);
        } else {
            tracing::warn!(%status, error = %self);
        }

        (status, self.public_message()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_failures_are_unprocessable() {
        let err = AppError::from(DecodeError::Empty);
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.public_message(), "the uploaded file is empty");
    }

    #[test]
    fn internal_details_are_hidden() {
        let err = AppError::Internal("worker panicked".into());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.public_message().contains("panicked"));
    }

    #[test]
    fn invalid_config_is_bad_request() {
        let err = AppError::InvalidConfig("paper cost must not be negative".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Invalid input: paper cost must not be negative");
    }

    #[test]
    fn heading_follows_error_kind() {
        assert_eq!(AppError::from(DecodeError::Empty).heading(), IMAGE_HEADING);
        assert_eq!(AppError::Internal("boom".into()).heading(), IMAGE_HEADING);
        assert_eq!(AppError::InvalidConfig("bad markup".into()).heading(), FORM_HEADING);
        assert_eq!(AppError::BadRequest("no image uploaded".into()).heading(), FORM_HEADING);
    }
}
