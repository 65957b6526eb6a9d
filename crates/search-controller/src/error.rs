use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use search_controller_core::query::FilterError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid query: {0}")]
    InvalidQuery(#[from] FilterError),

    #[error("Search API error: {0}")]
    SearchApi(String),

    #[error("Renderer error: {0}")]
    Renderer(String),

    #[error("Health check error: {0}")]
    HealthCheck(String),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Error::SearchApi(_) => StatusCode::BAD_GATEWAY,
            Error::Renderer(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::HealthCheck(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        log::error!("request failed with status {}: {}", status.as_u16(), self);

        let body = status.canonical_reason().unwrap_or("Error");
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            Error::InvalidQuery(FilterError::NotFound("x".to_string())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::SearchApi("down".to_string()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            Error::Renderer("down".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_invalid_query_message() {
        let err = Error::from(FilterError::NotFound("filter2".to_string()));
        assert_eq!(err.to_string(), "Invalid query: filter not found: filter2");
    }

    #[test]
    fn test_into_response_status() {
        let response = Error::SearchApi("timeout".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
