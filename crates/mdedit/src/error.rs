use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

/// Errors surfaced to the browser by the edit handlers
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("No file path given")]
    EmptyPath,

    #[error("Failed to read {0}: {1}")]
    Read(String, String),

    #[error("{0} is not valid UTF-8 text and cannot be edited")]
    NotUtf8(String),

    #[error("Failed to write {0}: {1}")]
    Write(String, String),

    #[error("Refusing a request from another site: {0}")]
    CrossOrigin(String),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::EmptyPath => StatusCode::BAD_REQUEST,
            Error::NotUtf8(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::CrossOrigin(_) => StatusCode::FORBIDDEN,
            Error::Read(..) | Error::Write(..) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        log::error!("{self}");
        let body = mdedit_core::page::render_error(&self.to_string());
        (self.status(), Html(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_per_kind() {
        assert_eq!(Error::EmptyPath.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            Error::NotUtf8("a.md".to_string()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            Error::Write("a.md".to_string(), "denied".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            Error::CrossOrigin("http://evil.example".to_string()).status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_into_response_keeps_status() {
        let response = Error::Read("a.md".to_string(), "busy".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
