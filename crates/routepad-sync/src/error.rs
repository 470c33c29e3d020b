use routepad_core::GeometryError;
use thiserror::Error;

/// Non-success answers from the route store or the search service.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("search service fault: {0}")]
    Fault(String),

    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
}

impl BackendError {
    /// Classify a non-2xx HTTP status. `body` is the raw response text.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            404 => BackendError::NotFound(body),
            400 | 422 => BackendError::Validation(body),
            401 | 403 => BackendError::Unauthorized(body),
            _ => BackendError::Server { status, body },
        }
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("malformed response: {0}")]
    Parse(String),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Backend(BackendError::NotFound(_)))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Backend(BackendError::Validation(_)))
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert!(matches!(
            BackendError::from_status(404, "no such route".into()),
            BackendError::NotFound(_)
        ));
        assert!(matches!(
            BackendError::from_status(400, String::new()),
            BackendError::Validation(_)
        ));
        assert!(matches!(
            BackendError::from_status(422, String::new()),
            BackendError::Validation(_)
        ));
        assert!(matches!(
            BackendError::from_status(401, String::new()),
            BackendError::Unauthorized(_)
        ));
        assert!(matches!(
            BackendError::from_status(403, String::new()),
            BackendError::Unauthorized(_)
        ));
        assert!(matches!(
            BackendError::from_status(502, "bad gateway".into()),
            BackendError::Server { status: 502, .. }
        ));
    }

    #[test]
    fn json_errors_are_parse_errors() {
        let err: ClientError = serde_json::from_str::<u32>("{").unwrap_err().into();
        assert!(matches!(err, ClientError::Parse(_)));
    }

    #[test]
    fn display_keeps_backend_body() {
        let err = ClientError::from(BackendError::from_status(404, "User not found".into()));
        assert_eq!(err.to_string(), "not found: User not found");
        assert!(err.is_not_found());
    }
}
