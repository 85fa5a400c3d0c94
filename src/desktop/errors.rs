use thiserror::Error;

/// Failure taxonomy for automation operations.
///
/// Every member surfaces as an `ActionResult { success: false }`; none of
/// them terminate the process.
#[derive(Debug, Error)]
pub enum AutomationError {
    /// A required field is missing or malformed; nothing was delegated.
    #[error("{0}")]
    Validation(String),

    /// A required external capability or tool is not present.
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),

    /// A window handle or title did not resolve.
    #[error("not found: {0}")]
    NotFound(String),

    /// The underlying backend call failed for any other reason.
    #[error("{0}")]
    Operation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_renders_message_verbatim() {
        let err = AutomationError::Validation("Text required".to_string());
        assert_eq!(err.to_string(), "Text required");
    }

    #[test]
    fn test_backend_unavailable_names_the_backend() {
        let err = AutomationError::BackendUnavailable("wmctrl: not found".to_string());
        assert_eq!(err.to_string(), "backend unavailable: wmctrl: not found");
    }
}
