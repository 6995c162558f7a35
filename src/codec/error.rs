use thiserror::Error;

/// Errors raised while turning JSON text into a template or back.
///
/// Only structural problems end up here: malformed JSON, a root that is not
/// an object, or a required field that is missing or unusable. Mis-typed
/// optional fields are coerced during decode and never reported.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Input is not valid JSON
    #[error("Malformed JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    /// Input is JSON but not an object at the top level
    #[error("Expected a JSON object at the top level, found {found}")]
    NotAnObject { found: &'static str },

    /// A required field is missing or has no usable value
    #[error("Invalid template: {0}")]
    Schema(#[source] serde_json::Error),

    #[error("Failed to encode template: {0}")]
    Encode(#[source] serde_json::Error),
}

impl CodecError {
    /// Message shown to the user in place of the document.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_an_object_message() {
        let err = CodecError::NotAnObject { found: "array" };
        assert_eq!(err.to_string(), "Expected a JSON object at the top level, found array");
    }

    #[test]
    fn test_schema_message_wraps_serde_error() {
        let inner = serde_json::from_str::<u8>("\"x\"").unwrap_err();
        let err = CodecError::Schema(inner);
        assert!(err.user_message().starts_with("Invalid template: "));
    }
}
