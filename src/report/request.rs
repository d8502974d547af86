//! Error report request handed to the dialog or the launcher.

use {
    serde::{Deserialize, Serialize},
    serde_json::from_str,
};

use crate::{
    error::domain::UiError,
    report::{
        extractor::{ExtractionResult, MessageExtractor},
        raised::{ErrorNode, RaisedError},
    },
};

/// Default dialog title.
pub const DEFAULT_TITLE: &str = "Error";

/// Message used when the caller supplies a blank one.
pub const DEFAULT_MESSAGE: &str = "An unexpected error occurred";

/// Everything needed to report one error to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRequest {
    /// Window title.
    #[serde(default = "default_title")]
    pub title: String,
    /// Caller message shown above the description; also the fallback
    /// display message.
    pub message: String,
    /// The raised error, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RaisedError>,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

impl ErrorRequest {
    /// Creates a request without an attached error.
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            error: None,
        }
        .normalized()
    }

    /// Replaces a blank title or message with the defaults.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.title.trim().is_empty() {
            self.title = DEFAULT_TITLE.to_string();
        }
        if self.message.trim().is_empty() {
            self.message = DEFAULT_MESSAGE.to_string();
        }
        self
    }

    /// Caller message, or [`DEFAULT_MESSAGE`] when it is blank.
    #[must_use]
    pub fn message_or_default(&self) -> &str {
        if self.message.trim().is_empty() {
            DEFAULT_MESSAGE
        } else {
            &self.message
        }
    }

    /// Attaches the raised error.
    #[must_use]
    pub fn with_error(mut self, error: RaisedError) -> Self {
        self.error = Some(error);
        self
    }

    /// Parses a request from JSON.
    ///
    /// # Errors
    ///
    /// Returns `UiError::InvalidRequest` if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, UiError> {
        from_str(json)
            .map(Self::normalized)
            .map_err(|e| UiError::InvalidRequest {
                reason: e.to_string(),
            })
    }

    /// Extracts the display texts, using the request message as fallback.
    #[must_use]
    pub fn extract(&self, extractor: &MessageExtractor) -> ExtractionResult {
        extractor.extract(
            self.error.as_ref().map(|error| error as &dyn ErrorNode),
            self.message_or_default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::domain::UiError,
        report::{
            extractor::MessageExtractor,
            raised::RaisedError,
            request::{DEFAULT_MESSAGE, DEFAULT_TITLE, ErrorRequest},
        },
    };

    #[test]
    fn test_from_json_defaults_title() {
        let request = ErrorRequest::from_json(r#"{ "message": "Unable to run job" }"#).unwrap();
        assert_eq!(request.title, DEFAULT_TITLE);
        assert_eq!(request.message, "Unable to run job");
        assert!(request.error.is_none());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let error = ErrorRequest::from_json("not json").unwrap_err();
        assert!(matches!(error, UiError::InvalidRequest { .. }));
    }

    #[test]
    fn test_extract_uses_message_as_fallback() {
        let extractor = MessageExtractor::default();

        let bare = ErrorRequest::new("Error", "Unable to open file");
        assert_eq!(bare.extract(&extractor).display_message(), "Unable to open file");

        let with_error = ErrorRequest::new("Error", "Unable to open file")
            .with_error(RaisedError::domain("File is locked"));
        let result = with_error.extract(&extractor);
        assert_eq!(result.display_message(), "File is locked");
        assert_eq!(result.detail_text(), "File is locked\n");
    }

    #[test]
    fn test_blank_message_replaced_by_default() {
        let extractor = MessageExtractor::default();

        let parsed = ErrorRequest::from_json(r#"{ "title": "", "message": "" }"#).unwrap();
        assert_eq!(parsed.title, DEFAULT_TITLE);
        assert_eq!(parsed.message, DEFAULT_MESSAGE);
        assert_eq!(parsed.extract(&extractor).display_message(), DEFAULT_MESSAGE);

        let built = ErrorRequest::new("Error", "   ");
        assert_eq!(built.message, DEFAULT_MESSAGE);
    }

    #[test]
    fn test_blank_message_set_after_construction_never_displays_blank() {
        let mut request = ErrorRequest::new("Error", "Unable to save")
            .with_error(RaisedError::other("java.lang.RuntimeException", None));
        request.message = String::new();

        assert_eq!(request.message_or_default(), DEFAULT_MESSAGE);
        assert_eq!(
            request.extract(&MessageExtractor::default()).display_message(),
            DEFAULT_MESSAGE
        );
    }
}
