//! Error Types

use thiserror::Error;

/// Result type alias for form operations
pub type Result<T> = std::result::Result<T, FormError>;

/// Form error types
#[derive(Error, Debug)]
pub enum FormError {
    /// Event or setter names a field the schema does not know
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Auxiliary fields are only written through the auxiliary setter
    #[error("Field is not user editable: {0}")]
    NotEditable(String),

    /// Two descriptors share a name
    #[error("Duplicate field name: {0}")]
    DuplicateField(String),

    /// Schema failed structural checks
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// Event variant does not fit the field's control
    #[error("Event does not match control for '{field}': expected {control}")]
    EventMismatch { field: String, control: &'static str },

    /// Option is hidden, disabled or not offered
    #[error("Option '{value}' is not selectable for '{field}'")]
    OptionUnavailable { field: String, value: String },

    /// Value shape does not fit the field (text vs. multi-select)
    #[error("Value shape mismatch for '{0}'")]
    ValueShape(String),

    /// Form already left the editing phase
    #[error("Form is closed for edits")]
    Closed,

    /// Submission was already accepted
    #[error("Form already submitted")]
    AlreadySubmitted,

    /// Submit attempted while required fields are missing or invalid
    #[error("Form incomplete: missing {missing:?}, invalid {invalid:?}")]
    Incomplete {
        missing: Vec<String>,
        invalid: Vec<String>,
    },

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FormError {
    /// Errors caused by user interaction rather than configuration
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            FormError::OptionUnavailable { .. }
                | FormError::Closed
                | FormError::AlreadySubmitted
                | FormError::Incomplete { .. }
        )
    }

    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            FormError::OptionUnavailable { .. } => "That option is not available.".into(),
            FormError::Closed | FormError::AlreadySubmitted => {
                "This form has already been submitted.".into()
            }
            FormError::Incomplete { missing, .. } if !missing.is_empty() => {
                "Please fill in all required fields.".into()
            }
            FormError::Incomplete { .. } => "Please correct the highlighted fields.".into(),
            _ => "Something went wrong with this form.".into(),
        }
    }
}

/// Submission sink errors
#[derive(Error, Debug)]
pub enum SubmitError {
    /// Delivery to the downstream collaborator failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// Downstream collaborator refused the payload
    #[error("Submission rejected: {0}")]
    Rejected(String),

    /// Payload could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SubmitError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, SubmitError::Transport(_))
    }

    /// Get user-friendly message
    pub fn user_message(&self) -> &str {
        match self {
            SubmitError::Transport(_) => "We could not send your request. Please try again.",
            SubmitError::Rejected(_) => "Your request could not be accepted.",
            SubmitError::Serialization(_) => "An error occurred processing your request.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_messages() {
        let missing = FormError::Incomplete {
            missing: vec!["email".into()],
            invalid: vec![],
        };
        assert_eq!(missing.user_message(), "Please fill in all required fields.");

        let invalid = FormError::Incomplete {
            missing: vec![],
            invalid: vec!["website".into()],
        };
        assert_eq!(invalid.user_message(), "Please correct the highlighted fields.");
        assert!(invalid.is_user_error());
    }

    #[test]
    fn test_submit_retryable() {
        assert!(SubmitError::Transport("timeout".into()).is_retryable());
        assert!(!SubmitError::Rejected("spam".into()).is_retryable());
    }
}
