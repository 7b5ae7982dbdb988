//! Selector errors

/// Result type for selector compilation and matching
pub type Result<T> = std::result::Result<T, SelectError>;

/// Selector compilation and matching errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    /// Selector text does not follow the grammar (includes empty input)
    #[error("Invalid selector `{input}` at offset {position}: {message}")]
    Syntax {
        input: String,
        /// Byte offset of the offending token
        position: usize,
        message: String,
    },

    /// A feature the engine refuses to guess at, such as namespaces
    #[error("Unsupported {feature}: {detail}")]
    Unsupported {
        feature: &'static str,
        detail: String,
    },

    /// A hand-built or deserialized selector that breaks the model's shape
    #[error("Invalid selector structure: {message}")]
    Invalid { message: String },

    /// A node handle that does not belong to the tree being queried
    #[error("Type mismatch: {message}")]
    TypeMismatch { message: String },
}

impl SelectError {
    pub(crate) fn syntax(input: &str, position: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            input: input.to_string(),
            position,
            message: message.into(),
        }
    }

    pub(crate) fn namespace(detail: impl Into<String>) -> Self {
        Self::Unsupported {
            feature: "namespace",
            detail: detail.into(),
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Byte offset of a syntax error
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Syntax { position, .. } => Some(*position),
            _ => None,
        }
    }
}
