use crate::Encoding;
use thiserror::Error;

/// Failure while turning raw request data into a typed record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    #[error("unsupported encoding: {content_type}")]
    UnsupportedEncoding { content_type: String },

    #[error("malformed {encoding} body: {reason}")]
    MalformedBody { encoding: Encoding, reason: String },

    #[error("field '{field}': {reason}")]
    InvalidField { field: &'static str, reason: &'static str },
}

impl BindError {
    pub fn unsupported_encoding<S: ToString>(content_type: S) -> Self {
        Self::UnsupportedEncoding { content_type: content_type.to_string() }
    }

    pub fn malformed_body<S: ToString>(encoding: Encoding, reason: S) -> Self {
        Self::MalformedBody { encoding, reason: reason.to_string() }
    }

    pub fn invalid_field(field: &'static str, reason: &'static str) -> Self {
        Self::InvalidField { field, reason }
    }

    /// The field this error is about, if the failure happened while converting a single field
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidField { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Failure while parsing a validator-style tag such as `gte=17`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleParseError {
    #[error("unknown rule: {0}")]
    UnknownRule(String),

    #[error("rule '{rule}' expects a numeric argument, got '{arg}'")]
    InvalidArgument { rule: String, arg: String },

    #[error("rule '{0}' expects an argument")]
    MissingArgument(String),
}
