//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses or any other protocol-specific envelope. Every error carries an
//! ordered list of human-readable messages because validation failures report
//! all violations at once.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request body could not be decoded.
    InvalidRequest,
    /// The request was well formed but broke one or more input rules.
    ValidationFailed,
    /// The caller has no valid session for this action.
    Forbidden,
    /// The request clashes with data owned by another user.
    Conflict,
    /// A storage or crypto collaborator failed.
    InternalError,
}

/// Domain error payload.
///
/// ## Invariants
/// - `messages` holds at least one entry.
/// - Message order is preserved from construction to the client.
///
/// # Examples
/// ```
/// use accounts::domain::{Error, ErrorCode};
///
/// let err = Error::validation_messages(vec!["first".into(), "second".into()]);
/// assert_eq!(err.code(), ErrorCode::ValidationFailed);
/// assert_eq!(err.messages(), ["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    messages: Vec<String>,
    trace_id: Option<String>,
}

impl Error {
    /// Create an error with a single message.
    ///
    /// Captures the current trace identifier if one is in scope so the error
    /// payload is correlated automatically.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::with_messages(code, vec![message.into()])
    }

    /// Create an error carrying several messages in order.
    ///
    /// An empty list is replaced by the code's fallback message so the
    /// non-empty invariant holds.
    pub fn with_messages(code: ErrorCode, messages: Vec<String>) -> Self {
        let messages = if messages.is_empty() {
            vec![fallback_message(code).to_owned()]
        } else {
            messages
        };
        Self {
            code,
            messages,
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Ordered human-readable messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Correlation identifier captured when the error was built.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Attach a trace identifier to the error.
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for a single-message [`ErrorCode::ValidationFailed`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    /// Convenience constructor for [`ErrorCode::ValidationFailed`] with the
    /// full ordered violation list.
    pub fn validation_messages(messages: Vec<String>) -> Self {
        Self::with_messages(ErrorCode::ValidationFailed, messages)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    ///
    /// The message is for logs only. Adapters replace it with a generic
    /// message before it reaches a client.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

fn fallback_message(code: ErrorCode) -> &'static str {
    use super::validation::messages;

    match code {
        ErrorCode::InvalidRequest | ErrorCode::ValidationFailed => messages::BAD_REQUEST,
        ErrorCode::Forbidden => messages::UNAUTHORIZED,
        ErrorCode::Conflict => messages::PHONE_ALREADY_REGISTERED,
        ErrorCode::InternalError => messages::INTERNAL_SERVER_ERROR,
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.messages.join("; "))
    }
}

impl std::error::Error for Error {}
