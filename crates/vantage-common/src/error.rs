use thiserror::Error;

/// Client error types covering connection failures, protocol errors, and
/// errors reported by the controller itself.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Socket open/read/write failed.
    #[error("connection error: {0}")]
    Connection(String),

    /// A wait exceeded its deadline. A specialisation of a connection error;
    /// [`ClientError::is_connection_error`] matches both.
    #[error("timed out: {0}")]
    Timeout(String),

    /// A syntactically valid reply that lacks the expected structure, such as
    /// a missing `<return>` element or an out-of-order `R:` line.
    #[error("unexpected response: {0}")]
    Response(String),

    /// Host Command error code 21: the command requires authentication.
    #[error("login required: {0}")]
    LoginRequired(String),

    /// Host Command error code 23, or a failed `ILogin.Login` call.
    #[error("login failed: {0}")]
    LoginFailed(String),

    /// Any other non-zero Host Command error, with code and message preserved.
    #[error("{message} (error code {code})")]
    Command {
        /// The numeric error code from the `R:ERROR:<code>` line.
        code: u32,
        /// The error message sent by the controller.
        message: String,
    },

    /// An XML document or token sequence could not be decoded against the
    /// declared type.
    #[error("decode error: {0}")]
    Decode(String),
}

impl ClientError {
    /// Map a Host Command error code to the matching error variant.
    pub fn from_error_code(code: u32, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            21 => Self::LoginRequired(message),
            23 => Self::LoginFailed(message),
            _ => Self::Command { code, message },
        }
    }

    /// Return true for connection-level failures (including timeouts).
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Timeout(_))
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Connection(err.to_string())
    }
}

/// Convenience type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
