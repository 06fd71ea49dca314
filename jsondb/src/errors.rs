use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

/// Error kinds for jsondb operations.
///
/// Each kind names one category of failure so callers can branch on it
/// without parsing messages.
///
/// # Examples
///
/// ```rust
/// use jsondb::errors::{ErrorKind, JsonDbError, JsonDbResult};
///
/// fn example() -> JsonDbResult<()> {
///     Err(JsonDbError::new("no document matched", ErrorKind::NotFound))
/// }
///
/// assert_eq!(example().unwrap_err().kind(), &ErrorKind::NotFound);
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Payload Errors
    /// Insert called with an empty document or an empty document sequence
    EmptyInsert,
    /// A condition or payload is not the expected shape
    TypeMismatch,

    // Condition Errors
    /// A condition uses an unrecognized `$`-prefixed key
    UnsupportedOperator,
    /// A comparison threshold and a document field are not mutually ordered
    IncomparableTypes,

    // Lookup Errors
    /// `find_one` found nothing to return
    NotFound,

    // Lifecycle Errors
    /// The connection has already been closed
    ClosedConnection,

    // Storage Errors
    /// Backing content is not a well-formed sequence of documents
    Corrupt,
    /// Generic IO error
    IOError,
    /// Error encoding or decoding data
    EncodingError,

    /// The operation is not valid in the current context
    InvalidOperation,
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::EmptyInsert => write!(f, "Empty insert"),
            ErrorKind::TypeMismatch => write!(f, "Type mismatch"),
            ErrorKind::UnsupportedOperator => write!(f, "Unsupported operator"),
            ErrorKind::IncomparableTypes => write!(f, "Incomparable types"),
            ErrorKind::NotFound => write!(f, "Not found"),
            ErrorKind::ClosedConnection => write!(f, "Closed connection"),
            ErrorKind::Corrupt => write!(f, "Corrupt store"),
            ErrorKind::IOError => write!(f, "IO error"),
            ErrorKind::EncodingError => write!(f, "Encoding error"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom jsondb error type.
///
/// `JsonDbError` carries a message, an [ErrorKind], an optional cause and the
/// backtrace captured where it was created.
///
/// # Examples
///
/// ```rust
/// use jsondb::errors::{ErrorKind, JsonDbError};
///
/// let cause = JsonDbError::new("disk gone", ErrorKind::IOError);
/// let err = JsonDbError::new_with_cause("commit failed", ErrorKind::IOError, cause);
/// assert!(err.cause().is_some());
/// ```
#[derive(Clone)]
pub struct JsonDbError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<JsonDbError>>,
    backtrace: Backtrace,
}

impl JsonDbError {
    /// Creates a new `JsonDbError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        JsonDbError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: Backtrace::new(),
        }
    }

    /// Creates a new `JsonDbError` wrapping the error that caused it.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: JsonDbError) -> Self {
        JsonDbError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: Backtrace::new(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&JsonDbError> {
        self.cause.as_deref()
    }
}

impl Display for JsonDbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for JsonDbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace),
        }
    }
}

impl Error for JsonDbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for jsondb operations.
pub type JsonDbResult<T> = Result<T, JsonDbError>;

impl From<std::io::Error> for JsonDbError {
    fn from(err: std::io::Error) -> Self {
        JsonDbError::new(&format!("IO error: {}", err), ErrorKind::IOError)
    }
}

impl From<serde_json::Error> for JsonDbError {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;

        match err.classify() {
            Category::Io => JsonDbError::new(&format!("IO error: {}", err), ErrorKind::IOError),
            Category::Syntax | Category::Data | Category::Eof => JsonDbError::new(
                &format!("Malformed document data: {}", err),
                ErrorKind::Corrupt,
            ),
        }
    }
}

impl From<std::string::FromUtf8Error> for JsonDbError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        JsonDbError::new(
            &format!("UTF-8 encoding error: {}", err),
            ErrorKind::EncodingError,
        )
    }
}
