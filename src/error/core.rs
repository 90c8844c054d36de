//! Main error type for the normalization engine.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use super::ErrorKind;

/// The primary error type for normalization operations.
///
/// `Error` carries everything needed to report a malformed document:
/// - [`kind()`](Error::kind): categorization for `match` statements
/// - [`pointer()`](Error::pointer): slash-separated location of the
///   offending node within the input document
/// - the human-readable message and, where one exists, the underlying cause
///
/// ## Example
///
/// ```rust
/// use jsonapi_normalizer::{Error, ErrorKind};
///
/// fn report(err: &Error) {
///     match err.kind() {
///         ErrorKind::MissingIdentity => eprintln!("bad reference: {}", err),
///         kind if kind.is_document_error() => eprintln!("bad payload: {}", err),
///         _ => eprintln!("serialization failed: {}", err),
///     }
/// }
/// ```
#[derive(Debug)]
pub struct Error {
    /// The error category.
    kind: ErrorKind,

    /// Human-readable error message.
    message: Cow<'static, str>,

    /// Location of the offending node, e.g. `/data/relationships/author`.
    pointer: Option<String>,

    /// The underlying error, if any.
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl Error {
    /// Creates a new error with the given kind and message.
    ///
    /// # Example
    ///
    /// ```rust
    /// use jsonapi_normalizer::{Error, ErrorKind};
    ///
    /// let err = Error::new(ErrorKind::NotADictionary, "attributes must be an object");
    /// assert_eq!(err.kind(), ErrorKind::NotADictionary);
    /// ```
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            pointer: None,
            source: None,
        }
    }

    /// Returns the error kind for categorization.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the location of the offending node, if known.
    ///
    /// The pointer is slash-separated from the document root, e.g.
    /// `/data/relationships/author` or `/included/2`.
    #[inline]
    pub fn pointer(&self) -> Option<&str> {
        self.pointer.as_deref()
    }

    /// Sets the pointer for this error.
    #[must_use]
    pub fn with_pointer(mut self, pointer: impl Into<String>) -> Self {
        self.pointer = Some(pointer.into());
        self
    }

    /// Sets the source error for this error.
    #[must_use]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors, one per kind

    /// Creates a missing identity error.
    pub fn missing_identity(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::MissingIdentity, message)
    }

    /// Creates a malformed container error.
    pub fn malformed_container(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::MalformedContainer, message)
    }

    /// Creates a not-a-dictionary error.
    pub fn not_a_dictionary(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotADictionary, message)
    }

    /// Creates a relationship shape error.
    pub fn relationship_shape(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::RelationshipShapeInvalid, message)
    }

    /// Creates an unconvertible-to-JSON error.
    pub fn unconvertible(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::UnconvertibleToJson, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;

        if let Some(ref pointer) = self.pointer {
            write!(f, " (at {})", pointer)?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        let message = match kind {
            ErrorKind::MissingIdentity => "resource lacks a string `type` or `id`",
            ErrorKind::MalformedContainer => "`data`/`included` has an impossible shape",
            ErrorKind::NotADictionary => "value has an unexpected shape",
            ErrorKind::RelationshipShapeInvalid => "relationship is not `{data: ...}`",
            ErrorKind::UnconvertibleToJson => "tree cannot be converted to JSON",
        };
        Self::new(kind, message)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::unconvertible(err.to_string()).with_source(err)
    }
}
