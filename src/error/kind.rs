//! Error kind enumeration for categorizing normalization failures.

/// Categorization of normalization failures.
///
/// This enum provides a stable interface for matching on error types. All
/// kinds are local, synchronous, recoverable failures: the engine is
/// deterministic, so retrying a failed call with the same input is
/// pointless. Callers that own the surrounding request (e.g. an HTTP layer)
/// may retry the request, not the normalization.
///
/// | ErrorKind                  | Meaning                                       |
/// |----------------------------|-----------------------------------------------|
/// | `MissingIdentity`          | Resource/reference lacks string `type`/`id`   |
/// | `MalformedContainer`       | `data`/`included` has an impossible shape     |
/// | `NotADictionary`           | `attributes`/relationship value wrong shape   |
/// | `RelationshipShapeInvalid` | Relationship entry is not `{"data": ...}`     |
/// | `UnconvertibleToJson`      | Tree cannot be (de)serialized                 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A resource or relationship reference lacks a string `type` or `id`.
    ///
    /// Raised while indexing resources, while following relationship
    /// references during decode, and by the encoder when a field named in
    /// the relationship list does not carry an identity.
    #[error("missing identity")]
    MissingIdentity,

    /// `data` or `included` is present but not an object, array, or null.
    #[error("malformed container")]
    MalformedContainer,

    /// An `attributes` or relationship value has an unexpected shape.
    ///
    /// For example `"attributes": 42`, or a relationship entry that is a
    /// bare string instead of an object.
    #[error("not a dictionary")]
    NotADictionary,

    /// A relationship entry is an object but lacks the `data` key.
    ///
    /// Every relationship must be shaped `{"data": ref | [ref] | null}`.
    #[error("relationship shape invalid")]
    RelationshipShapeInvalid,

    /// The resolved or encoded tree cannot be re-serialized to bytes, or
    /// raw bytes could not be bridged to/from a typed value.
    #[error("unconvertible to JSON")]
    UnconvertibleToJson,
}

impl ErrorKind {
    /// Returns `true` if this kind reports a malformed input document, as
    /// opposed to a serialization failure at the byte/typed boundary.
    ///
    /// Document errors point at the payload producer; conversion errors
    /// point at the caller's types or serializer.
    #[inline]
    pub fn is_document_error(self) -> bool {
        !matches!(self, ErrorKind::UnconvertibleToJson)
    }
}
