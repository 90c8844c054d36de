//! Typed bridge: move between resolved JSON trees, native structs, and
//! raw bytes.
//!
//! The engine itself works purely on [`serde_json::Value`] trees. This
//! module is the thin layer its collaborators use at the boundaries: an
//! HTTP client hands bytes to [`from_slice`] and reads them back out of
//! [`to_bytes`]; application code deserializes a resolved `data` into its
//! own structs with [`decode_data`] and serializes structs back into flat
//! objects with [`to_value`] before encoding.
//!
//! # Example
//!
//! ```rust
//! use jsonapi_normalizer::{Decoder, typed};
//! use serde::Deserialize;
//! use serde_json::json;
//!
//! #[derive(Deserialize)]
//! struct Post {
//!     id: String,
//!     title: String,
//! }
//!
//! let document = json!({
//!     "data": {"type": "post", "id": "1", "attributes": {"title": "T"}}
//! });
//!
//! let post: Post = typed::decode_data(&Decoder::new(), &document, None)?;
//! assert_eq!(post.id, "1");
//! assert_eq!(post.title, "T");
//! # Ok::<(), jsonapi_normalizer::Error>(())
//! ```

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::decode::Decoder;
use crate::error::{Error, Result};

/// Deserializes a resolved JSON tree into a native value.
///
/// Fails with [`UnconvertibleToJson`](crate::ErrorKind::UnconvertibleToJson)
/// when the tree does not fit `T`.
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(Error::from)
}

/// Serializes a native value into a JSON tree, ready for
/// [`Encoder::encode`](crate::Encoder::encode).
pub fn to_value<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(Error::from)
}

/// Decodes a document and deserializes its resolved `data` into `T`.
///
/// `T` should mirror the flattened resource shape: `type`/`id` and
/// attribute keys at the top level. Use a `Vec<T>` for array-shaped `data`
/// and an `Option<T>` when `data` may be `null`.
pub fn decode_data<T: DeserializeOwned>(
    decoder: &Decoder,
    document: &Value,
    include_list: Option<&str>,
) -> Result<T> {
    let mut resolved = decoder.decode(document, include_list)?;
    let data = match resolved.as_object_mut().and_then(|o| o.remove("data")) {
        Some(data) => data,
        None => Value::Null,
    };
    from_value(data)
}

/// Serializes a JSON tree to bytes.
///
/// Fails with [`UnconvertibleToJson`](crate::ErrorKind::UnconvertibleToJson)
/// when the tree cannot be re-serialized.
pub fn to_bytes(value: &Value) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(Error::from)
}

/// Parses raw response bytes into a JSON tree.
///
/// Fails with [`MalformedContainer`](crate::ErrorKind::MalformedContainer)
/// when the bytes are not valid JSON.
pub fn from_slice(bytes: &[u8]) -> Result<Value> {
    serde_json::from_slice(bytes)
        .map_err(|e| Error::malformed_container("input is not valid JSON").with_source(e))
}
