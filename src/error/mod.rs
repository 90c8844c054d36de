//! Error types for the normalization engine.
//!
//! The engine reports two pieces of information for every failure:
//! - [`ErrorKind`]: the shape violation category, for `match` statements
//! - [`Error`]: the full error, carrying a message, the JSON pointer of the
//!   offending node, and the underlying cause where one exists
//!
//! ## Key Invariant
//!
//! Decode and encode either fully succeed or return an `Error`. There is no
//! partially resolved document: a malformed relationship three levels deep
//! fails the whole call.
//!
//! ```rust
//! use jsonapi_normalizer::{Decoder, ErrorKind};
//! use serde_json::json;
//!
//! let decoder = Decoder::new();
//! let err = decoder
//!     .decode(&json!({"data": {"type": "post"}}), None)
//!     .unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::MissingIdentity);
//! ```

mod core;
mod kind;

pub use self::core::Error;
pub use self::kind::ErrorKind;

/// A specialized `Result` type for normalization operations.
pub type Result<T> = std::result::Result<T, Error>;
