//! # jsonapi-normalizer
//!
//! Normalization engine for JSON:API payloads: decode wire-format
//! documents into flat, directly usable object graphs, and encode flat
//! objects back into request envelopes.
//!
//! ## Quick Start
//!
//! ```rust
//! use jsonapi_normalizer::prelude::*;
//! use serde_json::json;
//!
//! fn main() -> jsonapi_normalizer::Result<()> {
//!     let document = json!({
//!         "data": {
//!             "type": "post", "id": "1",
//!             "attributes": {"title": "T"},
//!             "relationships": {"author": {"data": {"type": "user", "id": "2"}}}
//!         },
//!         "included": [{"type": "user", "id": "2", "attributes": {"name": "Bob"}}]
//!     });
//!
//!     // Flatten, expanding only the `author` relationship
//!     let resolved = Decoder::new().decode(&document, Some("author"))?;
//!     assert_eq!(resolved["data"]["author"]["name"], json!("Bob"));
//!
//!     // And back into a request body
//!     let body = Encoder::new().encode(&resolved["data"], None)?;
//!     assert_eq!(body["data"]["attributes"]["title"], json!("T"));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Key Concepts
//!
//! - **Resource identity**: every resource is named by its `(type, id)`
//!   pair; sideloaded duplicates collapse onto one canonical copy
//! - **Include paths**: `"author,comments.author"` controls which
//!   relationship chains decode expands, and how deep
//! - **Two decode modes**: an include list bounds expansion exactly; no
//!   include list expands every relationship exactly one level
//! - **Purity**: decode/encode never mutate their input and share no
//!   state; [`Decoder`] and [`Encoder`] are plain values, safe to use from
//!   any thread
//!
//! Everything operates on [`serde_json::Value`] trees; the [`typed`]
//! module bridges to native structs and raw bytes at the edges.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Core modules
pub mod decode;
pub mod encode;
pub mod error;
pub mod identity;
pub mod include;
pub mod index;

// Boundary helpers
pub mod typed;

// Prelude for convenient imports
pub mod prelude;

// Re-export main types at crate root for convenience
pub use decode::Decoder;
pub use encode::Encoder;
pub use error::{Error, ErrorKind, Result};
pub use identity::ResourceIdentity;
pub use include::IncludePaths;
pub use index::ResourceIndex;
