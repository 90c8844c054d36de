//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types for easy importing:
//!
//! ```rust
//! use jsonapi_normalizer::prelude::*;
//! ```

pub use crate::{
    decode::Decoder,
    encode::Encoder,
    error::{Error, ErrorKind, Result},
    identity::ResourceIdentity,
    include::IncludePaths,
    index::ResourceIndex,
};
