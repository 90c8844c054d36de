//! Resource identity: the `(type, id)` pair that names a resource.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::{Error, Result};

/// The `(type, id)` pair that uniquely identifies a resource within one
/// document.
///
/// Equality and hashing are defined solely on this pair: two resources
/// sharing an identity are indistinguishable, and the [`ResourceIndex`]
/// deduplicates on it.
///
/// # Example
///
/// ```rust
/// use jsonapi_normalizer::ResourceIdentity;
/// use serde_json::json;
///
/// let resource = json!({"type": "user", "id": "2", "attributes": {"name": "Bob"}});
/// let identity = ResourceIdentity::of(&resource)?;
/// assert_eq!(identity, ResourceIdentity::new("user", "2"));
/// # Ok::<(), jsonapi_normalizer::Error>(())
/// ```
///
/// [`ResourceIndex`]: crate::ResourceIndex
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceIdentity {
    /// The resource type, e.g. `"user"`.
    #[serde(rename = "type")]
    pub kind: String,

    /// The resource id, e.g. `"2"`.
    pub id: String,
}

impl ResourceIdentity {
    /// Creates an identity from its parts.
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
        }
    }

    /// Extracts the identity of a resource or relationship reference.
    ///
    /// Fails with [`ErrorKind::MissingIdentity`] if `type` or `id` is
    /// absent or not a string, or if the value is not an object at all.
    ///
    /// [`ErrorKind::MissingIdentity`]: crate::ErrorKind::MissingIdentity
    pub fn of(resource: &Value) -> Result<Self> {
        let Some(object) = resource.as_object() else {
            return Err(Error::missing_identity("resource is not an object"));
        };
        Self::of_object(object)
    }

    /// Extracts the identity from an already-unwrapped object.
    pub fn of_object(object: &Map<String, Value>) -> Result<Self> {
        let kind = object
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::missing_identity("resource lacks a string `type`"))?;
        let id = object
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::missing_identity("resource lacks a string `id`"))?;
        Ok(Self::new(kind, id))
    }

    /// Returns the bare `{type, id}` stub for this identity.
    ///
    /// Stubs stand in for relationship targets that were intentionally not
    /// expanded or could not be found.
    pub fn stub(&self) -> Value {
        json!({"type": self.kind, "id": self.id})
    }
}

impl fmt::Display for ResourceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}
