//! Resource index: identity-keyed lookup over `data` and `included`.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::identity::ResourceIdentity;

/// An identity-keyed map over the union of a document's primary `data` and
/// its sideloaded `included` resources.
///
/// Insertion order is primary resources first, then `included`; a later
/// insertion overwrites an earlier one sharing the same identity. This
/// last-write-wins behavior is deliberate and load-bearing: callers rely on
/// the `included` definition of a resource shadowing a bare primary entry.
#[derive(Debug)]
pub struct ResourceIndex {
    entries: HashMap<ResourceIdentity, Value>,
}

impl ResourceIndex {
    /// Builds the index over `primary` then `included`.
    ///
    /// Fails with [`ErrorKind::MissingIdentity`] if any resource lacks a
    /// string `type` or `id`.
    ///
    /// [`ErrorKind::MissingIdentity`]: crate::ErrorKind::MissingIdentity
    pub fn build(primary: &[&Value], included: &[&Value]) -> Result<Self> {
        let mut entries = HashMap::with_capacity(primary.len() + included.len());
        for resource in primary.iter().chain(included.iter()).copied() {
            let identity = ResourceIdentity::of(resource)?;
            entries.insert(identity, resource.clone());
        }
        debug!(resources = entries.len(), "built resource index");
        Ok(Self { entries })
    }

    /// Looks up a resource by identity.
    pub fn get(&self, identity: &ResourceIdentity) -> Option<&Value> {
        self.entries.get(identity)
    }

    /// Returns the number of distinct identities in the index.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the index holds no resources.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
