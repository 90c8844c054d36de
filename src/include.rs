//! Include path tree: which relationship chains to expand, and how deep.

use std::collections::HashMap;

/// A parsed include specification.
///
/// An include list such as `"author,comments.author"` is a comma-separated
/// set of dot-separated relationship chains. Parsing turns it into a tree:
/// each node maps a relationship name to the subtree permitted below it, and
/// a leaf is a node with no children. Overlapping chains merge, so
/// `"a.b,a.c"` produces one `a` node with children `b` and `c`.
///
/// The tree bounds resolution depth exactly, which is what keeps decoding
/// cyclic relationship graphs finite.
///
/// # Example
///
/// ```rust
/// use jsonapi_normalizer::IncludePaths;
///
/// let paths = IncludePaths::parse(Some("author,comments.author")).unwrap();
/// assert!(paths.child("author").is_some());
/// assert!(paths.child("comments").unwrap().child("author").is_some());
/// assert!(paths.child("tags").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludePaths {
    children: HashMap<String, IncludePaths>,
}

impl IncludePaths {
    /// Parses an include specification.
    ///
    /// Returns `None` when `spec` is `None` or blank, which selects the
    /// no-include-list decode mode (see [`Decoder`]). Empty path segments
    /// (`"a,,b"`, `"a..b"`) are skipped.
    ///
    /// [`Decoder`]: crate::Decoder
    pub fn parse(spec: Option<&str>) -> Option<Self> {
        let spec = spec?.trim();
        if spec.is_empty() {
            return None;
        }

        let mut root = Self::default();
        for path in spec.split(',') {
            let chain = path.split('.').map(str::trim).filter(|s| !s.is_empty());
            root.insert_chain(chain);
        }
        Some(root)
    }

    fn insert_chain<'a>(&mut self, chain: impl Iterator<Item = &'a str>) {
        let mut node = self;
        for segment in chain {
            node = node.children.entry(segment.to_owned()).or_default();
        }
    }

    /// Returns the subtree permitted under `name`, or `None` when this
    /// relationship must not be expanded further.
    pub fn child(&self, name: &str) -> Option<&IncludePaths> {
        self.children.get(name)
    }

    /// Returns `true` if no further expansion is permitted below this node.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
