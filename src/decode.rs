//! Decoder: flatten a JSON:API document into a plain object graph.

use serde_json::{Map, Value};
use tracing::trace;

use crate::error::{Error, Result};
use crate::identity::ResourceIdentity;
use crate::include::IncludePaths;
use crate::index::ResourceIndex;

/// Flattens wire-format JSON:API documents.
///
/// A wire document carries resources as `{type, id, attributes,
/// relationships}` envelopes and sideloads every related resource once in a
/// shared `included` array. [`decode()`](Decoder::decode) turns that into a
/// directly usable graph: `type`/`id` and the attribute keys are hoisted to
/// the top level of each resource, and relationship references are replaced
/// by the resolved resources themselves.
///
/// ## Decode modes
///
/// The second argument to `decode()` selects one of two deliberately
/// distinct behaviors:
///
/// - **Include-list mode** (`Some("author,comments.author")`): only the
///   listed relationship chains are expanded, to exactly the listed depth.
///   Relationships the list does not name are dropped from the output so
///   unresolved references do not leak, unless
///   [`parse_not_included_relationships`](Decoder::parse_not_included_relationships)
///   is set, in which case they survive as bare `{type, id}` stubs.
/// - **One-level mode** (`None` or a blank list): every relationship of
///   every primary resource is expanded exactly one level; the resolved
///   targets' own relationships are not expanded further.
///
/// The two modes are intentionally separate code paths with separate
/// semantics; neither is a special case of the other.
///
/// In both modes a reference whose target is absent from the document
/// resolves to `null`, or to a `{type, id}` stub when
/// `parse_not_included_relationships` is set.
///
/// ## Purity
///
/// The decoder never mutates its input and holds no state besides its
/// options: it is `Clone + Send + Sync` and safe to share across threads.
///
/// # Example
///
/// ```rust
/// use jsonapi_normalizer::Decoder;
/// use serde_json::json;
///
/// let document = json!({
///     "data": {
///         "type": "post", "id": "1",
///         "attributes": {"title": "T"},
///         "relationships": {"author": {"data": {"type": "user", "id": "2"}}}
///     },
///     "included": [{"type": "user", "id": "2", "attributes": {"name": "Bob"}}]
/// });
///
/// let resolved = Decoder::new().decode(&document, Some("author"))?;
/// assert_eq!(
///     resolved["data"],
///     json!({"type": "post", "id": "1", "title": "T",
///            "author": {"type": "user", "id": "2", "name": "Bob"}})
/// );
/// # Ok::<(), jsonapi_normalizer::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    parse_not_included_relationships: bool,
}

impl Decoder {
    /// Creates a decoder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps unexpanded relationships as bare `{type, id}` stubs.
    ///
    /// By default, a relationship that the include list does not name is
    /// dropped from the output, and a reference whose target is missing
    /// from the document resolves to `null`. With this option set, both
    /// survive as stubs instead.
    #[must_use]
    pub fn parse_not_included_relationships(mut self, enabled: bool) -> Self {
        self.parse_not_included_relationships = enabled;
        self
    }

    /// Decodes a JSON:API document into its flattened form.
    ///
    /// Returns the envelope with `data` replaced by the resolved
    /// resource(s) and `included` removed; every other top-level key passes
    /// through unchanged. `data` keeps its single-object vs array shape,
    /// and `data: null` passes through as `null`.
    ///
    /// # Errors
    ///
    /// - [`MalformedContainer`] when `data` is absent or `data`/`included`
    ///   is neither object, array, nor null
    /// - [`MissingIdentity`] when a resource or reference lacks a string
    ///   `type` or `id`
    /// - [`NotADictionary`] when `attributes` or a relationship entry has
    ///   the wrong shape
    /// - [`RelationshipShapeInvalid`] when a relationship entry lacks the
    ///   `data` key
    ///
    /// [`MalformedContainer`]: crate::ErrorKind::MalformedContainer
    /// [`MissingIdentity`]: crate::ErrorKind::MissingIdentity
    /// [`NotADictionary`]: crate::ErrorKind::NotADictionary
    /// [`RelationshipShapeInvalid`]: crate::ErrorKind::RelationshipShapeInvalid
    pub fn decode(&self, document: &Value, include_list: Option<&str>) -> Result<Value> {
        let envelope = document
            .as_object()
            .ok_or_else(|| Error::not_a_dictionary("document is not an object"))?;

        let data = envelope.get("data").ok_or_else(|| {
            Error::malformed_container("document has no `data` key").with_pointer("/data")
        })?;

        let primary: Vec<&Value> = match data {
            Value::Null => Vec::new(),
            Value::Object(_) => vec![data],
            Value::Array(items) => items.iter().collect(),
            _ => {
                return Err(Error::malformed_container(
                    "`data` must be an object, array, or null",
                )
                .with_pointer("/data"));
            }
        };

        let included: Vec<&Value> = match envelope.get("included") {
            None | Some(Value::Null) => Vec::new(),
            Some(single @ Value::Object(_)) => vec![single],
            Some(Value::Array(items)) => items.iter().collect(),
            Some(_) => {
                return Err(Error::malformed_container(
                    "`included` must be an object, array, or null",
                )
                .with_pointer("/included"));
            }
        };

        let index = ResourceIndex::build(&primary, &included)?;
        let tree = IncludePaths::parse(include_list);
        trace!(
            include_list,
            resources = index.len(),
            one_level = tree.is_none(),
            "decoding document"
        );

        let resolved_data = match data {
            Value::Object(_) => self.resolve_resource(data, tree.as_ref(), &index, "/data")?,
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, resource)| {
                        self.resolve_resource(
                            resource,
                            tree.as_ref(),
                            &index,
                            &format!("/data/{i}"),
                        )
                    })
                    .collect::<Result<Vec<_>>>()?,
            ),
            // Only null survives the shape check above.
            _ => Value::Null,
        };

        let mut resolved_data = Some(resolved_data);
        let mut out = Map::with_capacity(envelope.len());
        for (key, value) in envelope {
            match key.as_str() {
                "included" => {}
                "data" => {
                    if let Some(resolved) = resolved_data.take() {
                        out.insert(key.clone(), resolved);
                    }
                }
                _ => {
                    out.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(Value::Object(out))
    }

    fn resolve_resource(
        &self,
        resource: &Value,
        tree: Option<&IncludePaths>,
        index: &ResourceIndex,
        pointer: &str,
    ) -> Result<Value> {
        match tree {
            Some(tree) => self.resolve_with_tree(resource, tree, index, pointer),
            None => self.resolve_one_level(resource, index, pointer),
        }
    }

    /// Include-list mode. Expands exactly the relationship chains the tree
    /// permits; recursion depth is bounded by the tree depth, which keeps
    /// cyclic reference graphs finite.
    fn resolve_with_tree(
        &self,
        resource: &Value,
        tree: &IncludePaths,
        index: &ResourceIndex,
        pointer: &str,
    ) -> Result<Value> {
        let (mut out, relationships) = self.flatten_own_fields(resource, pointer)?;

        if let Some(relationships) = relationships {
            for (name, entry) in relationships {
                let rel_pointer = format!("{pointer}/relationships/{name}");
                let data = relationship_data(entry, &rel_pointer)?;
                match tree.child(name) {
                    Some(subtree) => {
                        let resolved =
                            self.resolve_references(data, Some(subtree), index, &rel_pointer)?;
                        out.insert(name.clone(), resolved);
                    }
                    None if self.parse_not_included_relationships => {
                        out.insert(name.clone(), reference_stubs(data, &rel_pointer)?);
                    }
                    // Not asked for: dropped, so stale references do not leak.
                    None => {}
                }
            }
        }
        Ok(Value::Object(out))
    }

    /// One-level mode. Expands every relationship reachable through the
    /// index exactly one level; the targets' own relationships stay
    /// unexpanded.
    fn resolve_one_level(
        &self,
        resource: &Value,
        index: &ResourceIndex,
        pointer: &str,
    ) -> Result<Value> {
        let (mut out, relationships) = self.flatten_own_fields(resource, pointer)?;

        if let Some(relationships) = relationships {
            for (name, entry) in relationships {
                let rel_pointer = format!("{pointer}/relationships/{name}");
                let data = relationship_data(entry, &rel_pointer)?;
                let resolved = self.resolve_references(data, None, index, &rel_pointer)?;
                out.insert(name.clone(), resolved);
            }
        }
        Ok(Value::Object(out))
    }

    /// Hoists `type`, `id`, and the attribute keys of a resource into a
    /// fresh object, and hands back its `relationships` for the caller to
    /// resolve.
    fn flatten_own_fields<'a>(
        &self,
        resource: &'a Value,
        pointer: &str,
    ) -> Result<(Map<String, Value>, Option<&'a Map<String, Value>>)> {
        let object = resource.as_object().ok_or_else(|| {
            Error::not_a_dictionary("resource is not an object").with_pointer(pointer)
        })?;
        let identity =
            ResourceIdentity::of_object(object).map_err(|e| e.with_pointer(pointer))?;

        let mut out = Map::new();
        out.insert("type".to_owned(), Value::String(identity.kind));
        out.insert("id".to_owned(), Value::String(identity.id));

        if let Some(attributes) = object.get("attributes") {
            let attributes = attributes.as_object().ok_or_else(|| {
                Error::not_a_dictionary("`attributes` is not an object")
                    .with_pointer(format!("{pointer}/attributes"))
            })?;
            for (key, value) in attributes {
                out.insert(key.clone(), value.clone());
            }
        }

        let relationships = match object.get("relationships") {
            None => None,
            Some(value) => Some(value.as_object().ok_or_else(|| {
                Error::not_a_dictionary("`relationships` is not an object")
                    .with_pointer(format!("{pointer}/relationships"))
            })?),
        };
        Ok((out, relationships))
    }

    /// Resolves the `data` of one relationship, preserving its single
    /// object vs array shape. `subtree` is the include subtree to recurse
    /// with, or `None` in one-level mode.
    fn resolve_references(
        &self,
        data: &Value,
        subtree: Option<&IncludePaths>,
        index: &ResourceIndex,
        pointer: &str,
    ) -> Result<Value> {
        match data {
            Value::Null => Ok(Value::Null),
            Value::Object(_) => self.resolve_reference(data, subtree, index, pointer),
            Value::Array(refs) => Ok(Value::Array(
                refs.iter()
                    .enumerate()
                    .map(|(i, reference)| {
                        self.resolve_reference(reference, subtree, index, &format!("{pointer}/{i}"))
                    })
                    .collect::<Result<Vec<_>>>()?,
            )),
            _ => Err(
                Error::relationship_shape("`data` must be a reference, array, or null")
                    .with_pointer(pointer),
            ),
        }
    }

    fn resolve_reference(
        &self,
        reference: &Value,
        subtree: Option<&IncludePaths>,
        index: &ResourceIndex,
        pointer: &str,
    ) -> Result<Value> {
        let identity = ResourceIdentity::of(reference).map_err(|e| e.with_pointer(pointer))?;
        match index.get(&identity) {
            Some(target) => match subtree {
                Some(subtree) => self.resolve_with_tree(target, subtree, index, pointer),
                // One-level mode: flatten the target against an empty tree
                // so its own relationships stay unexpanded.
                None => self.resolve_with_tree(target, &IncludePaths::default(), index, pointer),
            },
            None if self.parse_not_included_relationships => Ok(identity.stub()),
            None => Ok(Value::Null),
        }
    }
}

/// Unwraps a relationship entry down to its `data` value.
fn relationship_data<'a>(entry: &'a Value, pointer: &str) -> Result<&'a Value> {
    let object = entry.as_object().ok_or_else(|| {
        Error::not_a_dictionary("relationship entry is not an object").with_pointer(pointer)
    })?;
    object.get("data").ok_or_else(|| {
        Error::relationship_shape("relationship entry lacks the `data` key").with_pointer(pointer)
    })
}

/// Rewrites relationship `data` to bare `{type, id}` stubs, preserving its
/// single/array/null shape.
fn reference_stubs(data: &Value, pointer: &str) -> Result<Value> {
    match data {
        Value::Null => Ok(Value::Null),
        Value::Object(_) => {
            let identity = ResourceIdentity::of(data).map_err(|e| e.with_pointer(pointer))?;
            Ok(identity.stub())
        }
        Value::Array(refs) => Ok(Value::Array(
            refs.iter()
                .enumerate()
                .map(|(i, reference)| {
                    ResourceIdentity::of(reference)
                        .map_err(|e| e.with_pointer(format!("{pointer}/{i}")))
                        .map(|identity| identity.stub())
                })
                .collect::<Result<Vec<_>>>()?,
        )),
        _ => Err(
            Error::relationship_shape("`data` must be a reference, array, or null")
                .with_pointer(pointer),
        ),
    }
}
