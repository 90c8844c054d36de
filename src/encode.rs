//! Encoder: re-wrap flat objects into JSON:API request envelopes.

use std::collections::HashSet;

use serde_json::{Map, Value, json};
use tracing::trace;

use crate::error::{Error, Result};
use crate::identity::ResourceIdentity;

/// Rebuilds wire-format JSON:API envelopes from flat objects.
///
/// [`encode()`](Encoder::encode) takes the kind of flat resource a
/// [`Decoder`](crate::Decoder) produces (or a hand-built one), splits its
/// fields into attributes and relationships, and wraps it back into the
/// `{type, id, attributes, relationships}` envelope under a top-level
/// `data` key.
///
/// ## Relationship classification
///
/// - **Duck-typed mode** (default): a field is a relationship iff its value
///   is an object carrying both a `type` and an `id` key, or a non-empty
///   array whose every element is such an object. Empty arrays cannot be
///   told apart from empty attribute arrays and stay attributes.
/// - **List mode** ([`relationship_list`](Encoder::relationship_list)):
///   only the listed field names may be relationships. A listed field whose
///   value lacks an identity fails with
///   [`MissingIdentity`](crate::ErrorKind::MissingIdentity); an unlisted
///   field is always an attribute, even when it looks exactly like a
///   reference.
///
/// Like the decoder, the encoder never mutates its input and holds no state
/// besides its options.
///
/// # Example
///
/// ```rust
/// use jsonapi_normalizer::Encoder;
/// use serde_json::json;
///
/// let flat = json!({
///     "type": "post", "id": "1",
///     "title": "T",
///     "author": {"type": "user", "id": "2", "name": "Bob"}
/// });
///
/// let document = Encoder::new().encode(&flat, None)?;
/// assert_eq!(
///     document,
///     json!({
///         "data": {
///             "type": "post", "id": "1",
///             "attributes": {"title": "T"},
///             "relationships": {"author": {"data": {"type": "user", "id": "2"}}}
///         }
///     })
/// );
/// # Ok::<(), jsonapi_normalizer::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    include_meta_to_common_namespace: bool,
    relationship_list: Option<String>,
}

impl Encoder {
    /// Creates an encoder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Preserves a relationship value's `meta` key inside its encoded
    /// `data`, next to `type` and `id`.
    #[must_use]
    pub fn include_meta_to_common_namespace(mut self, enabled: bool) -> Self {
        self.include_meta_to_common_namespace = enabled;
        self
    }

    /// Restricts relationship classification to the listed field names.
    ///
    /// The list is comma-separated; dotted paths contribute only their
    /// first segment (`"author.profile"` lists `author`).
    #[must_use]
    pub fn relationship_list(mut self, list: impl Into<String>) -> Self {
        self.relationship_list = Some(list.into());
        self
    }

    /// Encodes one flat resource, or an array of them, into a JSON:API
    /// document.
    ///
    /// The result is `additional_top_level ∪ {"data": ...}`; `data` keeps
    /// the single-object vs array shape of the input and wins on a key
    /// collision with `additional_top_level`.
    ///
    /// # Errors
    ///
    /// - [`NotADictionary`] when the input is neither an object nor an
    ///   array of objects
    /// - [`MissingIdentity`] when a resource lacks a string `type`/`id`,
    ///   or a listed relationship field does not carry an identity
    ///
    /// [`NotADictionary`]: crate::ErrorKind::NotADictionary
    /// [`MissingIdentity`]: crate::ErrorKind::MissingIdentity
    pub fn encode(
        &self,
        flat: &Value,
        additional_top_level: Option<&Map<String, Value>>,
    ) -> Result<Value> {
        let listed = self.listed_names();
        trace!(
            relationship_list = self.relationship_list.as_deref(),
            "encoding document"
        );

        let data = match flat {
            Value::Object(object) => self.encode_resource(object, listed.as_ref(), "/data")?,
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        let pointer = format!("/data/{i}");
                        let object = item.as_object().ok_or_else(|| {
                            Error::not_a_dictionary("resource is not an object")
                                .with_pointer(pointer.clone())
                        })?;
                        self.encode_resource(object, listed.as_ref(), &pointer)
                    })
                    .collect::<Result<Vec<_>>>()?,
            ),
            _ => {
                return Err(Error::not_a_dictionary(
                    "input must be an object or an array of objects",
                ));
            }
        };

        let mut out = additional_top_level.cloned().unwrap_or_default();
        out.insert("data".to_owned(), data);
        Ok(Value::Object(out))
    }

    /// First dot-segments of the relationship list, or `None` for
    /// duck-typed classification.
    fn listed_names(&self) -> Option<HashSet<&str>> {
        let list = self.relationship_list.as_deref()?;
        Some(
            list.split(',')
                .filter_map(|path| path.split('.').next())
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .collect(),
        )
    }

    fn encode_resource(
        &self,
        object: &Map<String, Value>,
        listed: Option<&HashSet<&str>>,
        pointer: &str,
    ) -> Result<Value> {
        let identity =
            ResourceIdentity::of_object(object).map_err(|e| e.with_pointer(pointer))?;

        let mut attributes = Map::new();
        let mut relationships = Map::new();

        for (key, value) in object {
            if key == "type" || key == "id" {
                continue;
            }
            let is_relationship = match listed {
                None => is_reference(value),
                Some(names) => names.contains(key.as_str()),
            };
            if is_relationship {
                let envelope =
                    self.reference_envelope(value, &format!("{pointer}/{key}"))?;
                relationships.insert(key.clone(), envelope);
            } else {
                attributes.insert(key.clone(), value.clone());
            }
        }

        let mut out = Map::new();
        out.insert("type".to_owned(), Value::String(identity.kind));
        out.insert("id".to_owned(), Value::String(identity.id));
        out.insert("attributes".to_owned(), Value::Object(attributes));
        if !relationships.is_empty() {
            out.insert("relationships".to_owned(), Value::Object(relationships));
        }
        Ok(Value::Object(out))
    }

    /// Rewrites a relationship value into `{data: ref | [ref] | null}`.
    fn reference_envelope(&self, value: &Value, pointer: &str) -> Result<Value> {
        let data = match value {
            Value::Null => Value::Null,
            Value::Object(_) => self.reference_data(value, pointer)?,
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| self.reference_data(item, &format!("{pointer}/{i}")))
                    .collect::<Result<Vec<_>>>()?,
            ),
            _ => {
                return Err(Error::missing_identity(
                    "relationship value must carry `type` and `id`",
                )
                .with_pointer(pointer));
            }
        };
        Ok(json!({"data": data}))
    }

    fn reference_data(&self, reference: &Value, pointer: &str) -> Result<Value> {
        let object = reference.as_object().ok_or_else(|| {
            Error::missing_identity("relationship value must carry `type` and `id`")
                .with_pointer(pointer)
        })?;
        let identity =
            ResourceIdentity::of_object(object).map_err(|e| e.with_pointer(pointer))?;

        let mut data = Map::new();
        data.insert("type".to_owned(), Value::String(identity.kind));
        data.insert("id".to_owned(), Value::String(identity.id));
        if self.include_meta_to_common_namespace {
            if let Some(meta) = object.get("meta") {
                data.insert("meta".to_owned(), meta.clone());
            }
        }
        Ok(Value::Object(data))
    }
}

/// Duck-typed relationship test: an object with both `type` and `id` keys,
/// or a non-empty array of such objects.
fn is_reference(value: &Value) -> bool {
    fn is_reference_object(value: &Value) -> bool {
        value
            .as_object()
            .is_some_and(|object| object.contains_key("type") && object.contains_key("id"))
    }

    match value {
        Value::Object(_) => is_reference_object(value),
        Value::Array(items) => !items.is_empty() && items.iter().all(is_reference_object),
        _ => false,
    }
}
