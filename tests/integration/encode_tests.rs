//! Encode scenarios: field classification, meta handling, and envelopes.

use jsonapi_normalizer::Encoder;
use serde_json::json;

#[test]
fn test_duck_typed_field_is_relationship() {
    // Shaped like a reference (has type and id), so the extra key does not
    // make it an attribute
    let flat = json!({
        "type": "post", "id": "1",
        "favorite": {"type": "x", "id": "1", "extra": "y"}
    });
    let document = Encoder::new().encode(&flat, None).unwrap();

    assert_eq!(
        document["data"]["relationships"]["favorite"],
        json!({"data": {"type": "x", "id": "1"}})
    );
    assert_eq!(document["data"]["attributes"], json!({}));
}

#[test]
fn test_explicit_list_demotes_unlisted_reference() {
    // The same reference-shaped field stays an attribute when the list
    // does not name it
    let flat = json!({
        "type": "post", "id": "1",
        "favorite": {"type": "x", "id": "1", "extra": "y"}
    });
    let document = Encoder::new()
        .relationship_list("comments")
        .encode(&flat, None)
        .unwrap();

    assert_eq!(
        document["data"]["attributes"]["favorite"],
        json!({"type": "x", "id": "1", "extra": "y"})
    );
    assert!(document["data"].get("relationships").is_none());
}

#[test]
fn test_attributes_and_relationships_partition() {
    let flat = json!({
        "type": "post", "id": "1",
        "title": "T",
        "views": 7,
        "author": {"type": "user", "id": "2", "name": "Bob"},
        "tags": [{"type": "tag", "id": "3"}, {"type": "tag", "id": "4"}]
    });
    let document = Encoder::new().encode(&flat, None).unwrap();

    assert_eq!(
        document,
        json!({
            "data": {
                "type": "post",
                "id": "1",
                "attributes": {"title": "T", "views": 7},
                "relationships": {
                    "author": {"data": {"type": "user", "id": "2"}},
                    "tags": {"data": [{"type": "tag", "id": "3"}, {"type": "tag", "id": "4"}]}
                }
            }
        })
    );
}

#[test]
fn test_empty_array_is_attribute_in_duck_mode() {
    let flat = json!({"type": "post", "id": "1", "tags": []});
    let document = Encoder::new().encode(&flat, None).unwrap();
    assert_eq!(document["data"]["attributes"]["tags"], json!([]));
}

#[test]
fn test_empty_array_is_relationship_when_listed() {
    let flat = json!({"type": "post", "id": "1", "tags": []});
    let document = Encoder::new()
        .relationship_list("tags")
        .encode(&flat, None)
        .unwrap();
    assert_eq!(
        document["data"]["relationships"]["tags"],
        json!({"data": []})
    );
}

#[test]
fn test_meta_is_dropped_by_default() {
    let flat = json!({
        "type": "post", "id": "1",
        "author": {"type": "user", "id": "2", "meta": {"pinned": true}}
    });
    let document = Encoder::new().encode(&flat, None).unwrap();
    assert_eq!(
        document["data"]["relationships"]["author"],
        json!({"data": {"type": "user", "id": "2"}})
    );
}

#[test]
fn test_meta_kept_in_common_namespace() {
    let flat = json!({
        "type": "post", "id": "1",
        "author": {"type": "user", "id": "2", "meta": {"pinned": true}}
    });
    let document = Encoder::new()
        .include_meta_to_common_namespace(true)
        .encode(&flat, None)
        .unwrap();
    assert_eq!(
        document["data"]["relationships"]["author"],
        json!({"data": {"type": "user", "id": "2", "meta": {"pinned": true}}})
    );
}

#[test]
fn test_additional_top_level_keys_are_merged() {
    let flat = json!({"type": "post", "id": "1", "title": "T"});
    let extra = json!({"meta": {"client": "mobile"}, "data": "overwritten"});

    let document = Encoder::new()
        .encode(&flat, extra.as_object())
        .unwrap();

    assert_eq!(document["meta"], json!({"client": "mobile"}));
    // The encoded data wins over a colliding top-level key
    assert_eq!(document["data"]["attributes"], json!({"title": "T"}));
}

#[test]
fn test_encode_array_of_resources() {
    let flat = json!([
        {"type": "post", "id": "1", "title": "A"},
        {"type": "post", "id": "2", "title": "B"}
    ]);
    let document = Encoder::new().encode(&flat, None).unwrap();

    assert_eq!(
        document["data"],
        json!([
            {"type": "post", "id": "1", "attributes": {"title": "A"}},
            {"type": "post", "id": "2", "attributes": {"title": "B"}}
        ])
    );
}
