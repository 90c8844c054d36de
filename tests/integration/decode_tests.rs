//! Decode scenarios: both decode modes, stubs, dedup, and cycle safety.

use jsonapi_normalizer::Decoder;
use serde_json::{Value, json};

use crate::common::{blog_document, cyclic_document, post_document};

#[test]
fn test_concrete_post_scenario() {
    let resolved = Decoder::new()
        .decode(&post_document(), Some("author"))
        .unwrap();

    assert_eq!(
        resolved["data"],
        json!({
            "type": "post",
            "id": "1",
            "title": "T",
            "author": {"type": "user", "id": "2", "name": "Bob"}
        })
    );
}

#[test]
fn test_depth_control() {
    // "comments.author" expands comments, and each comment's author, and
    // nothing below: the author's own `profile` relationship stays absent.
    let resolved = Decoder::new()
        .decode(&blog_document(), Some("comments.author"))
        .unwrap();

    assert_eq!(
        resolved["data"],
        json!({
            "type": "article",
            "id": "10",
            "title": "Ten",
            "comments": [
                {
                    "type": "comment", "id": "5", "body": "first",
                    "author": {"type": "user", "id": "2", "name": "Bob"}
                },
                {
                    "type": "comment", "id": "6", "body": "second",
                    "author": null
                }
            ]
        })
    );
}

#[test]
fn test_depth_control_with_stubs() {
    let resolved = Decoder::new()
        .parse_not_included_relationships(true)
        .decode(&blog_document(), Some("comments.author"))
        .unwrap();
    let data = &resolved["data"];

    // Not in the include list: survives as a bare stub instead of dropping
    assert_eq!(data["author"], json!({"type": "user", "id": "2"}));
    // One level past the include list: stubbed, not expanded
    assert_eq!(
        data["comments"][0]["author"]["profile"],
        json!({"type": "profile", "id": "9"})
    );
    // Target missing from the document entirely: stubbed instead of null
    assert_eq!(
        data["comments"][1]["author"],
        json!({"type": "user", "id": "7"})
    );
}

#[test]
fn test_cycle_safety() {
    // user:1 -> friend -> user:2 -> friend -> user:1; the include tree
    // bounds expansion to exactly one level of `friend`.
    let resolved = Decoder::new()
        .decode(&cyclic_document(), Some("friend"))
        .unwrap();

    assert_eq!(
        resolved["data"],
        json!({
            "type": "user",
            "id": "1",
            "name": "Ann",
            "friend": {"type": "user", "id": "2", "name": "Bob"}
        })
    );
}

#[test]
fn test_cycle_safety_with_stubs() {
    let resolved = Decoder::new()
        .parse_not_included_relationships(true)
        .decode(&cyclic_document(), Some("friend"))
        .unwrap();

    assert_eq!(
        resolved["data"]["friend"]["friend"],
        json!({"type": "user", "id": "1"})
    );
}

#[test]
fn test_identity_dedup_later_definition_wins() {
    let document = json!({
        "data": [
            {
                "type": "post", "id": "1",
                "relationships": {"author": {"data": {"type": "user", "id": "2"}}}
            },
            {
                "type": "post", "id": "2",
                "relationships": {"author": {"data": {"type": "user", "id": "2"}}}
            },
            {"type": "user", "id": "2", "attributes": {"name": "Early"}}
        ],
        "included": [
            {"type": "user", "id": "2", "attributes": {"name": "Late"}}
        ]
    });

    let resolved = Decoder::new().decode(&document, Some("author")).unwrap();
    let posts = resolved["data"].as_array().unwrap();

    // Every reference to user:2 resolves to the same canonical copy, and
    // the later-encountered (included) definition is the one that wins.
    assert_eq!(posts[0]["author"]["name"], json!("Late"));
    assert_eq!(posts[0]["author"], posts[1]["author"]);
}

#[test]
fn test_missing_reference_resolves_to_null() {
    let mut document = post_document();
    document["included"] = json!([]);

    let resolved = Decoder::new().decode(&document, Some("author")).unwrap();
    assert_eq!(resolved["data"]["author"], Value::Null);
}

#[test]
fn test_missing_reference_resolves_to_stub_when_enabled() {
    let mut document = post_document();
    document["included"] = json!([]);

    let resolved = Decoder::new()
        .parse_not_included_relationships(true)
        .decode(&document, Some("author"))
        .unwrap();
    assert_eq!(resolved["data"]["author"], json!({"type": "user", "id": "2"}));
}

#[test]
fn test_not_included_relationship_is_dropped() {
    let resolved = Decoder::new()
        .decode(&blog_document(), Some("comments"))
        .unwrap();

    // `author` was not asked for, so the field is gone entirely
    assert!(resolved["data"].get("author").is_none());
    assert!(resolved["data"].get("comments").is_some());
}

#[test]
fn test_one_level_mode_expands_every_relationship() {
    let resolved = Decoder::new().decode(&blog_document(), None).unwrap();
    let data = &resolved["data"];

    // Both relationships expanded without any include list
    assert_eq!(data["author"]["name"], json!("Bob"));
    assert_eq!(data["comments"][0]["body"], json!("first"));

    // ...but exactly one level: the targets' own relationships are absent
    assert!(data["author"].get("profile").is_none());
    assert!(data["comments"][0].get("author").is_none());
}

#[test]
fn test_one_level_mode_stubs_nested_relationships_when_enabled() {
    let resolved = Decoder::new()
        .parse_not_included_relationships(true)
        .decode(&blog_document(), None)
        .unwrap();
    let data = &resolved["data"];

    assert_eq!(
        data["author"]["profile"],
        json!({"type": "profile", "id": "9"})
    );
    assert_eq!(
        data["comments"][0]["author"],
        json!({"type": "user", "id": "2"})
    );
}

#[test]
fn test_one_level_mode_missing_reference_is_null() {
    let document = json!({
        "data": {
            "type": "post", "id": "1",
            "relationships": {"author": {"data": {"type": "user", "id": "404"}}}
        }
    });
    let resolved = Decoder::new().decode(&document, None).unwrap();
    assert_eq!(resolved["data"]["author"], Value::Null);
}

#[test]
fn test_envelope_keys_survive_and_included_is_dropped() {
    let resolved = Decoder::new()
        .decode(&blog_document(), Some("author"))
        .unwrap();
    let envelope = resolved.as_object().unwrap();

    assert_eq!(envelope["meta"], json!({"total": 1}));
    assert_eq!(envelope["links"], json!({"self": "/articles/10"}));
    assert!(!envelope.contains_key("included"));
}

#[test]
fn test_array_data_keeps_array_shape() {
    let document = json!({
        "data": [
            {"type": "post", "id": "1", "attributes": {"title": "A"}},
            {"type": "post", "id": "2", "attributes": {"title": "B"}}
        ]
    });
    let resolved = Decoder::new().decode(&document, Some("author")).unwrap();

    assert_eq!(
        resolved["data"],
        json!([
            {"type": "post", "id": "1", "title": "A"},
            {"type": "post", "id": "2", "title": "B"}
        ])
    );
}

#[test]
fn test_to_many_relationship_keeps_array_shape() {
    let document = json!({
        "data": {
            "type": "post", "id": "1",
            "relationships": {"tags": {"data": [{"type": "tag", "id": "3"}]}}
        },
        "included": [{"type": "tag", "id": "3", "attributes": {"label": "rust"}}]
    });
    let resolved = Decoder::new().decode(&document, Some("tags")).unwrap();

    assert_eq!(
        resolved["data"]["tags"],
        json!([{"type": "tag", "id": "3", "label": "rust"}])
    );
}

#[test]
fn test_empty_to_many_relationship_stays_empty() {
    let document = json!({
        "data": {
            "type": "post", "id": "1",
            "relationships": {"tags": {"data": []}}
        }
    });
    let resolved = Decoder::new().decode(&document, Some("tags")).unwrap();
    assert_eq!(resolved["data"]["tags"], json!([]));
}
