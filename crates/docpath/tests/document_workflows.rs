use docpath::key::{implies_key, to_bracketed, to_generic};
use docpath::{
    expand, flatten, get_at_key, report_nulls, sanitize, set_at_path, DocumentError,
    FlattenOptions, SanitizeOptions,
};
use serde_json::{json, Value};

#[test]
fn rebuild_document_from_positions() {
    let mut doc = json!({});
    let entries = [
        ("name", json!("widget")),
        ("tags[0]", json!("a")),
        ("tags[1]", json!("b")),
        ("dims[w]", json!(3)),
        ("parts[0][id]", json!(7)),
        ("parts[0][labels][0]", json!("x")),
    ];
    for (position, value) in entries {
        set_at_path(&mut doc, position, Some(value)).expect("well formed");
    }
    assert_eq!(
        doc,
        json!({
            "name": "widget",
            "tags": ["a", "b"],
            "dims": {"w": 3},
            "parts": [{"id": 7, "labels": ["x"]}],
        })
    );

    set_at_path(&mut doc, "parts[0][labels]", None).unwrap();
    assert_eq!(doc["parts"], json!([{"id": 7}]));
}

#[test]
fn flatten_classify_and_expand() {
    let doc = json!({"a": [{"b": 1}, {"b": 2}], "c": {"d": "x"}});
    let flat = flatten(&doc, FlattenOptions::default());

    let generic: Vec<String> = flat.keys().map(|key| to_generic(key)).collect();
    assert_eq!(generic, vec!["a.$.b", "a.$.b", "c.d"]);

    // Every flat key falls under the schema key that covers it
    for key in flat.keys() {
        assert!(implies_key("a.$", key) || implies_key("c", key), "{}", key);
    }

    assert_eq!(expand(&flat), doc);
}

#[test]
fn sanitize_then_report() {
    let doc = json!({
        "title": "",
        "body": "text",
        "meta": {"author": null, "tags": [null, ""]},
        "scores": [null, 3],
    });
    let cleaned = sanitize(&doc, SanitizeOptions::default());
    assert_eq!(cleaned, json!({"body": "text", "scores": [3]}));

    let flat = flatten(&doc, FlattenOptions { keep_arrays: true });
    let nulls = report_nulls(&flat, SanitizeOptions::default());
    assert_eq!(
        Value::Object(nulls),
        json!({"title": "", "meta.author": "", "meta.tags": ""})
    );
}

#[test]
fn dotted_keys_address_built_documents() {
    let mut doc = json!({});
    let key = "a.0.b";
    set_at_path(&mut doc, &to_bracketed(key, false), Some(json!(true))).unwrap();
    assert_eq!(get_at_key(&doc, key).unwrap(), Some(&json!(true)));
    assert_eq!(get_at_key(&doc, "a.1.b").unwrap(), None);
}

#[test]
fn builder_errors_keep_containers_created_so_far() {
    let mut doc = json!({"a": "scalar"});
    assert_eq!(
        set_at_path(&mut doc, "a[b]", Some(json!(1))),
        Err(DocumentError::NotContainer("b".to_string()))
    );

    // "1x" starts like an integer, so an array is created before the index
    // is rejected
    assert_eq!(
        set_at_path(&mut doc, "q[1x][r]", Some(json!(1))),
        Err(DocumentError::InvalidIndex("1x".to_string()))
    );
    assert_eq!(doc, json!({"a": "scalar", "q": []}));
}
