//! Sanitizer and Signature Property Tests
//!
//! The sanitizer is a recursive walk over untrusted upstream JSON, so it
//! gets property coverage over arbitrary nested shapes rather than a
//! handful of fixtures. Key generation is biased toward the names the
//! walker treats specially so the interesting branches actually run.

use proptest::prelude::*;
use serde_json::{json, Map, Value};

use roastfm::services::lastfm::{api_signature, sanitize};

const DENIED_KEYS: [&str; 4] = ["image", "similar", "streamable", "mbid"];

fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("image".to_string()),
        Just("similar".to_string()),
        Just("streamable".to_string()),
        Just("mbid".to_string()),
        Just("bio".to_string()),
        Just("summary".to_string()),
        Just("tag".to_string()),
        Just("tags".to_string()),
        Just("name".to_string()),
        Just("content".to_string()),
        "[a-z]{1,8}",
    ]
}

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        "[ -~]{0,24}".prop_map(Value::String),
        Just(Value::String(
            "Blurb. <a href=\"https://last.fm\">Read more</a>".to_string(),
        )),
    ];
    leaf.prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::vec((arb_key(), inner), 0..5).prop_map(|entries| {
                Value::Object(entries.into_iter().collect::<Map<_, _>>())
            }),
        ]
    })
}

fn contains_denied_key(value: &Value) -> bool {
    match value {
        Value::Object(map) => map
            .iter()
            .any(|(k, v)| DENIED_KEYS.contains(&k.as_str()) || contains_denied_key(v)),
        Value::Array(items) => items.iter().any(contains_denied_key),
        _ => false,
    }
}

proptest! {
    /// Denied keys never survive, at any nesting depth.
    #[test]
    fn sanitize_never_emits_denied_keys(value in arb_json()) {
        prop_assert!(!contains_denied_key(&sanitize(&value)));
    }

    /// A second pass over already-sanitized output is a no-op.
    #[test]
    fn sanitize_is_idempotent(value in arb_json()) {
        let once = sanitize(&value);
        let twice = sanitize(&once);
        prop_assert_eq!(twice, once);
    }

    /// Parameter order never changes the digest.
    #[test]
    fn signature_is_order_independent(
        pairs in prop::collection::vec(("[a-z]{1,6}", "[a-zA-Z0-9]{0,8}"), 0..8),
        secret in "[a-z]{4,12}",
    ) {
        let mut reversed = pairs.clone();
        reversed.reverse();
        prop_assert_eq!(api_signature(&pairs, &secret), api_signature(&reversed, &secret));
    }

    /// Digests are always 32 lowercase hex characters.
    #[test]
    fn signature_is_lowercase_hex(
        pairs in prop::collection::vec(("[a-z]{1,6}", "[a-zA-Z0-9]{0,8}"), 0..8),
        secret in "[a-z]{0,12}",
    ) {
        let sig = api_signature(&pairs, &secret);
        prop_assert_eq!(sig.len(), 32);
        prop_assert!(sig.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }
}
