//! Last.fm Response Sanitizer
//!
//! Strips the noisy parts of Last.fm payloads before they are fed to the
//! roast prompts: image URL lists, similarity graphs, streamable flags and
//! MusicBrainz identifiers at any depth, long-form biography text, and the
//! trailing "Read more" link Last.fm appends to wiki summaries. Tag-list
//! wrapper objects are collapsed to a comma-joined string of tag names.

use serde_json::{Map, Value};

/// Keys dropped wherever they appear.
const DENIED_KEYS: [&str; 4] = ["image", "similar", "streamable", "mbid"];

/// Tag lists are collapsed to at most this many names.
const MAX_TAG_NAMES: usize = 15;

/// Everything from this marker on is the "Read more" suffix.
const READ_MORE_MARKER: &str = "<a href=";

/// Recursively sanitize a Last.fm payload.
///
/// Pure and idempotent: running the transform twice yields the same value
/// as running it once. Unknown shapes pass through untouched, so the
/// walker is safe on any upstream response.
pub fn sanitize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, entry) in map {
                if DENIED_KEYS.contains(&key.as_str()) {
                    continue;
                }
                if let Some(flattened) = flatten_tag_list(entry) {
                    out.insert(key.clone(), Value::String(flattened));
                    continue;
                }
                let cleaned = match (key.as_str(), entry) {
                    ("bio", Value::Object(bio)) => sanitize_bio(bio),
                    ("summary", Value::String(text)) => Value::String(strip_read_more(text)),
                    (_, nested) => sanitize(nested),
                };
                out.insert(key.clone(), cleaned);
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(sanitize).collect()),
        Value::String(_) | Value::Number(_) | Value::Bool(_) | Value::Null => value.clone(),
    }
}

/// Drop the long-form `content` field but keep the bio's other members
/// (published date, summary, links) subject to the normal walk.
fn sanitize_bio(bio: &Map<String, Value>) -> Value {
    let mut trimmed = bio.clone();
    trimmed.remove("content");
    sanitize(&Value::Object(trimmed))
}

/// Collapse a tag-list wrapper (`{"tag": [...]}`) to a comma-joined string
/// of the first [`MAX_TAG_NAMES`] tag names. Last.fm serializes a single
/// tag as a bare object rather than a one-element array, so both forms are
/// accepted. Returns `None` when the value is not tag-list shaped.
fn flatten_tag_list(value: &Value) -> Option<String> {
    let container = value.as_object()?;
    let names: Vec<&str> = match container.get("tag")? {
        Value::Array(items) => items
            .iter()
            .filter_map(tag_name)
            .take(MAX_TAG_NAMES)
            .collect(),
        single @ Value::Object(_) => tag_name(single).into_iter().collect(),
        Value::String(name) => vec![name.as_str()],
        _ => return None,
    };
    Some(names.join(", "))
}

fn tag_name(tag: &Value) -> Option<&str> {
    match tag {
        Value::Object(map) => map.get("name")?.as_str(),
        Value::String(name) => Some(name.as_str()),
        _ => None,
    }
}

fn strip_read_more(text: &str) -> String {
    match text.find(READ_MORE_MARKER) {
        Some(idx) => text[..idx].trim_end().to_string(),
        None => text.to_string(),
    }
}
