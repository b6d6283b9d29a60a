//! Composite Record Accessors
//!
//! Read-only view over the aggregated listening record. The question
//! modules go through this instead of indexing raw JSON at every call
//! site; absent or oddly-shaped fields read as empty.

use serde_json::Value;

/// Accessor view over one user's composite listening record
#[derive(Clone, Copy)]
pub struct RoastData<'a> {
    value: &'a Value,
}

impl<'a> RoastData<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    /// The raw record, for prompt digests
    pub fn raw(&self) -> &'a Value {
        self.value
    }

    /// Last.fm username, or a neutral stand-in when missing
    pub fn username(&self) -> &'a str {
        self.value["userInfo"]["name"].as_str().unwrap_or("you")
    }

    /// Lifetime scrobble count. Last.fm serializes counts as strings,
    /// so both number and numeric-string forms are accepted.
    pub fn play_count(&self) -> u64 {
        let count = &self.value["userInfo"]["playcount"];
        count
            .as_u64()
            .or_else(|| count.as_str().and_then(|s| s.parse().ok()))
            .unwrap_or(0)
    }

    pub fn top_albums(&self) -> Vec<&'a Value> {
        list(&self.value["topAlbums"]["album"])
    }

    pub fn top_tracks(&self) -> Vec<&'a Value> {
        list(&self.value["topTracks"]["track"])
    }

    pub fn top_artists(&self) -> Vec<&'a Value> {
        list(&self.value["topArtists"]["artist"])
    }

    pub fn recent_tracks(&self) -> Vec<&'a Value> {
        list(&self.value["recentTracks"]["track"])
    }

    pub fn loved_tracks(&self) -> Vec<&'a Value> {
        list(&self.value["lovedTracks"]["track"])
    }
}

/// Read a Last.fm list field. Single items are serialized as a bare
/// object rather than a one-element array, so both forms are accepted.
fn list(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(_) => vec![value],
        _ => Vec::new(),
    }
}

/// Track or album display label: `Name` by `Artist` when the artist is
/// known, the bare name otherwise.
pub fn entry_label(entry: &Value) -> Option<String> {
    let name = entry["name"].as_str()?;
    let artist = entry["artist"]["name"]
        .as_str()
        .or_else(|| entry["artist"]["#text"].as_str())
        .or_else(|| entry["artist"].as_str());
    match artist {
        Some(artist) => Some(format!("{} by {}", name, artist)),
        None => Some(name.to_string()),
    }
}
