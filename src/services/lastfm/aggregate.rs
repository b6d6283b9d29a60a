//! Roast Data Aggregator
//!
//! Fans out the full set of listening-history queries for one user and
//! merges them into the single composite record the roast conversation
//! feeds on. The ten profile queries run concurrently; once top artists
//! resolve, each of the first five gets two concurrent detail lookups.
//! Any failure fails the whole round.

use futures_util::future::try_join_all;
use serde_json::{json, Value};

use super::client::{LastfmClient, LastfmResult};

/// Number of top artists enriched with detail + tag lookups
const ENRICHED_ARTIST_COUNT: usize = 5;

/// One round of resolved profile queries, prior to merging
struct AggregationRound {
    user_info: Value,
    top_artists: Value,
    top_tracks: Value,
    top_albums: Value,
    loved_tracks: Value,
    recent_tracks: Value,
    user_top_tags: Value,
    weekly_album_chart: Value,
    weekly_artist_chart: Value,
    weekly_track_chart: Value,
}

/// Build the composite listening record for `user`.
pub async fn fetch_roast_data(client: &LastfmClient, user: &str) -> LastfmResult<Value> {
    let (
        user_info,
        top_artists,
        top_tracks,
        top_albums,
        loved_tracks,
        recent_tracks,
        user_top_tags,
        weekly_album_chart,
        weekly_artist_chart,
        weekly_track_chart,
    ) = tokio::try_join!(
        client.call("user.getInfo", &[("user", user)]),
        client.call("user.getTopArtists", &[("user", user), ("limit", "10")]),
        client.call("user.getTopTracks", &[("user", user), ("limit", "20")]),
        client.call("user.getTopAlbums", &[("user", user), ("limit", "10")]),
        client.call("user.getLovedTracks", &[("user", user), ("limit", "20")]),
        client.call(
            "user.getRecentTracks",
            &[("user", user), ("limit", "20"), ("extended", "1")],
        ),
        client.call("user.getTopTags", &[("user", user), ("limit", "10")]),
        client.call("user.getWeeklyAlbumChart", &[("user", user)]),
        client.call("user.getWeeklyArtistChart", &[("user", user)]),
        client.call("user.getWeeklyTrackChart", &[("user", user)]),
    )?;

    let round = AggregationRound {
        user_info,
        top_artists,
        top_tracks,
        top_albums,
        loved_tracks,
        recent_tracks,
        user_top_tags,
        weekly_album_chart,
        weekly_artist_chart,
        weekly_track_chart,
    };

    let enriched = enrich_artists(client, enrichment_targets(&round.top_artists)).await?;
    tracing::info!(user, artists = enriched.len(), "Aggregated listening data");

    Ok(merge_round(round, enriched))
}

/// The artists that get detail lookups: the first five of the top list.
fn enrichment_targets(top_artists: &Value) -> &[Value] {
    let entries = top_artists["topartists"]["artist"]
        .as_array()
        .map(Vec::as_slice)
        .unwrap_or(&[]);
    &entries[..entries.len().min(ENRICHED_ARTIST_COUNT)]
}

/// Two concurrent lookups per artist, all pairs awaited jointly.
async fn enrich_artists(client: &LastfmClient, artists: &[Value]) -> LastfmResult<Vec<Value>> {
    let lookups = artists.iter().map(|artist| {
        let name = artist["name"].as_str().unwrap_or_default();
        async move {
            let (info, tags) = tokio::try_join!(
                client.call("artist.getInfo", &[("artist", name)]),
                client.call("artist.getTopTags", &[("artist", name)]),
            )?;
            Ok(attach_details(artist, &info, &tags))
        }
    });
    try_join_all(lookups).await
}

/// Extend one artist object with `details` and `tags` from its lookups.
fn attach_details(artist: &Value, info: &Value, tags: &Value) -> Value {
    let mut enriched = artist.clone();
    if let Value::Object(map) = &mut enriched {
        map.insert("details".to_string(), info["artist"].clone());
        map.insert("tags".to_string(), tags["toptags"].clone());
    }
    enriched
}

/// Merge a resolved round into the composite record, unwrapping each
/// payload's single top-level field and substituting the enriched artists.
fn merge_round(round: AggregationRound, enriched_artists: Vec<Value>) -> Value {
    let mut top_artists = round.top_artists["topartists"].clone();
    if !top_artists.is_object() {
        top_artists = json!({});
    }
    top_artists["artist"] = Value::Array(enriched_artists);

    json!({
        "userInfo": round.user_info["user"],
        "topArtists": top_artists,
        "topTracks": round.top_tracks["toptracks"],
        "topAlbums": round.top_albums["topalbums"],
        "lovedTracks": round.loved_tracks["lovedtracks"],
        "recentTracks": round.recent_tracks["recenttracks"],
        "userTopTags": round.user_top_tags["toptags"],
        "weeklyAlbumChart": round.weekly_album_chart["weeklyalbumchart"],
        "weeklyArtistChart": round.weekly_artist_chart["weeklyartistchart"],
        "weeklyTrackChart": round.weekly_track_chart["weeklytrackchart"],
    })
}
