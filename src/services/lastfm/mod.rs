//! Last.fm Integration
//!
//! Everything that talks to the Last.fm API: request signing, the REST
//! client, the response sanitizer, and the aggregator that assembles the
//! composite listening record a roast conversation runs against.

pub mod aggregate;
pub mod client;
pub mod sanitize;
pub mod signature;

pub use aggregate::fetch_roast_data;
pub use client::{LastfmClient, LastfmError, LastfmResult, Session};
pub use sanitize::sanitize;
pub use signature::api_signature;
