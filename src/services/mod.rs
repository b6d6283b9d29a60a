//! Services
//!
//! Business logic behind the HTTP surface: the Last.fm client and
//! aggregation, the completion provider, and the roast conversation.

pub mod lastfm;
pub mod llm;
pub mod roast;

pub use lastfm::LastfmClient;
pub use llm::OpenAiClient;
