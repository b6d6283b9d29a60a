//! Roast Conversation Types
//!
//! Wire types for the conversation-step endpoint. All conversation state
//! is round-tripped through the client, so everything here serializes
//! with the field names the browser sees.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// States of the conversation, in the order a full run visits them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoastStep {
    #[serde(rename = "ready")]
    Ready,
    #[serde(rename = "typing_intro")]
    Intro,
    #[serde(rename = "ask_albums")]
    AskAlbums,
    #[serde(rename = "ask_tracks")]
    AskTracks,
    #[serde(rename = "ask_artists")]
    AskArtists,
    #[serde(rename = "ask_obscurity")]
    AskObscurity,
    #[serde(rename = "ask_recent")]
    AskRecent,
    #[serde(rename = "ask_loved")]
    AskLoved,
    #[serde(rename = "final")]
    Final,
    #[serde(rename = "complete")]
    Complete,
}

/// The closed set of question modules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Albums,
    Tracks,
    Artists,
    Obscurity,
    Recent,
    Loved,
}

impl QuestionKind {
    /// Every kind, in declaration order
    pub const ALL: [QuestionKind; 6] = [
        QuestionKind::Albums,
        QuestionKind::Tracks,
        QuestionKind::Artists,
        QuestionKind::Obscurity,
        QuestionKind::Recent,
        QuestionKind::Loved,
    ];

    /// The conversation step that presents this question
    pub fn step(&self) -> RoastStep {
        match self {
            Self::Albums => RoastStep::AskAlbums,
            Self::Tracks => RoastStep::AskTracks,
            Self::Artists => RoastStep::AskArtists,
            Self::Obscurity => RoastStep::AskObscurity,
            Self::Recent => RoastStep::AskRecent,
            Self::Loved => RoastStep::AskLoved,
        }
    }

    /// The kind a question step belongs to, if it is one
    pub fn for_step(step: RoastStep) -> Option<QuestionKind> {
        match step {
            RoastStep::AskAlbums => Some(Self::Albums),
            RoastStep::AskTracks => Some(Self::Tracks),
            RoastStep::AskArtists => Some(Self::Artists),
            RoastStep::AskObscurity => Some(Self::Obscurity),
            RoastStep::AskRecent => Some(Self::Recent),
            RoastStep::AskLoved => Some(Self::Loved),
            _ => None,
        }
    }
}

/// One selectable answer presented to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub text: String,
    pub value: String,
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Choice {
    pub fn new(text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: value.into(),
            image_url: None,
        }
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

/// A question module's produced descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(rename = "nextStep")]
    pub next_step: RoastStep,
    #[serde(rename = "botMessage")]
    pub bot_message: String,
    pub choices: Vec<Choice>,
}

/// One question/answer exchange already played out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub user_choice: String,
    pub bot_message: String,
}

/// Request body of the conversation-step endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRequest {
    pub step: RoastStep,
    #[serde(default)]
    pub choice: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(rename = "roastData", default)]
    pub roast_data: Option<Value>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(rename = "questionQueue", default)]
    pub question_queue: Vec<QuestionKind>,
}

/// Response body of the conversation-step endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResponse {
    #[serde(rename = "nextStep")]
    pub next_step: RoastStep,
    #[serde(rename = "botMessage")]
    pub bot_message: String,
    pub choices: Vec<Choice>,
    #[serde(rename = "questionQueue")]
    pub question_queue: Vec<QuestionKind>,
}
