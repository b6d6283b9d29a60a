//! Album Question
//!
//! Shows four of the listener's most-played albums and asks which one
//! they actually reach for. The prompt and per-album quips are punched up
//! by the completion endpoint when it is available.

use serde_json::Value;

use crate::services::llm::{ChatMessage, CompletionProvider, LlmError, LlmResult};
use crate::services::roast::prompts;
use crate::services::roast::record::{entry_label, RoastData};
use crate::services::roast::types::{Choice, HistoryEntry, Question, QuestionKind, RoastStep};

/// The question always presents exactly this many albums
const ALBUM_CHOICES: usize = 4;

pub fn is_viable(record: &RoastData) -> bool {
    record.top_albums().len() >= ALBUM_CHOICES
}

pub async fn build(record: &RoastData<'_>, provider: &dyn CompletionProvider) -> Option<Question> {
    let albums = record.top_albums();
    let picks: Vec<&Value> = albums.into_iter().take(ALBUM_CHOICES).collect();
    let labels: Vec<String> = picks.iter().map(|album| entry_label(album)).collect::<Option<_>>()?;
    if labels.len() < ALBUM_CHOICES {
        return None;
    }

    let (question, texts) = match generated_question(&labels, provider).await {
        Ok(parts) => parts,
        Err(e) => {
            tracing::warn!("Album question falling back to canned text: {}", e);
            fallback_question(&labels)
        }
    };

    let choices = picks
        .iter()
        .zip(labels.iter().zip(texts.iter()))
        .map(|(album, (label, text))| {
            let mut choice = Choice::new(text.clone(), label.clone());
            if let Some(url) = album_image(album) {
                choice = choice.with_image(url);
            }
            choice
        })
        .collect();

    Some(Question {
        kind: QuestionKind::Albums,
        next_step: RoastStep::AskAlbums,
        bot_message: question,
        choices,
    })
}

/// React to the album pick. LLM-written, canned on failure.
pub async fn reply(
    choice: &str,
    record: &RoastData<'_>,
    history: &[HistoryEntry],
    provider: &dyn CompletionProvider,
) -> String {
    let messages = prompts::reply_messages(
        "You asked which of their four most-played albums they actually reach for.",
        choice,
        record.raw(),
        history,
    );
    match provider.complete(&messages).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("Album reply falling back to canned text: {}", e);
            format!("{}. Of course. The most predictable pick on the board.", choice)
        }
    }
}

/// Ask the endpoint for a punchier question plus one quip per album.
/// Expected shape: `{"question": string, "choices": [four strings]}`.
async fn generated_question(
    labels: &[String],
    provider: &dyn CompletionProvider,
) -> LlmResult<(String, Vec<String>)> {
    let prompt = format!(
        "These are the listener's four most-played albums, in order:\n{}\n\
         Write a question asking which one they actually reach for, plus a \
         short sardonic quip for each album. Respond as JSON: \
         {{\"question\": string, \"choices\": [four strings, same order]}}.",
        labels.join("\n")
    );
    let payload = provider
        .complete_json(&[ChatMessage::system(prompts::PERSONA), ChatMessage::user(prompt)])
        .await?;
    parse_generated(&payload).ok_or_else(|| LlmError::Parse {
        message: "Album question payload had the wrong shape".to_string(),
    })
}

fn parse_generated(payload: &Value) -> Option<(String, Vec<String>)> {
    let question = payload["question"].as_str()?.trim().to_string();
    if question.is_empty() {
        return None;
    }
    let texts: Vec<String> = payload["choices"]
        .as_array()?
        .iter()
        .filter_map(|c| c.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if texts.len() != ALBUM_CHOICES {
        return None;
    }
    Some((question, texts))
}

fn fallback_question(labels: &[String]) -> (String, Vec<String>) {
    (
        "Four albums you apparently cannot stop playing. Which one do you \
         actually reach for?"
            .to_string(),
        labels.to_vec(),
    )
}

/// Largest usable cover image, preferring Last.fm's "large" size
fn album_image(album: &Value) -> Option<&str> {
    let images = album["image"].as_array()?;
    images
        .iter()
        .find(|img| img["size"] == "large")
        .or_else(|| images.last())
        .and_then(|img| img["#text"].as_str())
        .filter(|url| !url.is_empty())
}
