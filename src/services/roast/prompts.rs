//! Roast Prompts
//!
//! The host's voice: the persona sent with every completion call, the
//! canned lines used when the completion endpoint is unavailable, and the
//! message builders for LLM-written replies and judgments.

use serde_json::Value;

use super::types::HistoryEntry;
use crate::services::lastfm::sanitize;
use crate::services::llm::ChatMessage;

/// System persona sent with every completion request
pub const PERSONA: &str = "You are the host of Roast.fm, a terminally \
unimpressed music critic reviewing one listener's Last.fm history. Be \
witty, specific, and merciless about their listening data, never cruel \
about the person. Keep every reply under 80 words and never break \
character.";

/// Opening line of the conversation
pub fn intro_message(user: &str) -> String {
    format!(
        "Well, well. {}. I've had a look at your Last.fm history, and \
         frankly, I have questions. Let's get through this together, shall we?",
        user
    )
}

/// Shown when no question module is viable against the record
pub fn empty_queue_message() -> &'static str {
    "I'd roast your listening history, but there barely is one. \
     Go scrobble something first, then we'll talk."
}

/// Closing line once the verdict has been delivered
pub fn dismissal_message() -> &'static str {
    "That's all the judgment you can afford today. \
     Go listen to something interesting for once."
}

/// Deterministic verdict used when the completion endpoint fails
pub fn fallback_final_judgment(user: &str) -> String {
    format!(
        "Verdict: {}, your library is the sonic equivalent of beige \
         wallpaper. Reliable, inoffensive, and exactly what I expected. \
         Case closed.",
        user
    )
}

/// Flatten the played-out exchanges into prompt-ready lines
pub fn history_transcript(history: &[HistoryEntry]) -> String {
    history
        .iter()
        .map(|entry| {
            format!(
                "Host: {}\nListener: {}",
                entry.bot_message, entry.user_choice
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Sanitized record rendered for prompt embedding. The sanitizer keeps
/// the digest small enough to inline into a completion request.
pub fn record_digest(record: &Value) -> String {
    sanitize(record).to_string()
}

/// Messages asking for a reaction to the listener's latest answer.
/// `context` is one module-supplied line describing what was asked.
pub fn reply_messages(
    context: &str,
    choice: &str,
    record: &Value,
    history: &[HistoryEntry],
) -> Vec<ChatMessage> {
    let prompt = format!(
        "{}\nThe listener just answered: \"{}\".\nReact in character in one \
         or two sentences. Do not ask a new question.\n\n\
         Earlier exchanges:\n{}\n\nListening data:\n{}",
        context,
        choice,
        history_transcript(history),
        record_digest(record)
    );
    vec![ChatMessage::system(PERSONA), ChatMessage::user(prompt)]
}

/// Messages asking for the closing verdict on the whole conversation
pub fn final_judgment_messages(record: &Value, history: &[HistoryEntry]) -> Vec<ChatMessage> {
    let prompt = format!(
        "The interrogation is over. Using the listener's data and their \
         answers below, deliver your closing verdict on their taste: two or \
         three sentences, specific, final. No new questions.\n\n\
         Answers so far:\n{}\n\nListening data:\n{}",
        history_transcript(history),
        record_digest(record)
    );
    vec![ChatMessage::system(PERSONA), ChatMessage::user(prompt)]
}
