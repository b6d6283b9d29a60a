//! Obscurity Question
//!
//! Asks the listener where they place themselves on the
//! mainstream-to-obscure scale, then compares the answer against what
//! their charts actually say. The two pole labels are punched up by the
//! completion endpoint when it is available.

use serde_json::Value;

use crate::services::llm::{ChatMessage, CompletionProvider, LlmError, LlmResult};
use crate::services::roast::prompts;
use crate::services::roast::record::RoastData;
use crate::services::roast::types::{Choice, HistoryEntry, Question, QuestionKind, RoastStep};

pub fn is_viable(record: &RoastData) -> bool {
    record.play_count() > 0
}

pub async fn build(record: &RoastData<'_>, provider: &dyn CompletionProvider) -> Option<Question> {
    let (question, label_0, label_100) = match generated_question(record, provider).await {
        Ok(parts) => parts,
        Err(e) => {
            tracing::warn!("Obscurity question falling back to canned text: {}", e);
            fallback_question()
        }
    };

    Some(Question {
        kind: QuestionKind::Obscurity,
        next_step: RoastStep::AskObscurity,
        bot_message: question,
        choices: vec![
            Choice::new(label_0, "0"),
            Choice::new("Somewhere respectable", "33"),
            Choice::new("Deeper than most", "66"),
            Choice::new(label_100, "100"),
        ],
    })
}

/// React to the self-assessment. The endpoint gets the full record, so it
/// can contrast the claimed score with the actual charts.
pub async fn reply(
    choice: &str,
    record: &RoastData<'_>,
    history: &[HistoryEntry],
    provider: &dyn CompletionProvider,
) -> String {
    let context = format!(
        "You asked them to rate their taste from 0 (pure mainstream) to 100 \
         (deeply obscure). They claimed {}. Compare that against their actual \
         charts.",
        choice
    );
    let messages = prompts::reply_messages(&context, choice, record.raw(), history);
    match provider.complete(&messages).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("Obscurity reply falling back to canned text: {}", e);
            format!(
                "A self-score of {}. The charts and I had a quiet laugh about \
                 that one.",
                choice
            )
        }
    }
}

/// Expected shape: `{"question": string, "label_0": string, "label_100": string}`.
async fn generated_question(
    record: &RoastData<'_>,
    provider: &dyn CompletionProvider,
) -> LlmResult<(String, String, String)> {
    let prompt = format!(
        "This listener has {} scrobbles. Write a question asking them to \
         rate how obscure their taste is on a 0 to 100 scale, plus a label \
         for each pole. Respond as JSON: {{\"question\": string, \
         \"label_0\": string for the mainstream pole, \"label_100\": string \
         for the obscure pole}}.",
        record.play_count()
    );
    let payload = provider
        .complete_json(&[ChatMessage::system(prompts::PERSONA), ChatMessage::user(prompt)])
        .await?;
    parse_generated(&payload).ok_or_else(|| LlmError::Parse {
        message: "Obscurity question payload had the wrong shape".to_string(),
    })
}

fn parse_generated(payload: &Value) -> Option<(String, String, String)> {
    let field = |key: &str| {
        payload[key]
            .as_str()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    };
    Some((field("question")?, field("label_0")?, field("label_100")?))
}

fn fallback_question() -> (String, String, String) {
    (
        "Time for some self-awareness. How obscure would you say your taste \
         is, 0 to 100?"
            .to_string(),
        "Full mainstream, and proud".to_string(),
        "So obscure the artists don't know they exist".to_string(),
    )
}
