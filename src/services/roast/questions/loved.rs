//! Loved Tracks Question
//!
//! Interrogates the loved-tracks list. Canned question; the reply is
//! LLM-written because the list itself is usually the best material.

use crate::services::llm::CompletionProvider;
use crate::services::roast::prompts;
use crate::services::roast::record::RoastData;
use crate::services::roast::types::{Choice, HistoryEntry, Question, QuestionKind, RoastStep};

pub fn is_viable(record: &RoastData) -> bool {
    !record.loved_tracks().is_empty()
}

pub fn build(record: &RoastData) -> Option<Question> {
    let count = record.loved_tracks().len();

    Some(Question {
        kind: QuestionKind::Loved,
        next_step: RoastStep::AskLoved,
        bot_message: format!(
            "You've marked {} track{} as loved. What is that list to you, \
             exactly?",
            count,
            if count == 1 { "" } else { "s" }
        ),
        choices: vec![
            Choice::new("A carefully curated collection", "curated"),
            Choice::new("Chaos, I press the heart at random", "chaos"),
            Choice::new("I forgot most of them exist", "forgotten"),
            Choice::new("Wall-to-wall bangers, actually", "bangers"),
        ],
    })
}

/// React to how they describe the loved list. The endpoint sees the
/// actual list, which tends to undercut whatever they claimed.
pub async fn reply(
    choice: &str,
    record: &RoastData<'_>,
    history: &[HistoryEntry],
    provider: &dyn CompletionProvider,
) -> String {
    let messages = prompts::reply_messages(
        "You asked what their loved-tracks list means to them. Their loved \
         tracks are in the listening data.",
        choice,
        record.raw(),
        history,
    );
    match provider.complete(&messages).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("Loved-tracks reply falling back to canned text: {}", e);
            match choice {
                "curated" => {
                    "Curated. I've seen the list. 'Curated' is doing a lot of \
                     heavy lifting there."
                        .to_string()
                }
                "chaos" => {
                    "At least you're honest. The list reads like a heart \
                     button with a nervous tic."
                        .to_string()
                }
                "forgotten" => {
                    "You forgot them. They, presumably, forgot you too. A \
                     clean break for everyone."
                        .to_string()
                }
                "bangers" => {
                    "Wall-to-wall bangers. The wall in question appears to be \
                     load-bearing for some questionable choices."
                        .to_string()
                }
                _ => "The loved list speaks for itself. Loudly.".to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::llm::{ChatMessage, LlmError, LlmResult};
    use async_trait::async_trait;
    use serde_json::{json, Value};

    struct FailingProvider;

    #[async_trait]
    impl CompletionProvider for FailingProvider {
        async fn complete(&self, _: &[ChatMessage]) -> LlmResult<String> {
            Err(LlmError::NotConfigured)
        }
        async fn complete_json(&self, _: &[ChatMessage]) -> LlmResult<Value> {
            Err(LlmError::NotConfigured)
        }
    }

    #[test]
    fn test_viability_requires_a_loved_track() {
        let empty = json!({"lovedTracks": {"track": []}});
        assert!(!is_viable(&RoastData::new(&empty)));
        let one = json!({"lovedTracks": {"track": [{"name": "Yellow"}]}});
        assert!(is_viable(&RoastData::new(&one)));
    }

    #[test]
    fn test_build_counts_and_pluralizes() {
        let one = json!({"lovedTracks": {"track": [{"name": "Yellow"}]}});
        let question = build(&RoastData::new(&one)).unwrap();
        assert!(question.bot_message.contains("1 track as loved"));

        let two = json!({"lovedTracks": {"track": [{"name": "A"}, {"name": "B"}]}});
        let question = build(&RoastData::new(&two)).unwrap();
        assert!(question.bot_message.contains("2 tracks as loved"));
        assert_eq!(question.choices[3].value, "bangers");
    }

    #[tokio::test]
    async fn test_reply_fallback_covers_every_choice() {
        let value = json!({"lovedTracks": {"track": [{"name": "Yellow"}]}});
        let record = RoastData::new(&value);
        for choice in ["curated", "chaos", "forgotten", "bangers", "other"] {
            let text = reply(choice, &record, &[], &FailingProvider).await;
            assert!(!text.is_empty());
        }
    }
}
