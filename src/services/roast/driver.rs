//! Conversation Driver
//!
//! Server-side step function for the roast. The caller round-trips the
//! whole conversation state every turn, so advancing is a pure function
//! of the request plus whatever the completion endpoint returns. The
//! queue of pending questions is built once after the intro from every
//! module viable against the record, in random order, and drained
//! first-viable-wins from then on.

use rand::seq::SliceRandom;
use serde_json::Value;

use crate::services::llm::CompletionProvider;
use crate::services::roast::prompts;
use crate::services::roast::questions;
use crate::services::roast::record::RoastData;
use crate::services::roast::types::{
    Choice, HistoryEntry, Question, QuestionKind, RoastStep, StepRequest, StepResponse,
};

/// Advance the conversation by one turn
pub async fn advance(request: StepRequest, provider: &dyn CompletionProvider) -> StepResponse {
    let empty = Value::Null;
    let record = RoastData::new(request.roast_data.as_ref().unwrap_or(&empty));

    match request.step {
        RoastStep::Ready => {
            let user = request.user.as_deref().unwrap_or_else(|| record.username());
            StepResponse {
                next_step: RoastStep::Intro,
                bot_message: prompts::intro_message(user),
                choices: vec![Choice::new("Go on then", "continue")],
                question_queue: Vec::new(),
            }
        }
        RoastStep::Intro => {
            let mut queue = synthesize_queue(&record);
            tracing::info!(queued = queue.len(), "Built question queue");
            match next_question(&mut queue, &record, provider).await {
                Some(question) => question_response(None, question, queue),
                None => closing_response(prompts::empty_queue_message().to_string()),
            }
        }
        RoastStep::Final => StepResponse {
            next_step: RoastStep::Complete,
            bot_message: prompts::dismissal_message().to_string(),
            choices: Vec::new(),
            question_queue: Vec::new(),
        },
        // Terminal; repeat the dismissal if the client keeps posting
        RoastStep::Complete => StepResponse {
            next_step: RoastStep::Complete,
            bot_message: prompts::dismissal_message().to_string(),
            choices: Vec::new(),
            question_queue: Vec::new(),
        },
        step => match QuestionKind::for_step(step) {
            Some(kind) => answer_question(kind, request, &record, provider).await,
            None => closing_response(prompts::empty_queue_message().to_string()),
        },
    }
}

/// React to the answer for `kind`, then move to the next queued question
/// or close the conversation with the final judgment.
async fn answer_question(
    kind: QuestionKind,
    request: StepRequest,
    record: &RoastData<'_>,
    provider: &dyn CompletionProvider,
) -> StepResponse {
    let choice = request.choice.as_deref().unwrap_or_default();
    let reaction = questions::reply(kind, choice, record, &request.history, provider).await;

    let mut queue = request.question_queue;
    match next_question(&mut queue, record, provider).await {
        Some(question) => question_response(Some(reaction), question, queue),
        None => {
            let verdict = final_judgment(record, &request.history, provider).await;
            closing_response(format!("{}\n\n{}", reaction, verdict))
        }
    }
}

/// Every viable question, shuffled
fn synthesize_queue(record: &RoastData) -> Vec<QuestionKind> {
    let mut queue: Vec<QuestionKind> = QuestionKind::ALL
        .into_iter()
        .filter(|kind| questions::is_viable(*kind, record))
        .collect();
    queue.shuffle(&mut rand::thread_rng());
    queue
}

/// Pop queued kinds until one builds a question. Kinds that decline are
/// dropped, not retried.
async fn next_question(
    queue: &mut Vec<QuestionKind>,
    record: &RoastData<'_>,
    provider: &dyn CompletionProvider,
) -> Option<Question> {
    while !queue.is_empty() {
        let kind = queue.remove(0);
        if !questions::is_viable(kind, record) {
            tracing::debug!(?kind, "Skipping question, record cannot support it");
            continue;
        }
        match questions::build(kind, record, provider).await {
            Some(question) => return Some(question),
            None => tracing::debug!(?kind, "Question module declined"),
        }
    }
    None
}

async fn final_judgment(
    record: &RoastData<'_>,
    history: &[HistoryEntry],
    provider: &dyn CompletionProvider,
) -> String {
    let messages = prompts::final_judgment_messages(record.raw(), history);
    match provider.complete(&messages).await {
        Ok(verdict) => verdict,
        Err(e) => {
            tracing::warn!("Final judgment falling back to canned text: {}", e);
            prompts::fallback_final_judgment(record.username())
        }
    }
}

/// Response presenting `question`, prefixed with the reaction to the
/// previous answer when there is one
fn question_response(
    reaction: Option<String>,
    question: Question,
    queue: Vec<QuestionKind>,
) -> StepResponse {
    let bot_message = match reaction {
        Some(reaction) => format!("{}\n\n{}", reaction, question.bot_message),
        None => question.bot_message,
    };
    StepResponse {
        next_step: question.next_step,
        bot_message,
        choices: question.choices,
        question_queue: queue,
    }
}

fn closing_response(bot_message: String) -> StepResponse {
    StepResponse {
        next_step: RoastStep::Final,
        bot_message,
        choices: vec![Choice::new("Fair enough", "done")],
        question_queue: Vec::new(),
    }
}
