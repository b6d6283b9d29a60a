//! Question Bank
//!
//! One module per question, each deciding for itself whether the
//! listening data can support it, how to phrase it, and how to react to
//! the answer. Modules that lean on the completion endpoint fall back to
//! canned text when it is unavailable, so a roast always completes.

pub mod albums;
pub mod artists;
pub mod loved;
pub mod obscurity;
pub mod recent;
pub mod tracks;

use crate::services::llm::CompletionProvider;
use crate::services::roast::record::RoastData;
use crate::services::roast::types::{HistoryEntry, Question, QuestionKind};

/// Whether the record holds enough data for this question to land
pub fn is_viable(kind: QuestionKind, record: &RoastData) -> bool {
    match kind {
        QuestionKind::Albums => albums::is_viable(record),
        QuestionKind::Tracks => tracks::is_viable(record),
        QuestionKind::Artists => artists::is_viable(record),
        QuestionKind::Obscurity => obscurity::is_viable(record),
        QuestionKind::Recent => recent::is_viable(record),
        QuestionKind::Loved => loved::is_viable(record),
    }
}

/// Build the question, or None if the record turns out too thin after all
pub async fn build(
    kind: QuestionKind,
    record: &RoastData<'_>,
    provider: &dyn CompletionProvider,
) -> Option<Question> {
    match kind {
        QuestionKind::Albums => albums::build(record, provider).await,
        QuestionKind::Tracks => tracks::build(record),
        QuestionKind::Artists => artists::build(record),
        QuestionKind::Obscurity => obscurity::build(record, provider).await,
        QuestionKind::Recent => recent::build(record),
        QuestionKind::Loved => loved::build(record),
    }
}

/// React to the listener's answer for this question
pub async fn reply(
    kind: QuestionKind,
    choice: &str,
    record: &RoastData<'_>,
    history: &[HistoryEntry],
    provider: &dyn CompletionProvider,
) -> String {
    match kind {
        QuestionKind::Albums => albums::reply(choice, record, history, provider).await,
        QuestionKind::Tracks => tracks::reply(choice),
        QuestionKind::Artists => artists::reply(choice),
        QuestionKind::Obscurity => obscurity::reply(choice, record, history, provider).await,
        QuestionKind::Recent => recent::reply(choice),
        QuestionKind::Loved => loved::reply(choice, record, history, provider).await,
    }
}
