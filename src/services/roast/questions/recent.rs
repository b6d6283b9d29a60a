//! Recent Listening Question
//!
//! Brings up the last track the listener scrobbled. Recency removes the
//! usual alibis; canned on both sides.

use crate::services::roast::record::{entry_label, RoastData};
use crate::services::roast::types::{Choice, Question, QuestionKind, RoastStep};

pub fn is_viable(record: &RoastData) -> bool {
    !record.recent_tracks().is_empty()
}

pub fn build(record: &RoastData) -> Option<Question> {
    let tracks = record.recent_tracks();
    let label = entry_label(tracks.first()?)?;

    Some(Question {
        kind: QuestionKind::Recent,
        next_step: RoastStep::AskRecent,
        bot_message: format!(
            "The record shows the last thing you played was {}. Care to \
             comment?",
            label
        ),
        choices: vec![
            Choice::new("Deliberate choice, great track", "deliberate"),
            Choice::new("That was for someone else", "deflect"),
            Choice::new("A moment of weakness", "weakness"),
            Choice::new("I stand by it completely", "proud"),
        ],
    })
}

pub fn reply(choice: &str) -> String {
    match choice {
        "deliberate" => {
            "Deliberate. So you walked up to the entire history of music and \
             chose that. Noted."
                .to_string()
        }
        "deflect" => {
            "For someone else. On your account. Scrobbled under your name. \
             The oldest story in the book."
                .to_string()
        }
        "weakness" => {
            "A moment of weakness that your charts suggest happens daily. At \
             some point it's just a schedule."
                .to_string()
        }
        "proud" => {
            "Standing by it completely. Conviction like that usually comes \
             with better taste attached."
                .to_string()
        }
        _ => "A non-answer. The scrobble, unfortunately, already answered.".to_string(),
    }
}
