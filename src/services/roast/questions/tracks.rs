//! Track Question
//!
//! Confronts the listener with their single most-played track. Fully
//! canned on both sides; the track name does the damage on its own.

use crate::services::roast::record::{entry_label, RoastData};
use crate::services::roast::types::{Choice, Question, QuestionKind, RoastStep};

pub fn is_viable(record: &RoastData) -> bool {
    !record.top_tracks().is_empty()
}

pub fn build(record: &RoastData) -> Option<Question> {
    let tracks = record.top_tracks();
    let label = entry_label(tracks.first()?)?;

    Some(Question {
        kind: QuestionKind::Tracks,
        next_step: RoastStep::AskTracks,
        bot_message: format!(
            "Your most-played track is {}. On repeat. Over and over. How do \
             we feel about that?",
            label
        ),
        choices: vec![
            Choice::new("No regrets, it's a great song", "proud"),
            Choice::new("I'm a little embarrassed, honestly", "embarrassed"),
            Choice::new("The algorithm kept playing it", "blame_algorithm"),
            Choice::new("I'd play it again right now", "defiant"),
        ],
    })
}

pub fn reply(choice: &str) -> String {
    match choice {
        "proud" => {
            "Confidence is admirable. Misplaced, in this case, but admirable."
                .to_string()
        }
        "embarrassed" => {
            "Good. Embarrassment is the first step toward growth. You have a \
             long road ahead."
                .to_string()
        }
        "blame_algorithm" => {
            "Ah yes, the algorithm. Famously capable of pressing play several \
             hundred times without your involvement."
                .to_string()
        }
        "defiant" => {
            "Of course you would. Repetition is a comfort to those who fear \
             the unknown. Or a second song."
                .to_string()
        }
        _ => "An answer so evasive it tells me everything.".to_string(),
    }
}
