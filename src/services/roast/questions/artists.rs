//! Artist Question
//!
//! Asks the listener to account for their most-played artist. Canned
//! question and canned replies keyed by how they justify the attachment.

use crate::services::roast::record::RoastData;
use crate::services::roast::types::{Choice, Question, QuestionKind, RoastStep};

pub fn is_viable(record: &RoastData) -> bool {
    !record.top_artists().is_empty()
}

pub fn build(record: &RoastData) -> Option<Question> {
    let artists = record.top_artists();
    let name = artists.first()?.get("name")?.as_str()?.to_string();
    if name.is_empty() {
        return None;
    }

    Some(Question {
        kind: QuestionKind::Artists,
        next_step: RoastStep::AskArtists,
        bot_message: format!(
            "{} sits at the top of your artists. Explain yourself.",
            name
        ),
        choices: vec![
            Choice::new("Genuine love, nothing to explain", "love"),
            Choice::new("They're my comfort listen", "comfort"),
            Choice::new("Autoplay did most of the work", "autoplay"),
            Choice::new("It's complicated", "complicated"),
        ],
    })
}

pub fn reply(choice: &str) -> String {
    match choice {
        "love" => {
            "Genuine love. For one artist, hundreds of times, while the rest \
             of recorded music waited patiently."
                .to_string()
        }
        "comfort" => {
            "A comfort listen. Like a weighted blanket, except it slowly \
             calcifies your taste."
                .to_string()
        }
        "autoplay" => {
            "Blaming autoplay is a bold strategy when the numbers say you \
             never once pressed skip."
                .to_string()
        }
        "complicated" => {
            "It's not complicated. You played them constantly. The charts \
             are very simple documents."
                .to_string()
        }
        _ => "Noted. The charts will remember even if you won't.".to_string(),
    }
}
