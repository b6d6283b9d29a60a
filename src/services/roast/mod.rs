//! Roast Service
//!
//! Everything behind the conversation endpoint: the wire types the
//! client round-trips, the accessor view over the aggregated record, the
//! question bank, and the step driver that strings them together.

pub mod driver;
pub mod prompts;
pub mod questions;
pub mod record;
pub mod types;

pub use driver::advance;
pub use record::RoastData;
pub use types::{
    Choice, HistoryEntry, Question, QuestionKind, RoastStep, StepRequest, StepResponse,
};
