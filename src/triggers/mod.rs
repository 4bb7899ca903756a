//! Keyword trigger detection for customer conversation transcripts.
//!
//! An uploaded CSV table flows through:
//! 1. `codec::parse_rows()` — header row plus one record per utterance
//! 2. `classifier::classify()` — first matching category per row, in table order
//! 3. `routes` — JSON (or CSV) response, or a uniform `{"error": ...}` body

pub mod classifier;
pub mod codec;
pub mod model;
pub mod routes;
pub mod rules;

pub use classifier::{classify, classify_row};
pub use model::{InputRow, Language, TriggerCard};
pub use routes::{CLASSIFY_PATH, ClassifyState, classify_routes};
pub use rules::{Category, RuleTable};
