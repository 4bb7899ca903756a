//! Single-pass keyword classification of conversation rows.

use tracing::debug;

use super::model::{InputRow, Language, TriggerCard};
use super::rules::RuleTable;

/// Classify one row. Returns at most one card.
///
/// Matching runs on the lowercased content; the card quotes the content
/// as uploaded.
pub fn classify_row(table: &RuleTable, row: &InputRow, language: Language) -> Option<TriggerCard> {
    let original = row.content();
    let text = original.to_lowercase();
    let (category, phrase) = table.find_match(&text)?;

    debug!(
        category = %category.name(),
        phrase = %phrase,
        "Row matched trigger"
    );

    Some(TriggerCard::new(
        category.name(),
        phrase,
        category.response(language),
        language,
        original,
    ))
}

/// Classify a batch of rows, keeping input order among matched rows.
pub fn classify(table: &RuleTable, rows: &[InputRow], language: Language) -> Vec<TriggerCard> {
    let cards: Vec<TriggerCard> = rows
        .iter()
        .filter_map(|row| classify_row(table, row, language))
        .collect();

    debug!(
        rows = rows.len(),
        cards = cards.len(),
        language = %language,
        "Classified conversation rows"
    );

    cards
}
