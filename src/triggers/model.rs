//! Row and card types for trigger classification.

use serde::Serialize;

/// One row of an uploaded conversation table.
///
/// Only the `content` column is read. `None` means the column or the cell
/// was missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputRow {
    pub content: Option<String>,
}

impl InputRow {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
        }
    }

    /// A row with no content cell.
    pub fn empty() -> Self {
        Self { content: None }
    }

    /// The original content, or `""` when absent.
    pub fn content(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}

/// Language the rep responses are rendered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Language {
    #[default]
    English,
    Spanish,
}

impl Language {
    /// Display label written into the card's `Language` field.
    pub fn label(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Spanish => "Español",
        }
    }

    /// Two-letter code accepted on the query string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Spanish => "es",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Self::English),
            "es" => Ok(Self::Spanish),
            _ => Err(format!("Unknown language: {}", s)),
        }
    }
}

/// A detected trigger for one customer utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggerCard {
    /// Category name plus the `" Trigger"` suffix.
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Language")]
    pub language: String,
    #[serde(rename = "Description")]
    pub description: String,
    /// Canned reply the rep can use.
    #[serde(rename = "Rep Response")]
    pub rep_response: String,
    /// The matched phrase, in its canonical lowercase form.
    #[serde(rename = "Trigger Phrase")]
    pub trigger_phrase: String,
    /// The row's content exactly as uploaded.
    #[serde(rename = "Customer Quote")]
    pub customer_quote: String,
}

impl TriggerCard {
    pub fn new(
        category: &str,
        phrase: &str,
        response: &str,
        language: Language,
        quote: impl Into<String>,
    ) -> Self {
        Self {
            name: format!("{category} Trigger"),
            language: language.label().to_string(),
            description: format!(
                "Triggers when a customer mentions '{phrase}' indicating {}.",
                category.to_lowercase()
            ),
            rep_response: response.to_string(),
            trigger_phrase: phrase.to_string(),
            customer_quote: quote.into(),
        }
    }

    /// Category this card was produced for.
    pub fn category(&self) -> &str {
        self.name.strip_suffix(" Trigger").unwrap_or(&self.name)
    }
}
