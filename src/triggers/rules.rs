//! Static keyword rules: category → trigger phrases → canned rep response.
//!
//! Categories are checked in table order and phrases in list order. The
//! first category with any matching phrase wins, so table order is the
//! tie-break when an utterance mentions several topics.

use super::model::Language;

/// A named group of trigger phrases sharing one rep response.
#[derive(Debug, Clone)]
pub struct Category {
    name: String,
    triggers: Vec<String>,
    response: String,
    response_es: Option<String>,
}

impl Category {
    /// Create a category with its English response.
    ///
    /// Phrases are stored lowercase; blank phrases are dropped since they
    /// would match every row.
    pub fn new<I, S>(name: impl Into<String>, triggers: I, response: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name: name.into(),
            triggers: triggers
                .into_iter()
                .map(|t| t.as_ref().trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
            response: response.into(),
            response_es: None,
        }
    }

    /// Attach the Spanish rendering of the rep response.
    pub fn with_spanish(mut self, response: impl Into<String>) -> Self {
        self.response_es = Some(response.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn triggers(&self) -> &[String] {
        &self.triggers
    }

    /// Rep response in `language`, falling back to English.
    pub fn response(&self, language: Language) -> &str {
        match language {
            Language::English => &self.response,
            Language::Spanish => self.response_es.as_deref().unwrap_or(&self.response),
        }
    }

    /// First trigger, in list order, contained in `text`.
    ///
    /// `text` must already be lowercased.
    pub fn first_match(&self, text: &str) -> Option<&str> {
        self.triggers
            .iter()
            .find(|t| text.contains(t.as_str()))
            .map(String::as_str)
    }
}

/// Ordered, read-only set of categories.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    categories: Vec<Category>,
}

impl RuleTable {
    /// Create an empty table (for testing).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Append a category at the lowest priority.
    pub fn push(&mut self, category: Category) {
        self.categories.push(category);
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Look a category up by its exact name.
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// First category (table order) with a matching phrase, and that phrase.
    ///
    /// `text` must already be lowercased.
    pub fn find_match(&self, text: &str) -> Option<(&Category, &str)> {
        if text.is_empty() {
            return None;
        }
        self.categories
            .iter()
            .find_map(|c| c.first_match(text).map(|phrase| (c, phrase)))
    }

    /// The built-in sales-conversation categories.
    pub fn default_table() -> Self {
        let categories = vec![
            Category::new(
                "Price Complaints",
                [
                    "too expensive",
                    "overpriced",
                    "not worth",
                    "can’t afford",
                    "that’s steep",
                    "out of our range",
                    "a bit much",
                    "beyond budget",
                    "pricey",
                    "not in our price range",
                    "high cost",
                ],
                "We understand pricing is important. Would you be open to discussing what value you expect at that price point?",
            )
            .with_spanish(
                "Entendemos que el precio es importante. ¿Estarías dispuesto a comentar qué valor esperas por ese precio?",
            ),
            Category::new(
                "Cost/Price",
                [
                    "price",
                    "cost",
                    "budget",
                    "fee",
                    "rate",
                    "quote",
                    "pricing",
                    "how much",
                    "what does it run",
                    "expensive",
                    "cheap",
                    "charges",
                    "amount",
                    "estimate",
                    "affordability",
                ],
                "Can you share more about your budget or expectations on pricing so we can align better?",
            )
            .with_spanish(
                "¿Podrías compartir más sobre tu presupuesto o expectativas de precio para poder alinearnos mejor?",
            ),
            Category::new(
                "Contract Claim",
                [
                    "contract",
                    "agreement",
                    "signed",
                    "terms",
                    "deal",
                    "paperwork",
                    "arrangement",
                    "documentation",
                    "we agreed",
                    "what was promised",
                    "signed off",
                ],
                "Can you clarify the current agreement or terms you’re referring to?",
            )
            .with_spanish(
                "¿Puedes aclarar el acuerdo o los términos actuales a los que te refieres?",
            ),
            Category::new(
                "Contract Time",
                [
                    "duration",
                    "renewal",
                    "start date",
                    "end date",
                    "term",
                    "length of agreement",
                    "valid until",
                    "commitment period",
                    "expires",
                    "timeline",
                    "how long does it last",
                    "time frame",
                ],
                "When does your current contract expire or are you looking for flexibility in term length?",
            )
            .with_spanish(
                "¿Cuándo vence tu contrato actual, o buscas flexibilidad en la duración del plazo?",
            ),
            Category::new(
                "Installation",
                [
                    "install",
                    "installation",
                    "set up",
                    "setup",
                    "configured",
                    "configure",
                    "delivery",
                    "setting it up",
                    "implementation",
                    "get it running",
                    "hooking it up",
                    "initial setup",
                    "getting started hardware-wise",
                    "deployed",
                ],
                "Would you like to walk through how we handle setup and installation logistics?",
            )
            .with_spanish(
                "¿Te gustaría repasar cómo gestionamos la logística de configuración e instalación?",
            ),
            Category::new(
                "Onboarding",
                [
                    "onboarding",
                    "training",
                    "kickoff",
                    "walkthrough",
                    "setup session",
                    "orientation",
                    "get started",
                    "first steps",
                    "introduction",
                    "ramp-up",
                    "new user help",
                ],
                "Would you like a preview of what the onboarding process looks like with our team?",
            )
            .with_spanish(
                "¿Te gustaría ver un adelanto de cómo es el proceso de incorporación con nuestro equipo?",
            ),
        ];

        Self { categories }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_order() {
        let table = RuleTable::default_table();
        let names: Vec<&str> = table.categories().map(Category::name).collect();
        assert_eq!(
            names,
            [
                "Price Complaints",
                "Cost/Price",
                "Contract Claim",
                "Contract Time",
                "Installation",
                "Onboarding",
            ]
        );
    }

    #[test]
    fn default_triggers_are_lowercase_and_non_empty() {
        let table = RuleTable::default_table();
        for category in table.categories() {
            assert!(!category.triggers().is_empty(), "{}", category.name());
            for trigger in category.triggers() {
                assert!(!trigger.is_empty());
                assert_eq!(trigger, &trigger.to_lowercase());
            }
        }
    }

    #[test]
    fn every_default_category_has_spanish() {
        let table = RuleTable::default_table();
        for category in table.categories() {
            assert_ne!(
                category.response(Language::Spanish),
                category.response(Language::English),
                "{} has no Spanish response",
                category.name()
            );
        }
    }

    #[test]
    fn spanish_falls_back_to_english() {
        let category = Category::new("Demo", ["demo"], "English reply");
        assert_eq!(category.response(Language::Spanish), "English reply");
    }

    #[test]
    fn new_normalizes_and_drops_blank_triggers() {
        let category = Category::new("Demo", ["  Free Trial ", "", "   "], "r");
        assert_eq!(category.triggers(), ["free trial"]);
    }

    #[test]
    fn first_match_uses_list_order_not_text_position() {
        let category = Category::new("Demo", ["beta", "alpha"], "r");
        assert_eq!(category.first_match("alpha then beta"), Some("beta"));
    }

    #[test]
    fn find_match_uses_table_order() {
        let mut table = RuleTable::empty();
        table.push(Category::new("First", ["shared"], "one"));
        table.push(Category::new("Second", ["shared", "unique"], "two"));

        let (category, phrase) = table.find_match("a shared and unique topic").unwrap();
        assert_eq!(category.name(), "First");
        assert_eq!(phrase, "shared");

        let (category, phrase) = table.find_match("only unique").unwrap();
        assert_eq!(category.name(), "Second");
        assert_eq!(phrase, "unique");
    }

    #[test]
    fn empty_text_never_matches() {
        assert!(RuleTable::default_table().find_match("").is_none());
        assert!(RuleTable::empty().find_match("price").is_none());
    }

    #[test]
    fn category_lookup_by_name() {
        let table = RuleTable::default_table();
        assert!(table.category("Onboarding").is_some());
        assert!(table.category("onboarding").is_none());
        assert_eq!(table.len(), 6);
        assert!(!table.is_empty());
    }
}
