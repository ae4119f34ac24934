//! CLDR plural category selection

use intl_pluralrules::{PluralCategory, PluralRuleType, PluralRules};
use tracing::warn;
use unic_langid::LanguageIdentifier;

/// Cardinal and ordinal plural rules for one locale
pub struct PluralSelector {
    cardinal: PluralRules,
    ordinal: PluralRules,
}

impl std::fmt::Debug for PluralSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluralSelector")
            .field("cardinal", &"PluralRules")
            .field("ordinal", &"PluralRules")
            .finish()
    }
}

impl PluralSelector {
    /// Build the selector for a locale, falling back to English rules when
    /// the locale has no CLDR data
    pub fn new(locale: &LanguageIdentifier) -> Self {
        Self {
            cardinal: rules_or_default(locale, PluralRuleType::CARDINAL),
            ordinal: rules_or_default(locale, PluralRuleType::ORDINAL),
        }
    }

    /// Select the category arm name for a value
    pub fn select(&self, value: f64, ordinal: bool) -> &'static str {
        if !value.is_finite() {
            return "other";
        }
        let rules = if ordinal { &self.ordinal } else { &self.cardinal };
        match rules.select(value) {
            Ok(category) => category_name(category),
            Err(_) => "other",
        }
    }
}

fn rules_or_default(locale: &LanguageIdentifier, kind: PluralRuleType) -> PluralRules {
    PluralRules::create(locale.clone(), kind).unwrap_or_else(|err| {
        warn!(locale = %locale, "No plural rules for locale ({err}), using English rules");
        let english: LanguageIdentifier = "en".parse().unwrap_or_default();
        PluralRules::create(english, kind).expect("CLDR plural rules ship for en")
    })
}

fn category_name(category: PluralCategory) -> &'static str {
    match category {
        PluralCategory::ZERO => "zero",
        PluralCategory::ONE => "one",
        PluralCategory::TWO => "two",
        PluralCategory::FEW => "few",
        PluralCategory::MANY => "many",
        PluralCategory::OTHER => "other",
    }
}
