use std::collections::HashMap;

use serde::Deserialize;

/// Language of the regulatory source data.
pub const DEFAULT_LANG: &str = "fr";

#[derive(Debug, Default, Deserialize)]
struct LocaleStrings {
    #[serde(default)]
    questions: HashMap<String, String>,
    #[serde(default)]
    profile: HashMap<String, String>,
    #[serde(default)]
    options: HashMap<String, String>,
    #[serde(default)]
    messages: HashMap<String, String>,
}

/// Immutable string catalog, built once at startup from the bundled
/// locale files and shared read-only for the life of the process.
pub struct TranslationCatalog {
    locales: HashMap<String, LocaleStrings>,
}

impl TranslationCatalog {
    /// Catalog from the locales bundled into the binary.
    pub fn embedded() -> Self {
        let sources = [
            ("fr", include_str!("../resources/locales/fr.json")),
            ("en", include_str!("../resources/locales/en.json")),
        ];

        let mut locales = HashMap::new();
        for (lang, json) in sources {
            let strings: LocaleStrings =
                serde_json::from_str(json).expect("bundled locale file is valid JSON");
            locales.insert(lang.to_string(), strings);
        }
        Self { locales }
    }

    fn locale(&self, lang: &str) -> &LocaleStrings {
        self.locales
            .get(lang)
            .or_else(|| self.locales.get(DEFAULT_LANG))
            .expect("default locale is bundled")
    }

    /// Display text of a medical screening question. Falls back to the
    /// default language, then to the code itself.
    pub fn question_text(&self, code: &str, lang: &str) -> String {
        self.lookup(lang, |l| l.questions.get(code))
            .unwrap_or_else(|| code.to_string())
    }

    /// Display text of a profile question (GENDER / AGE / HAS_OTHER_MEDS).
    pub fn profile_text(&self, key: &str, lang: &str) -> String {
        self.lookup(lang, |l| l.profile.get(key))
            .unwrap_or_else(|| key.to_string())
    }

    /// Label of a choice option (e.g. GENDER_M).
    pub fn option_label(&self, key: &str, lang: &str) -> String {
        self.lookup(lang, |l| l.options.get(key))
            .unwrap_or_else(|| key.to_string())
    }

    pub fn prescription_warning(&self, lang: &str) -> String {
        self.message("prescription_warning", lang)
    }

    pub fn technical_error(&self, lang: &str) -> String {
        self.message("technical_error", lang)
    }

    pub fn explanation_unavailable(&self, lang: &str) -> String {
        self.message("explanation_unavailable", lang)
    }

    /// Placeholder drug name when the identifier resolved to no brand.
    pub fn unknown_drug(&self, lang: &str) -> String {
        self.message("unknown_drug", lang)
    }

    fn message(&self, key: &str, lang: &str) -> String {
        self.lookup(lang, |l| l.messages.get(key))
            .unwrap_or_else(|| key.to_string())
    }

    fn lookup<'a>(
        &'a self,
        lang: &str,
        get: impl Fn(&'a LocaleStrings) -> Option<&'a String>,
    ) -> Option<String> {
        get(self.locale(lang))
            .or_else(|| get(self.locale(DEFAULT_LANG)))
            .cloned()
    }
}
