//! Language-keyed translation dictionaries
//!
//! A dictionary maps a language code to the translations for that language,
//! and each translation maps a token name to its text:
//!
//! ```json
//! {
//!     "EN": { "greeting": "Hi" },
//!     "DE": { "greeting": "Hallo" }
//! }
//! ```

use crate::error::{TemplateError, TemplateResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Language used when the requested one has no entry
pub const DEFAULT_LANGUAGE: &str = "EN";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Translations(pub HashMap<String, String>);

impl Translations {
    pub fn new() -> Self {
        Translations(HashMap::new())
    }
    pub fn with_translation(&mut self, key: &str, text: &str) -> &mut Self {
        self.0.insert(key.to_owned(), text.to_owned());
        self
    }
    pub fn get_translation(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Read a flat `{ "token": "text" }` object
    ///
    /// Keys starting with `@` (such as `@metadata`) are skipped, as are
    /// values that are not strings.
    pub fn from_json(json: &Value, origin: &str) -> TemplateResult<Self> {
        let obj = json.as_object().ok_or_else(|| {
            TemplateError::DictionaryLoadError(format!(
                "Invalid translations in '{}': expected an object",
                origin
            ))
        })?;

        let mut translations = Translations::new();
        for (key, value) in obj {
            if key.starts_with('@') {
                continue;
            }
            match value.as_str() {
                Some(text) => {
                    translations.with_translation(key, text);
                }
                None => warn!(
                    "Translation '{}' in '{}' is not a string, skipping",
                    key, origin
                ),
            }
        }
        Ok(translations)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationDictionary(pub HashMap<String, Translations>);

impl TranslationDictionary {
    pub fn new() -> Self {
        TranslationDictionary(HashMap::new())
    }

    pub fn with_language(&mut self, language: &str, translations: Translations) -> &mut Self {
        self.0.insert(language.to_owned(), translations);
        self
    }

    pub fn get_language(&self, language: &str) -> Option<&Translations> {
        self.0.get(language)
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Pick the translations for `language`, falling back to [`DEFAULT_LANGUAGE`].
    ///
    /// Language codes are compared exactly; `"de"` does not match `"DE"`.
    /// Returns `None` when neither language is present.
    pub fn select(&self, language: &str) -> Option<&Translations> {
        if let Some(translations) = self.0.get(language) {
            return Some(translations);
        }

        match self.0.get(DEFAULT_LANGUAGE) {
            Some(translations) => {
                debug!(
                    "Fallback: using '{}' translations (requested: '{}')",
                    DEFAULT_LANGUAGE, language
                );
                Some(translations)
            }
            None => {
                debug!(
                    "No translations for '{}' or '{}', tokens left as-is",
                    language, DEFAULT_LANGUAGE
                );
                None
            }
        }
    }

    /// Read the full `{ "LANG": { "token": "text" } }` shape
    ///
    /// # Errors
    /// - `DictionaryLoadError` if the root or a language entry is not an object
    pub fn from_json(json: &Value, origin: &str) -> TemplateResult<Self> {
        let obj = json.as_object().ok_or_else(|| {
            TemplateError::DictionaryLoadError(format!(
                "Invalid dictionary in '{}': root must be an object",
                origin
            ))
        })?;

        let mut dictionary = TranslationDictionary::new();
        for (language, entry) in obj {
            if language.starts_with('@') {
                continue;
            }
            let translations = Translations::from_json(entry, origin)?;
            dictionary.with_language(language, translations);
        }
        Ok(dictionary)
    }

    pub fn from_json_str(content: &str, origin: &str) -> TemplateResult<Self> {
        let json: Value = serde_json::from_str(content).map_err(|e| {
            TemplateError::DictionaryLoadError(format!(
                "Failed to parse JSON from '{}': {}",
                origin, e
            ))
        })?;
        Self::from_json(&json, origin)
    }
}
