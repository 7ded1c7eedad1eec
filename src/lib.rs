use std::fmt;

use tracing::debug;

pub mod data;
pub mod dictionary;
pub mod error;
pub mod loader;
pub mod scanner;


// Re-export main types for convenient access
pub use data::{DataMap, Record, Value};
pub use dictionary::{DEFAULT_LANGUAGE, TranslationDictionary, Translations};
pub use error::{TemplateError, TemplateResult};
pub use loader::{DictionaryLoader, DictionarySource, FileLoader, HttpLoader};
pub use scanner::TokenScanner;

/// A document with prefixed keyword tokens, rewritten in place.
///
/// Tokens are `<prefix><word>` where `<word>` is `[A-Za-z0-9_]+`. Repeated
/// sections are written `@for:<key>{<body>}` and expanded over a sequence in
/// the data mapping. Tokens without a value are kept verbatim, so missing data
/// stays visible in the output.
pub struct Template {
    document: String,
    scanner: TokenScanner,
}

impl Template {
    pub fn new(text: &str, prefix: &str) -> TemplateResult<Self> {
        Ok(Template {
            document: text.to_string(),
            scanner: TokenScanner::new(prefix)?,
        })
    }

    /// Switch the token prefix for all later operations.
    ///
    /// Text substituted earlier is not rescanned. On error the current prefix
    /// stays active.
    pub fn with_prefix(&mut self, prefix: &str) -> TemplateResult<&mut Self> {
        self.scanner = TokenScanner::new(prefix)?;
        Ok(self)
    }

    pub fn get_prefix(&self) -> &str {
        self.scanner.prefix()
    }

    /// Expand loop blocks, then substitute plain tokens from `data`.
    ///
    /// Loops run first so tokens inside a loop body resolve against the
    /// record fields before outer data is consulted. Sequence values are
    /// never substituted as plain tokens.
    pub fn apply(&mut self, data: &DataMap) -> &mut Self {
        let expanded = self.scanner.expand_loops(&self.document, data);
        self.document = self.scanner.substitute(&expanded, |key| data.get_text(key));
        self
    }

    /// Substitute tokens from an in-memory dictionary.
    ///
    /// Uses `language`, then [`DEFAULT_LANGUAGE`]; with neither present the
    /// document is left unchanged. Loop blocks are not expanded here.
    pub fn translate(&mut self, dictionary: &TranslationDictionary, language: &str) -> &mut Self {
        if let Some(translations) = dictionary.select(language) {
            self.document = self
                .scanner
                .substitute(&self.document, |key| translations.get_translation(key));
        }
        self
    }

    /// Obtain a dictionary from `source` and substitute its translations.
    ///
    /// Only path and URL sources suspend. If loading fails the error is
    /// returned and the document is left untouched.
    pub async fn resolve_translations(
        &mut self,
        source: DictionarySource<'_>,
        language: &str,
    ) -> TemplateResult<&mut Self> {
        match source {
            DictionarySource::Dictionary(dictionary) => Ok(self.translate(dictionary, language)),
            DictionarySource::Path(path) => {
                let dictionary = FileLoader::new().load_path(&path).await?;
                Ok(self.translate(&dictionary, language))
            }
            DictionarySource::Url(url) => {
                let loader = HttpLoader::new().map_err(into_load_error)?;
                self.resolve_translations_with(&loader, &url, language)
                    .await
            }
        }
    }

    /// Like [`resolve_translations`](Self::resolve_translations) with a caller supplied loader.
    pub async fn resolve_translations_with(
        &mut self,
        loader: &dyn DictionaryLoader,
        reference: &str,
        language: &str,
    ) -> TemplateResult<&mut Self> {
        let dictionary = loader.load(reference).await?;
        debug!(
            "{} loaded dictionary '{}' for language '{}'",
            loader.loader_name(),
            reference,
            language
        );
        Ok(self.translate(&dictionary, language))
    }

    pub fn render(&self) -> &str {
        &self.document
    }

    pub fn into_string(self) -> String {
        self.document
    }
}

/// A source that cannot even be set up counts as a failed load.
fn into_load_error(err: TemplateError) -> TemplateError {
    match err {
        TemplateError::ConfigError(msg) => TemplateError::DictionaryLoadError(msg),
        other => other,
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.document)
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("prefix", &self.scanner.prefix())
            .field("document", &self.document)
            .finish()
    }
}
