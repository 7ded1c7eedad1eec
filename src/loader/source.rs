//! Dictionary loader trait and source selection
//!
//! `DictionaryLoader` abstracts where a translation dictionary comes from,
//! so the template only depends on the parsed result. Implementations
//! perform I/O and therefore are async.

use crate::dictionary::TranslationDictionary;
use crate::error::TemplateResult;
use async_trait::async_trait;
use std::path::PathBuf;

/// Generic trait for translation dictionary sources
///
/// A load either returns a complete dictionary or fails as a whole; there is
/// no partial result.
#[async_trait]
pub trait DictionaryLoader: Send + Sync {
    /// Fetch and parse the dictionary identified by `reference`
    ///
    /// # Arguments
    ///
    /// * `reference` - Loader specific identifier (a path, a URL, ...)
    ///
    /// # Returns
    ///
    /// * `Ok(TranslationDictionary)` - The parsed dictionary
    /// * `Err(TemplateError::DictionaryLoadError)` - If the source is unreachable or unparsable
    async fn load(&self, reference: &str) -> TemplateResult<TranslationDictionary>;

    /// Name of this loader, used in log messages
    fn loader_name(&self) -> &str;
}

/// Where `resolve_translations` gets its dictionary from
#[derive(Debug, Clone)]
pub enum DictionarySource<'a> {
    /// Already in memory; used directly without suspending
    Dictionary(&'a TranslationDictionary),
    /// A dictionary file or a directory of `<language>.json` files
    Path(PathBuf),
    /// An HTTP(S) URL returning the dictionary document
    Url(String),
}

impl<'a> From<&'a TranslationDictionary> for DictionarySource<'a> {
    fn from(dictionary: &'a TranslationDictionary) -> Self {
        DictionarySource::Dictionary(dictionary)
    }
}

impl DictionarySource<'_> {
    /// Treat `http://` and `https://` references as URLs and anything else as a path
    pub fn from_reference(reference: &str) -> Self {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            DictionarySource::Url(reference.to_string())
        } else {
            DictionarySource::Path(PathBuf::from(reference))
        }
    }
}
