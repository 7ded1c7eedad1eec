use crate::dictionary::{TranslationDictionary, Translations};
use crate::error::{TemplateError, TemplateResult};
use crate::loader::source::DictionaryLoader;
use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};

/// Loads dictionaries from the local filesystem
///
/// The reference may name either:
/// - a single JSON file holding the whole `{ "LANG": { "token": "text" } }` map, or
/// - a directory of `<LANG>.json` files, each a flat `{ "token": "text" }` map
#[derive(Debug, Clone, Default)]
pub struct FileLoader;

impl FileLoader {
    pub fn new() -> Self {
        FileLoader
    }

    /// Load from a file or directory, picking the layout by what the path is
    pub async fn load_path(&self, path: &Path) -> TemplateResult<TranslationDictionary> {
        let metadata = fs::metadata(path).await.map_err(|e| {
            TemplateError::DictionaryLoadError(format!(
                "Cannot access '{}': {}",
                path.display(),
                e
            ))
        })?;

        if metadata.is_dir() {
            load_dictionary_from_dir(path).await
        } else {
            load_dictionary_from_file(path).await
        }
    }
}

#[async_trait]
impl DictionaryLoader for FileLoader {
    async fn load(&self, reference: &str) -> TemplateResult<TranslationDictionary> {
        self.load_path(Path::new(reference)).await
    }

    fn loader_name(&self) -> &str {
        "File Loader"
    }
}

async fn read_json(path: &Path) -> TemplateResult<Value> {
    let content = fs::read_to_string(path).await.map_err(|e| {
        TemplateError::DictionaryLoadError(format!(
            "Failed to read file '{}': {}",
            path.display(),
            e
        ))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        TemplateError::DictionaryLoadError(format!(
            "Failed to parse JSON from '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Load a complete dictionary from a single JSON file
///
/// # Errors
/// - File not found or unreadable
/// - Invalid JSON
/// - Root or a language entry that is not an object
pub async fn load_dictionary_from_file(path: &Path) -> TemplateResult<TranslationDictionary> {
    let json = read_json(path).await?;
    let dictionary = TranslationDictionary::from_json(&json, &path.display().to_string())?;
    debug!(
        "Loaded {} language(s) from '{}'",
        dictionary.0.len(),
        path.display()
    );
    Ok(dictionary)
}

/// Load a dictionary from a directory of per-language JSON files
///
/// The filename without extension is the language code, so `DE.json`
/// becomes language `"DE"`. Files without a `.json` extension are ignored.
///
/// # Errors
/// - Directory not found or unreadable
/// - File read/parse errors
pub async fn load_dictionary_from_dir(dir: &Path) -> TemplateResult<TranslationDictionary> {
    let mut entries = fs::read_dir(dir).await.map_err(|e| {
        TemplateError::DictionaryLoadError(format!(
            "Failed to read directory '{}': {}",
            dir.display(),
            e
        ))
    })?;

    let mut dictionary = TranslationDictionary::new();

    while let Some(entry) = entries.next_entry().await.map_err(|e| {
        TemplateError::DictionaryLoadError(format!("Error reading directory entry: {}", e))
    })? {
        let path = entry.path();

        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }

        let language = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| {
                TemplateError::DictionaryLoadError(format!(
                    "Invalid filename: {}",
                    path.display()
                ))
            })?
            .to_string();

        let json = read_json(&path).await?;
        let translations = Translations::from_json(&json, &path.display().to_string())?;
        dictionary.with_language(&language, translations);
    }

    if dictionary.0.is_empty() {
        warn!("No JSON files found in directory {}", dir.display());
    }

    Ok(dictionary)
}
