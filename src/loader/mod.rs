/// Dictionary Loading Module
///
/// Translation dictionaries usually live outside the program, either as JSON
/// files on disk or behind an HTTP endpoint. This module provides the
/// collaborators that fetch and parse them so [`Template`](crate::Template)
/// only ever sees a parsed [`TranslationDictionary`](crate::TranslationDictionary).
///
/// # Overview
///
/// 1. **DictionaryLoader** - Async trait implemented by every loader
/// 2. **FileLoader** - Reads a dictionary file or a directory of per-language files
/// 3. **HttpLoader** - Fetches a dictionary document over HTTP
/// 4. **DictionarySource** - What `resolve_translations` accepts: an in-memory
///    dictionary, a path, or a URL
///
/// # Example
///
/// ```ignore
/// use keyplate::{DictionarySource, Template};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut template = Template::new("<h1>$title</h1>", "$")?;
///     template
///         .resolve_translations(DictionarySource::Path("i18n".into()), "DE")
///         .await?;
///     println!("{}", template.render());
///     Ok(())
/// }
/// ```
pub mod file;
pub mod http;
pub mod source;

pub use file::FileLoader;
pub use http::HttpLoader;
pub use source::{DictionaryLoader, DictionarySource};
