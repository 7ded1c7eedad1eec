/// Error types for template processing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// Invalid processor configuration, such as an empty token prefix
    ConfigError(String),
    /// A translation dictionary could not be fetched or parsed
    DictionaryLoadError(String),
    /// Data mapping input did not have the expected shape
    DataError(String),
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            TemplateError::DictionaryLoadError(msg) => {
                write!(f, "Dictionary load error: {}", msg)
            }
            TemplateError::DataError(msg) => write!(f, "Data error: {}", msg),
        }
    }
}

impl std::error::Error for TemplateError {}

impl From<reqwest::Error> for TemplateError {
    fn from(err: reqwest::Error) -> Self {
        TemplateError::DictionaryLoadError(format!("HTTP request failed: {}", err))
    }
}

/// Result type for template operations
pub type TemplateResult<T> = Result<T, TemplateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        assert_eq!(
            TemplateError::ConfigError("prefix cannot be empty".to_string()).to_string(),
            "Configuration error: prefix cannot be empty"
        );
        assert_eq!(
            TemplateError::DictionaryLoadError("not found".to_string()).to_string(),
            "Dictionary load error: not found"
        );
        assert_eq!(
            TemplateError::DataError("root must be an object".to_string()).to_string(),
            "Data error: root must be an object"
        );
    }
}
