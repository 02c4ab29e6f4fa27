use crate::definitions::Definitions;
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    #[default]
    Auto,
    Json,
    Yaml,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => DocumentFormat::Json,
            Some("yaml") | Some("yml") => DocumentFormat::Yaml,
            _ => DocumentFormat::Auto,
        }
    }

    /// Settles `Auto` by sniffing the input: a leading `{` means JSON.
    pub fn resolve(self, input: &str) -> Self {
        match self {
            DocumentFormat::Auto if input.trim_start().starts_with('{') => DocumentFormat::Json,
            DocumentFormat::Auto => DocumentFormat::Yaml,
            other => other,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("json parse failed: {0}")]
    ParseJson(#[source] serde_json::Error),
    #[error("yaml parse failed: {0}")]
    ParseYaml(#[source] serde_yaml::Error),
    #[error("definitions document has an unexpected shape: {0}")]
    Shape(#[source] serde_json::Error),
    #[error("json render failed: {0}")]
    RenderJson(#[source] serde_json::Error),
    #[error("yaml render failed: {0}")]
    RenderYaml(#[source] serde_yaml::Error),
}

/// Parses a definitions file. YAML is first converted to a JSON value so both
/// formats map onto the document identically.
pub fn parse_definitions(input: &str, format: DocumentFormat) -> Result<Definitions, FormatError> {
    let value = match format.resolve(input) {
        DocumentFormat::Yaml => {
            let yaml: serde_yaml::Value =
                serde_yaml::from_str(input).map_err(FormatError::ParseYaml)?;
            serde_json::to_value(yaml).map_err(FormatError::Shape)?
        }
        _ => serde_json::from_str::<Value>(input).map_err(FormatError::ParseJson)?,
    };
    serde_json::from_value(value).map_err(FormatError::Shape)
}

pub fn render_definitions(
    definitions: &Definitions,
    format: DocumentFormat,
) -> Result<String, FormatError> {
    match format {
        DocumentFormat::Yaml => serde_yaml::to_string(definitions).map_err(FormatError::RenderYaml),
        DocumentFormat::Json | DocumentFormat::Auto => {
            serde_json::to_string_pretty(definitions).map_err(FormatError::RenderJson)
        }
    }
}

#[cfg(test)]
#[path = "format_test.rs"]
mod tests;
