use brokerdefs_client::{ManagementEndpoint, DEFAULT_TIMEOUT_MS};
use brokerdefs_core::DocumentFormat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerConfig {
    #[serde(default = "default_runner_schema")]
    pub schema: String,
    pub management: ManagementConfig,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagementConfig {
    pub url: String,
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl fmt::Debug for ManagementConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagementConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConfigIssue {
    pub field: String,
    pub message: String,
    pub reference: String,
}

impl ConfigIssue {
    pub fn sort_stable(issues: &mut [Self]) {
        issues.sort_by(|left, right| {
            (&left.field, &left.reference, &left.message).cmp(&(
                &right.field,
                &right.reference,
                &right.message,
            ))
        });
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} [{}]", self.field, self.message, self.reference)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RunnerConfigError {
    #[error("read runner config failed `{path}`: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("runner config parse failed: {0}")]
    Parse(String),
    #[error("runner config validation failed: {}", join_issues(.0))]
    Validation(Vec<ConfigIssue>),
}

/// Reads, expands and decodes a runner config. The file extension picks the
/// format; anything else is sniffed the same way definitions files are.
pub fn load_runner_config(path: &Path) -> Result<RunnerConfig, RunnerConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| RunnerConfigError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    let expanded = expand_env_placeholders(&raw).map_err(RunnerConfigError::Parse)?;
    let config = decode_runner_config(&expanded, DocumentFormat::from_path(path))?;
    let config = checked(config)?;
    tracing::debug!(path = %path.display(), url = %config.management.url, "loaded runner config");
    Ok(config)
}

fn decode_runner_config(
    input: &str,
    format: DocumentFormat,
) -> Result<RunnerConfig, RunnerConfigError> {
    match format.resolve(input) {
        DocumentFormat::Json => serde_json::from_str(input)
            .map_err(|error| RunnerConfigError::Parse(format!("json decode error: {error}"))),
        _ => serde_yaml::from_str(input)
            .map_err(|error| RunnerConfigError::Parse(format!("yaml decode error: {error}"))),
    }
}

fn checked(config: RunnerConfig) -> Result<RunnerConfig, RunnerConfigError> {
    let mut issues = validate_runner_config(&config);
    if issues.is_empty() {
        return Ok(config);
    }
    ConfigIssue::sort_stable(&mut issues);
    Err(RunnerConfigError::Validation(issues))
}

pub fn validate_runner_config(config: &RunnerConfig) -> Vec<ConfigIssue> {
    let mut issues = Vec::<ConfigIssue>::new();
    if config.schema != default_runner_schema() {
        issues.push(config_issue(
            "schema",
            "runner.config.schema",
            format!(
                "unsupported runner config schema `{}` (expected `{}`)",
                config.schema,
                default_runner_schema()
            ),
        ));
    }
    let management = &config.management;
    if !(management.url.starts_with("http://") || management.url.starts_with("https://")) {
        issues.push(config_issue(
            "management.url",
            "runner.config.management.url",
            format!("management url `{}` must be http(s)", management.url),
        ));
    }
    if management.username.trim().is_empty() {
        issues.push(config_issue(
            "management.username",
            "runner.config.management.username",
            "management username must not be empty".to_string(),
        ));
    }
    if matches!(management.timeout_ms, Some(0)) {
        issues.push(config_issue(
            "management.timeout_ms",
            "runner.config.management.timeout",
            "timeout_ms must be > 0".to_string(),
        ));
    }
    issues
}

pub fn build_management_endpoint(config: &RunnerConfig) -> Result<ManagementEndpoint, Vec<ConfigIssue>> {
    let mut issues = validate_runner_config(config);
    if !issues.is_empty() {
        ConfigIssue::sort_stable(&mut issues);
        return Err(issues);
    }
    let management = &config.management;
    ManagementEndpoint::new(
        management.url.clone(),
        management.username.clone(),
        management.password.clone(),
    )
    .and_then(|endpoint| endpoint.with_timeout_ms(management.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS)))
    .map_err(|error| {
        vec![config_issue(
            "management",
            "runner.config.management.endpoint",
            format!("invalid management endpoint: {error}"),
        )]
    })
}

fn config_issue(field: &str, reference: &str, message: String) -> ConfigIssue {
    ConfigIssue {
        field: field.to_string(),
        message,
        reference: reference.to_string(),
    }
}

fn join_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn default_runner_schema() -> String {
    "brokerdefs-runner/0.1.0".to_string()
}

/// Replaces `${NAME}` and `${NAME:-fallback}` with environment values.
fn expand_env_placeholders(input: &str) -> Result<String, String> {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(open) = rest.find("${") {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];
        let close = after_open
            .find('}')
            .ok_or_else(|| "unterminated env placeholder `${...`".to_string())?;
        let placeholder = &after_open[..close];
        let (name, fallback) = match placeholder.split_once(":-") {
            Some((name, fallback)) => (name, Some(fallback)),
            None => (placeholder, None),
        };
        if name.is_empty() {
            return Err(format!("empty env placeholder `${{{placeholder}}}`"));
        }
        match (std::env::var(name), fallback) {
            (Ok(value), _) => out.push_str(value.as_str()),
            (Err(_), Some(fallback)) => out.push_str(fallback),
            (Err(_), None) => {
                return Err(format!("missing env var for placeholder `${{{name}}}`"));
            }
        }
        rest = &after_open[close + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
