use crate::cli::{BackupCommand, InspectCommand, OutputFormat, RestoreCommand};
use crate::config::{build_management_endpoint, load_runner_config, ConfigIssue, RunnerConfigError};
use brokerdefs_client::{ClientError, DefinitionsClient, TransportError};
use brokerdefs_core::{
    definitions_fingerprint, parse_definitions, render_definitions, Definitions, DocumentFormat,
    FormatError,
};
use serde::Serialize;
use serde_json::Map;
use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("read file failed `{path}`: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("write file failed `{path}`: {source}")]
    WriteFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] RunnerConfigError),
    #[error("runner config cannot build a management endpoint: {0:?}")]
    Endpoint(Vec<ConfigIssue>),
    #[error("management transport setup failed: {0}")]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("definitions file `{path}` invalid: {source}")]
    Document {
        path: String,
        #[source]
        source: FormatError,
    },
    #[error("render definitions failed: {0}")]
    Render(#[source] FormatError),
    #[error("json encode failed: {0}")]
    JsonEncode(#[from] serde_json::Error),
    #[error("restore rejected with status {status}: {body}")]
    RestoreRejected { status: u16, body: String },
}

/// What a command did, printed as text or JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefinitionsReport {
    pub scope: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broker_version: Option<String>,
    pub sections: Map<String, serde_json::Value>,
    pub fingerprint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl DefinitionsReport {
    fn new(definitions: &Definitions, vhost: Option<&str>) -> Result<Self, RunnerError> {
        let sections = definitions
            .section_counts()
            .into_iter()
            .map(|(name, count)| (name.to_string(), count.into()))
            .collect();
        Ok(Self {
            scope: scope_label(vhost),
            broker_version: definitions.broker_version.clone(),
            sections,
            fingerprint: definitions_fingerprint(definitions)?,
            file: None,
            status: None,
        })
    }

    fn render(&self, format: OutputFormat) -> Result<String, RunnerError> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Text => {
                let mut lines = vec![format!("scope: {}", self.scope)];
                if let Some(file) = &self.file {
                    lines.push(format!("file: {file}"));
                }
                if let Some(status) = self.status {
                    lines.push(format!("status: {status}"));
                }
                if let Some(version) = &self.broker_version {
                    lines.push(format!("broker_version: {version}"));
                }
                lines.push(format!("fingerprint: {}", self.fingerprint));
                for (name, count) in &self.sections {
                    lines.push(format!("{name}: {count}"));
                }
                Ok(lines.join("\n"))
            }
        }
    }
}

pub fn client_from_config(config_path: &Path) -> Result<DefinitionsClient, RunnerError> {
    let config = load_runner_config(config_path)?;
    let endpoint = build_management_endpoint(&config).map_err(RunnerError::Endpoint)?;
    Ok(DefinitionsClient::http(endpoint)?)
}

pub fn execute_backup(command: &BackupCommand) -> Result<String, RunnerError> {
    let client = client_from_config(&command.config)?;
    execute_backup_with_client(command, &client)
}

pub fn execute_backup_with_client(
    command: &BackupCommand,
    client: &DefinitionsClient,
) -> Result<String, RunnerError> {
    let vhost = command.vhost.as_deref();
    let definitions = match vhost {
        Some(vhost) => client.backup_vhost(vhost)?,
        None => client.backup_all()?,
    };
    tracing::info!(scope = %scope_label(vhost), "backup received");

    let document_format: DocumentFormat = match (command.document_format, &command.out) {
        (Some(format), _) => format.into(),
        (None, Some(out)) => DocumentFormat::from_path(out),
        (None, None) => DocumentFormat::Json,
    };
    let rendered = render_definitions(&definitions, document_format).map_err(RunnerError::Render)?;

    let Some(out) = &command.out else {
        return Ok(rendered);
    };
    fs::write(out, rendered.as_bytes()).map_err(|source| RunnerError::WriteFile {
        path: out.display().to_string(),
        source,
    })?;
    let mut report = DefinitionsReport::new(&definitions, vhost)?;
    report.file = Some(out.display().to_string());
    report.render(command.format)
}

pub fn execute_restore(command: &RestoreCommand) -> Result<String, RunnerError> {
    let client = client_from_config(&command.config)?;
    execute_restore_with_client(command, &client)
}

pub fn execute_restore_with_client(
    command: &RestoreCommand,
    client: &DefinitionsClient,
) -> Result<String, RunnerError> {
    let definitions = read_definitions_file(&command.file)?;
    let vhost = command.vhost.as_deref();
    let response = match vhost {
        Some(vhost) => client.restore_vhost(&definitions, vhost)?,
        None => client.restore_all(&definitions)?,
    };
    if !response.is_success() {
        return Err(RunnerError::RestoreRejected {
            status: response.status,
            body: response.body_text(),
        });
    }
    tracing::info!(scope = %scope_label(vhost), status = response.status, "restore accepted");

    let mut report = DefinitionsReport::new(&definitions, vhost)?;
    report.file = Some(command.file.display().to_string());
    report.status = Some(response.status);
    report.render(command.format)
}

pub fn execute_inspect(command: &InspectCommand) -> Result<String, RunnerError> {
    let definitions = read_definitions_file(&command.file)?;
    let mut report = DefinitionsReport::new(&definitions, None)?;
    report.scope = "file".to_string();
    report.file = Some(command.file.display().to_string());
    report.render(command.format)
}

fn read_definitions_file(path: &Path) -> Result<Definitions, RunnerError> {
    let text = fs::read_to_string(path).map_err(|source| RunnerError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    parse_definitions(text.as_str(), DocumentFormat::from_path(path)).map_err(|source| {
        RunnerError::Document {
            path: path.display().to_string(),
            source,
        }
    })
}

fn scope_label(vhost: Option<&str>) -> String {
    match vhost {
        Some(vhost) => format!("vhost {vhost}"),
        None => "broker".to_string(),
    }
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
