use brokerdefs_core::DocumentFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "brokerdefs")]
#[command(about = "Back up and restore broker definitions through the management API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Export definitions for the whole broker or one vhost
    Backup(BackupCommand),
    /// Import a definitions file
    Restore(RestoreCommand),
    /// Summarize a definitions file without contacting the broker
    Inspect(InspectCommand),
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl From<FileFormat> for DocumentFormat {
    fn from(format: FileFormat) -> Self {
        match format {
            FileFormat::Json => DocumentFormat::Json,
            FileFormat::Yaml => DocumentFormat::Yaml,
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub struct BackupCommand {
    #[arg(long)]
    pub config: PathBuf,
    #[arg(long)]
    pub vhost: Option<String>,
    /// Write the document here and print a summary instead of the document
    #[arg(long)]
    pub out: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub document_format: Option<FileFormat>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Clone, clap::Args)]
pub struct RestoreCommand {
    #[arg(long)]
    pub config: PathBuf,
    #[arg(long)]
    pub file: PathBuf,
    #[arg(long)]
    pub vhost: Option<String>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Clone, clap::Args)]
pub struct InspectCommand {
    #[arg(long)]
    pub file: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl Commands {
    pub fn verbose(&self) -> bool {
        match self {
            Commands::Backup(command) => command.verbose,
            Commands::Restore(command) => command.verbose,
            Commands::Inspect(_) => false,
        }
    }
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
