mod cli;
mod config;
mod logging;
mod run;

pub use cli::{BackupCommand, Cli, Commands, FileFormat, InspectCommand, OutputFormat, RestoreCommand};
pub use config::{
    build_management_endpoint, load_runner_config, validate_runner_config, ConfigIssue,
    ManagementConfig, RunnerConfig, RunnerConfigError,
};
pub use logging::init_tracing;
pub use run::{
    client_from_config, execute_backup, execute_backup_with_client, execute_inspect,
    execute_restore, execute_restore_with_client, DefinitionsReport, RunnerError,
};
