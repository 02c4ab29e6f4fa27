use brokerdefs_runner::{execute_backup, execute_inspect, execute_restore, init_tracing, Cli, Commands};
use clap::Parser;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.command.verbose());
    let result = match &cli.command {
        Commands::Backup(command) => execute_backup(command),
        Commands::Restore(command) => execute_restore(command),
        Commands::Inspect(command) => execute_inspect(command),
    };

    match result {
        Ok(output) => {
            println!("{output}");
        }
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    }
}
