use tracing_subscriber::EnvFilter;

const QUIET_DIRECTIVES: &str = "warn";
const VERBOSE_DIRECTIVES: &str = "warn,brokerdefs_client=debug,brokerdefs_runner=debug";

/// Logs go to stderr; stdout carries documents and reports. `RUST_LOG` wins
/// over `--verbose` when set.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            VERBOSE_DIRECTIVES
        } else {
            QUIET_DIRECTIVES
        })
    });
    // A second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
