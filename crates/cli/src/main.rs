//! `quicksort` command-line entry point

fn main() {
    // Logs go to stderr so stdout carries only the report
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();

    quicksort_cli::run();
}
