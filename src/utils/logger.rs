use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Other crates only report warnings unless `-v` asks for the HTTP client's
/// request traces too.
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "warn,volby_scrape=debug,reqwest=debug,hyper_util=debug"
    } else {
        "warn,volby_scrape=info"
    }
}

pub fn init_cli_logger(verbose: bool) {
    // RUST_LOG wins over the built-in directives.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(verbose)
                .without_time()
                .compact(),
        )
        .init();
}
