use clap::Parser;
use volby_scrape::utils::logger;
use volby_scrape::{app, CliConfig};

#[tokio::main]
async fn main() {
    // Wrong argument count prints usage and exits with status 2.
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    let code = app::run(&cli).await;
    std::process::exit(code);
}
