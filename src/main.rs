use apollo::core::config::{self, CliOverrides};
use apollo::tui;
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "apollo", about = "Ask questions about any website")]
struct Args {
    /// Website to ask questions about
    #[arg(short, long)]
    url: Option<String>,

    /// Base URL of the Q&A service
    #[arg(long)]
    base_url: Option<String>,

    /// Seconds to wait for an answer before giving up
    #[arg(long)]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to apollo.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("apollo.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            log::warn!("Falling back to default config: {}", e);
            config::ApolloConfig::default()
        }
    };
    let cli = CliOverrides {
        website: args.url,
        base_url: args.base_url,
        timeout_secs: args.timeout,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!(
        "Apollo starting up: service={}, website={:?}, timeout={}s",
        resolved.base_url,
        resolved.website,
        resolved.timeout.as_secs()
    );

    tui::run(resolved)
}
