use std::sync::Arc;

use clap::Parser;
use nt_core::Result;
use nt_device::create_probe;
use nt_feed::{
    init_logging, DeviceArgs, FeedArgs, LogArgs, LogTarget, SearchController, Submission,
};
use tracing::info;

mod screen;
mod view;

#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
#[command(about = "Latest headlines, trimmed to the device's battery and connection")]
pub struct Cli {
    #[command(flatten)]
    feed: FeedArgs,
    #[command(flatten)]
    device: DeviceArgs,
    #[command(flatten)]
    log: LogArgs,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug, Clone)]
enum Commands {
    /// Interactive screen (default)
    Screen,
    /// Run one search and print the result. Without a query, runs the initial load.
    Search {
        query: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the current device state
    Device {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn log_target(command: &Commands, log: &LogArgs) -> LogTarget {
    match (&log.log_file, command) {
        (Some(path), _) => LogTarget::File(path.clone()),
        (None, Commands::Screen) => LogTarget::Discard,
        (None, _) => LogTarget::Stderr,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.clone().unwrap_or(Commands::Screen);
    init_logging(&log_target(&command, &cli.log))?;

    let probe_config = cli.device.probe_config();
    let probe = create_probe(&probe_config);
    info!("📡 Device probe initialized (using {})", probe_config.kind);

    if let Commands::Device { json } = command {
        let state = probe.sample();
        if json {
            println!("{}", serde_json::to_string_pretty(&state)?);
        } else {
            println!("{}", view::status_line(Some(&state)));
        }
        return Ok(());
    }

    let client = Arc::new(cli.feed.client()?);
    info!("📰 News client ready ({})", client.endpoint());
    let controller = SearchController::new(client, probe);

    match command {
        Commands::Screen => screen::run(controller).await?,
        Commands::Search { query, json } => {
            let submission = match query.as_deref() {
                Some(query) => controller.search(query).await,
                None => controller.mount().await,
            };
            if submission == Submission::Rejected {
                tracing::warn!("Search rejected, another request is in flight");
            }
            let screen = controller.screen();
            if json {
                println!("{}", serde_json::to_string_pretty(&view::Report::new(&screen))?);
            } else {
                print!("{}", view::render_text(&screen));
            }
        }
        Commands::Device { .. } => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_command_is_screen() {
        let cli = Cli::try_parse_from(["nt"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_search_args() {
        let cli =
            Cli::try_parse_from(["nt", "--battery", "10", "search", "café", "--json"]).unwrap();
        match cli.command {
            Some(Commands::Search { query, json }) => {
                assert_eq!(query.as_deref(), Some("café"));
                assert!(json);
            }
            other => panic!("Unexpected command: {:?}", other),
        }
        assert_eq!(cli.device.battery, Some(10));
    }

    #[test]
    fn test_screen_logs_are_discarded_without_file() {
        let none = LogArgs { log_file: None };
        assert_eq!(log_target(&Commands::Screen, &none), LogTarget::Discard);
        assert_eq!(log_target(&Commands::Device { json: false }, &none), LogTarget::Stderr);

        let path = PathBuf::from("/tmp/nt.log");
        let file = LogArgs {
            log_file: Some(path.clone()),
        };
        assert_eq!(log_target(&Commands::Screen, &file), LogTarget::File(path));
    }
}
