use clap::Parser;
use log::{info, warn};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

use tally::core::config::{self, CliOverrides, TallyConfig};
use tally::core::keys;
use tally::core::state::App;
use tally::tui;

#[derive(Parser)]
#[command(name = "tally", about = "Desk calculator with a linked history")]
struct Args {
    /// Number of lines kept in the history
    #[arg(long)]
    history_limit: Option<usize>,

    /// Hide the links between repeated values
    #[arg(long)]
    no_connections: bool,

    /// Print the whole history when quitting
    #[arg(long)]
    export_on_exit: bool,

    /// Replay these keys without a terminal UI and print the transcript
    #[arg(long)]
    keys: Option<String>,

    /// Log file path
    #[arg(long, default_value = "tally.log")]
    log_file: PathBuf,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            history_limit: self.history_limit,
            show_connections: self.no_connections.then_some(false),
            export_on_exit: self.export_on_exit.then_some(true),
        }
    }
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();

    // Initialize file logger
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        warn!("Falling back to default config: {}", e);
        TallyConfig::default()
    });
    let resolved = config::resolve(&file_config, &args.overrides());

    info!(
        "Tally starting up (history limit {}, connections {})",
        resolved.history_limit, resolved.show_connections
    );

    if let Some(keys) = &args.keys {
        let mut app = App::from_config(&resolved);
        let mapped = keys::replay(&mut app, keys);
        info!("Replayed {} keys", mapped);
        if let Some(error) = &app.error {
            eprintln!("{error}");
        }
        println!("{}", app.queue.export());
        return Ok(());
    }

    if let Some(transcript) = tui::run(resolved)? {
        println!("{transcript}");
    }
    Ok(())
}
