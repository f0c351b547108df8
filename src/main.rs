use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use seamark::{init_logging, AppEvent, Config, Interest, Journal, Session};

/// Replays JSON-lines map events and prints the stored feature collection.
#[derive(Parser, Debug)]
#[command(name = "seamark")]
#[command(about = "Replay map annotation events against persistent storage")]
#[command(version)]
struct Args {
    /// Event log to replay (reads stdin if omitted)
    events: Option<PathBuf>,

    /// Config file, `.json` or `.toml` (platform config path if omitted)
    #[arg(short, long, value_name = "PATH", env = "SEAMARK_CONFIG")]
    config: Option<PathBuf>,

    /// Append every applied event to this file
    #[arg(short, long, value_name = "PATH")]
    journal: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging()?;
    tracing::info!("SeaMark {}", seamark::VERSION);

    let config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load_or_default()?,
    };
    let mut session = Session::from_config(&config)?;

    if let Some(path) = &args.journal {
        let journal = Journal::open(path)
            .with_context(|| format!("opening journal {}", path.display()))?;
        journal.attach(session.bus(), Interest::Everything);
        tracing::info!("Journaling applied events to {}", path.display());
    }

    let reader: Box<dyn BufRead> = match &args.events {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(std::io::stdin().lock()),
    };

    let mut applied = 0usize;
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match serde_json::from_str::<AppEvent>(line) {
            Ok(event) => {
                if session.dispatch(event).is_ok() {
                    applied += 1;
                }
            }
            Err(e) => tracing::warn!("Line {}: not an event: {}", number + 1, e),
        }
    }
    tracing::info!("Applied {} event(s)", applied);

    println!("{}", serde_json::to_string_pretty(&session.features())?);
    Ok(())
}
