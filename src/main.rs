use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cspf::model::{Playlist, PlaylistInit, Value};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cspf")]
#[command(about = "Inspect, validate and encode CSPF playlists", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a summary of a .cspf file
    Inspect {
        /// Path to the .cspf file
        file: String,

        /// Print the full JSON transport shape instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Check that a file holds a CSPF playlist
    Validate {
        /// Path to the .cspf file
        file: String,
    },

    /// Encode a JSON playlist into canonical CSPF bytes
    Encode {
        /// Path to the JSON document (missing fields take defaults)
        input: String,

        /// Output .cspf path
        #[arg(short = 'o', long)]
        output: PathBuf,
    },
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

fn load(path: &str) -> Result<Playlist> {
    let path = expand(path);
    let bytes = fs::read(&path).with_context(|| format!("Failed to read {:?}", path))?;
    log::debug!("Read {} bytes from {:?}", bytes.len(), path);

    Playlist::from_bytes(&bytes).with_context(|| format!("Failed to load playlist from {:?}", path))
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match args.command {
        Command::Inspect { file, json } => {
            let playlist = load(&file)?;
            if json {
                let shape = playlist.to_transport_shape();
                println!("{}", serde_json::to_string_pretty(&shape)?);
                return Ok(());
            }

            println!("Title:   {}", playlist.title());
            println!("Creator: {}", playlist.creator());
            println!("Tracks:  {}", playlist.track_count());
            for (index, track) in playlist.tracks().iter().enumerate() {
                println!(
                    "  {:>3}. {} - {} ({})",
                    index + 1,
                    track.creator(),
                    track.title(),
                    track.location()
                );
            }
        }

        Command::Validate { file } => {
            let playlist = load(&file)?;
            log::info!("✅ {} is a CSPF playlist with {} tracks", file, playlist.track_count());
        }

        Command::Encode { input, output } => {
            let input = expand(&input);
            let text = fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {:?}", input))?;
            let json: serde_json::Value =
                serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {:?}", input))?;

            let init = PlaylistInit::from_shape(&Value::from(json))?;
            let playlist = Playlist::new(init)?;
            let bytes = playlist.to_bytes()?;

            let output = expand(&output.to_string_lossy());
            fs::write(&output, &bytes).with_context(|| format!("Failed to write {:?}", output))?;
            log::info!(
                "Wrote {} tracks ({} bytes) to {:?}",
                playlist.track_count(),
                bytes.len(),
                output
            );
        }
    }

    Ok(())
}
