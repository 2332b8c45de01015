use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber;

use reelsmith::{
    assembly::AssemblyEngine,
    config::Config,
    pan::PanSelection,
};

#[derive(Parser)]
#[command(
    name = "reelsmith",
    version,
    about = "Assemble short vertical video reels from still images",
    long_about = "Reelsmith builds a fixed-length vertical reel from a folder of still images, panning across each one for motion, and lays a voiceover mixed with background music under the result."
)]
struct Cli {
    /// Directory containing still images (PNG, JPEG, WebP)
    #[arg(short, long)]
    images: PathBuf,

    /// Voiceover audio file (WAV, MP3, FLAC, OGG, M4A, AAC)
    #[arg(long)]
    voiceover: PathBuf,

    /// Background music file
    #[arg(short, long)]
    music: PathBuf,

    /// Output video file path
    #[arg(short, long)]
    output: PathBuf,

    /// Pan direction for every slide (default: random per slide)
    #[arg(short, long, value_enum)]
    pan: Option<PanSelection>,

    /// Seed for reproducible pan choices
    #[arg(long)]
    seed: Option<u64>,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .init();

    info!("Starting Reelsmith v{}", env!("CARGO_PKG_VERSION"));
    info!("Images: {:?}", cli.images);
    info!("Voiceover: {:?}", cli.voiceover);
    info!("Music: {:?}", cli.music);
    info!("Output: {:?}", cli.output);

    // Load configuration
    let mut config = match cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(&config_path)?
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    };

    // Command line flags override the pan settings
    if let Some(pan) = cli.pan {
        config.pan.mode = pan;
    }
    if let Some(seed) = cli.seed {
        config.pan.seed = Some(seed);
    }

    config.validate()?;

    // Create and run the assembly engine
    let engine = AssemblyEngine::new(config);

    info!("Starting assembly process...");
    match engine
        .assemble(&cli.images, &cli.voiceover, &cli.music, &cli.output)
        .await
    {
        Ok(reel) => {
            info!("Assembly complete! {:?} ({:.1} MB)",
                  reel.path, reel.file_size as f64 / 1024.0 / 1024.0);
            Ok(())
        }
        Err(e) => {
            error!("{}", e.user_message());
            Err(e.into())
        }
    }
}
