//! Bing Background

use bing_background::{Config, HttpTransport, PicturePosition, Resolution};
use chrono::Local;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Set the Bing image of the day as the desktop background.
#[derive(Parser, Debug)]
#[command(name = "bing_background", version, about)]
struct Args {
    /// Config file to read instead of ~/.config/bing_background/config.toml.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Market to request the image for, e.g. en-GB.
    #[arg(long)]
    country_code: Option<String>,

    /// Resolution to request instead of the primary display's, e.g. 2560x1440.
    #[arg(long)]
    force_resolution: Option<Resolution>,

    /// tile, center, stretch, fit or fill.
    #[arg(long)]
    position: Option<PicturePosition>,
}

fn config(args: Args) -> bing_background::Result<Config> {
    let mut config = Config::load(args.config)?;

    if let Some(country_code) = args.country_code {
        config.country_code = country_code;
    }
    if let Some(resolution) = args.force_resolution {
        config.force_resolution = Some(resolution);
    }
    if let Some(position) = args.position {
        config.position = position;
    }

    config.validate()?;
    Ok(config)
}

/// Main binary point of entry
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let result = config(Args::parse()).and_then(|config| {
        let transport = HttpTransport::new()?;
        let desktop = bing_background::desktop::native();
        bing_background::run(&config, &transport, desktop.as_ref(), Local::now().date_naive())
    });

    match result {
        Ok(path) => tracing::info!("Background saved to {}", path.display()),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
