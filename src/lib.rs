//! Bing Background
//!
//! Download the Bing image of the day to
//! `<Pictures>/Bing Backgrounds/<yyyy>/<M-d-yyyy>.jpg` and set it as the
//! desktop background. Settings are read from
//! `~/.config/bing_background/config.toml`.

pub mod background;
mod config;
pub mod desktop;
mod error;
pub mod metadata;
pub mod resolution;
pub mod transport;

pub use self::config::{Config, CONFIG_ENV};
pub use self::desktop::{Desktop, PicturePosition};
pub use self::error::Error;
pub use self::metadata::ImageMetadata;
pub use self::resolution::Resolution;
pub use self::transport::{HttpTransport, Transport};

use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::{debug, info};

/// Result type alias to handle errors.
pub type Result<T> = std::result::Result<T, Error>;

/// Whether the service root answers at all.
pub fn is_online(transport: &dyn Transport, service_url: &str) -> bool {
    match transport.get(service_url) {
        Ok(_) => true,
        Err(e) => {
            debug!("connectivity check failed: {}", e);
            false
        }
    }
}

/// Main entry point.
///
/// Downloads the image of the day, stores it for `today` and sets it as the
/// background. Returns where the image was saved.
pub fn run(
    config: &Config,
    transport: &dyn Transport,
    desktop: &dyn Desktop,
    today: NaiveDate,
) -> Result<PathBuf> {
    let service_url = config.service_url.trim_end_matches('/');

    if !is_online(transport, service_url) {
        return Err(Error::Offline);
    }

    let metadata = metadata::fetch_metadata(transport, service_url, &config.country_code)?;
    info!("Today's image: {}", metadata.title());

    let image_base_url = format!("{}{}", service_url, metadata.url_base);
    let resolution = config
        .force_resolution
        .or_else(|| desktop.primary_resolution())
        .unwrap_or(resolution::FALLBACK);
    let suffix = resolution::resolve_suffix(transport, &image_base_url, resolution);

    let image_url = format!("{}{}", image_base_url, suffix);
    let image = background::download_background(transport, &image_url)?;

    let path = background::background_image_path(&background::pictures_dir(config)?, today);
    background::save_background(&image, &path)?;

    desktop::set_background(desktop, config.position, &path)?;

    Ok(path)
}
