//! Downloading and storing the image.

use super::{Config, Error, Result, Transport};
use chrono::{Datelike, NaiveDate};
use image::{DynamicImage, ImageFormat};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Folder under the pictures directory holding every downloaded image.
pub const BACKGROUNDS_DIR: &str = "Bing Backgrounds";

/// Where the image for `date` is stored:
/// `<pictures_root>/Bing Backgrounds/<yyyy>/<M-d-yyyy>.jpg`.
pub fn background_image_path(pictures_root: &Path, date: NaiveDate) -> PathBuf {
    pictures_root
        .join(BACKGROUNDS_DIR)
        .join(date.year().to_string())
        .join(format!("{}.jpg", date.format("%-m-%-d-%Y")))
}

/// The configured pictures directory, or the user's.
pub fn pictures_dir(config: &Config) -> Result<PathBuf> {
    if let Some(dir) = &config.pictures_dir {
        return Ok(dir.clone());
    }

    dirs::picture_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Pictures")))
        .ok_or(Error::Config("Couldn't find the pictures directory."))
}

/// Download and decode the image at `url`.
pub fn download_background(transport: &dyn Transport, url: &str) -> Result<DynamicImage> {
    info!("Downloading background...");
    let bytes = transport.get(url)?;
    debug!(len = bytes.len(), "downloaded {}", url);
    Ok(image::load_from_memory(&bytes)?)
}

/// Write `background` to `path` as a JPEG, replacing any existing file.
pub fn save_background(background: &DynamicImage, path: &Path) -> Result<()> {
    info!("Saving background...");

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    // JPEG has no alpha channel.
    DynamicImage::ImageRgb8(background.to_rgb8()).save_with_format(path, ImageFormat::Jpeg)?;

    Ok(())
}
