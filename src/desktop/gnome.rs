use super::{Desktop, PicturePosition};
use crate::{Error, Resolution, Result};
use std::path::Path;
use std::process::Command;
use tracing::{debug, warn};

const SCHEMA: &str = "org.gnome.desktop.background";

/// GNOME-style desktops, configured through `gsettings`.
#[derive(Debug, Default)]
pub struct Gnome;

fn file_uri(path: &Path) -> Result<String> {
    let s = path
        .to_str()
        .ok_or(Error::Desktop("path is not valid UTF-8".to_string()))?;
    Ok(format!("file://{}", s))
}

fn gsettings_set(key: &str, value: &str) -> Result<()> {
    let status = Command::new("gsettings")
        .args(["set", SCHEMA, key, value])
        .status()
        .map_err(|e| Error::Desktop(format!("couldn't run gsettings: {}", e)))?;

    if status.success() {
        Ok(())
    } else {
        Err(Error::Desktop(format!("gsettings failed to set {}", key)))
    }
}

/// Mode of an output line such as
/// `DP-1 connected primary 2560x1440+0+0 (normal left ...) 597mm x 336mm`.
fn output_mode(line: &str) -> Option<Resolution> {
    line.split_whitespace()
        .find_map(|word| word.split_once('+'))
        .and_then(|(mode, _)| mode.parse().ok())
}

/// Size of the primary display from `xrandr --current` output.
///
/// Uses the output marked `primary`, then the first connected output, then
/// the `current W x H` size of the whole screen.
fn parse_xrandr(output: &str) -> Option<Resolution> {
    let connected = || output.lines().filter(|line| line.contains(" connected "));

    connected()
        .filter(|line| line.contains(" connected primary "))
        .find_map(output_mode)
        .or_else(|| connected().find_map(output_mode))
        .or_else(|| {
            let line = output.lines().find(|line| line.starts_with("Screen "))?;
            let current = line
                .split(',')
                .find_map(|part| part.trim().strip_prefix("current "))?;
            current.replace(' ', "").parse().ok()
        })
}

impl Desktop for Gnome {
    fn primary_resolution(&self) -> Option<Resolution> {
        let output = Command::new("xrandr").arg("--current").output().ok()?;
        if !output.status.success() {
            debug!("xrandr exited with {}", output.status);
            return None;
        }
        parse_xrandr(&String::from_utf8_lossy(&output.stdout))
    }

    fn set_style(&self, position: PicturePosition) -> Result<()> {
        gsettings_set("picture-options", position.gnome_option())
    }

    fn apply_wallpaper(&self, path: &Path) -> Result<()> {
        let uri = file_uri(path)?;

        gsettings_set("picture-uri", &uri)?;

        // Only exists on GNOME 42 and later.
        if let Err(e) = gsettings_set("picture-uri-dark", &uri) {
            warn!("{}", e);
        }

        Ok(())
    }
}
