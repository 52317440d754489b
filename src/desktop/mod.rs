//! Desktop background backends.
//!
//! Everything that touches operating system settings lives here, behind
//! [`Desktop`].

use super::{Error, Resolution, Result};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

#[cfg(not(windows))]
mod gnome;
#[cfg(windows)]
mod win32;

#[cfg(not(windows))]
pub use gnome::Gnome;
#[cfg(windows)]
pub use win32::Win32;

/// How the background image is placed on the screen.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PicturePosition {
    /// Repeat the image across the screen.
    Tile,
    /// Center the image without scaling it.
    Center,
    /// Stretch the image to the screen, ignoring its aspect ratio.
    Stretch,
    /// Scale the image to fit inside the screen.
    Fit,
    /// Scale and crop the image to cover the screen.
    #[default]
    Fill,
}

impl PicturePosition {
    /// `(PicturePosition, TileWallpaper)` under `HKCU\Control Panel\Desktop`.
    pub fn registry_values(self) -> (&'static str, &'static str) {
        match self {
            Self::Tile => ("0", "1"),
            Self::Center => ("0", "0"),
            Self::Stretch => ("2", "0"),
            Self::Fit => ("6", "0"),
            Self::Fill => ("10", "0"),
        }
    }

    /// Value of GNOME's `org.gnome.desktop.background picture-options`.
    pub fn gnome_option(self) -> &'static str {
        match self {
            Self::Tile => "wallpaper",
            Self::Center => "centered",
            Self::Stretch => "stretched",
            Self::Fit => "scaled",
            Self::Fill => "zoom",
        }
    }
}

impl FromStr for PicturePosition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tile" => Ok(Self::Tile),
            "center" => Ok(Self::Center),
            "stretch" => Ok(Self::Stretch),
            "fit" => Ok(Self::Fit),
            "fill" => Ok(Self::Fill),
            _ => Err(Error::Config(
                "Picture position must be one of tile, center, stretch, fit or fill.",
            )),
        }
    }
}

/// Operating system desktop settings.
pub trait Desktop {
    /// Size of the primary display, if it can be determined.
    fn primary_resolution(&self) -> Option<Resolution>;

    /// Store how backgrounds are placed on the screen.
    fn set_style(&self, position: PicturePosition) -> Result<()>;

    /// Use the image at the absolute `path` as the background, persisting
    /// the change and notifying running applications.
    fn apply_wallpaper(&self, path: &Path) -> Result<()>;
}

/// The backend for the platform this was built for.
pub fn native() -> Box<dyn Desktop> {
    #[cfg(windows)]
    {
        Box::new(Win32)
    }
    #[cfg(not(windows))]
    {
        Box::new(Gnome)
    }
}

/// Set the image at `path` as the desktop background.
pub fn set_background(desktop: &dyn Desktop, position: PicturePosition, path: &Path) -> Result<()> {
    info!("Setting background...");

    let path = absolute(path)?;

    desktop.set_style(position)?;
    desktop.apply_wallpaper(&path)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<String>>,
    }

    impl Desktop for Recorder {
        fn primary_resolution(&self) -> Option<Resolution> {
            None
        }

        fn set_style(&self, position: PicturePosition) -> Result<()> {
            self.calls.borrow_mut().push(format!("style {:?}", position));
            Ok(())
        }

        fn apply_wallpaper(&self, path: &Path) -> Result<()> {
            self.calls.borrow_mut().push(format!("apply {}", path.display()));
            Ok(())
        }
    }

    #[test]
    fn registry_values() {
        assert_eq!(("0", "1"), PicturePosition::Tile.registry_values());
        assert_eq!(("0", "0"), PicturePosition::Center.registry_values());
        assert_eq!(("2", "0"), PicturePosition::Stretch.registry_values());
        assert_eq!(("6", "0"), PicturePosition::Fit.registry_values());
        assert_eq!(("10", "0"), PicturePosition::Fill.registry_values());
    }

    #[test]
    fn default_is_fill() {
        assert_eq!(PicturePosition::Fill, PicturePosition::default());
        assert_eq!("zoom", PicturePosition::default().gnome_option());
    }

    #[test]
    fn parse_position() {
        assert_eq!(PicturePosition::Fit, "fit".parse().unwrap());
        assert_eq!(PicturePosition::Center, " Center ".parse().unwrap());
        assert!("zoom".parse::<PicturePosition>().is_err());
    }

    #[test]
    fn style_then_wallpaper_with_absolute_path() {
        let desktop = Recorder::default();

        set_background(&desktop, PicturePosition::Tile, Path::new("relative.jpg")).unwrap();

        let calls = desktop.calls.borrow();
        assert_eq!("style Tile", calls[0]);
        assert!(calls[1].starts_with("apply "));
        assert!(Path::new(calls[1].trim_start_matches("apply ")).is_absolute());
        assert!(calls[1].ends_with("relative.jpg"));
    }
}
