use super::{Error, Result, Transport};
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// Resolution every image in the archive is published in.
pub const FALLBACK: Resolution = Resolution {
    width: 1920,
    height: 1080,
};

/// Pixel dimensions of a display, written `<width>x<height>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// URL suffix selecting this variant of an image, e.g. `_1920x1080.jpg`.
    pub fn suffix(&self) -> String {
        format!("_{}.jpg", self)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Resolution {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (width, height) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or(Error::Config("Resolution must be written as <width>x<height>."))?;

        let parse = |n: &str| {
            n.trim()
                .parse::<u32>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or(Error::Config(
                    "Resolution width and height must be positive integers.",
                ))
        };

        Ok(Self::new(parse(width)?, parse(height)?))
    }
}

/// Pick the URL suffix to download `image_base_url` with.
///
/// Probes `resolution` once with a HEAD request. Anything but a `200 OK`
/// falls back to [`FALLBACK`]; no other resolution is tried.
pub fn resolve_suffix(
    transport: &dyn Transport,
    image_base_url: &str,
    resolution: Resolution,
) -> String {
    let candidate = resolution.suffix();

    match transport.head(&format!("{}{}", image_base_url, candidate)) {
        Ok(200) => {
            info!("Background for {} found.", resolution);
            candidate
        }
        _ => {
            info!("No background for {} was found.", resolution);
            info!("Using {} instead.", FALLBACK);
            FALLBACK.suffix()
        }
    }
}
