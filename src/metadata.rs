use super::{Error, Result, Transport};
use serde::Deserialize;
use tracing::info;

/// Response of `HPImageArchive.aspx?format=js`.
#[derive(Debug, Deserialize)]
pub struct ImageArchive {
    #[serde(default)]
    pub images: Vec<ArchiveImage>,
}

/// One entry of the image archive. Only `urlbase` is required to download
/// the image.
#[derive(Debug, Default, Deserialize)]
pub struct ArchiveImage {
    pub urlbase: Option<String>,
    pub copyright: Option<String>,
    pub title: Option<String>,
    pub startdate: Option<String>,
    pub copyrightlink: Option<String>,
}

/// What's needed from today's archive entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMetadata {
    /// Path fragment identifying the image, e.g. `/th?id=OHR.Example_EN-US1234567890`.
    pub url_base: String,

    /// Description and copyright holder, e.g. `Example Place (© Example Corp)`.
    pub copyright_text: String,
}

impl ImageMetadata {
    /// The part of the copyright text before ` (`.
    ///
    /// Text without ` (` is returned whole.
    pub fn title(&self) -> &str {
        match self.copyright_text.find(" (") {
            Some(end) => &self.copyright_text[..end],
            None => &self.copyright_text,
        }
    }
}

impl TryFrom<ImageArchive> for ImageMetadata {
    type Error = Error;

    fn try_from(archive: ImageArchive) -> Result<Self> {
        let image = archive.images.into_iter().next().ok_or(Error::NoImages)?;

        Ok(Self {
            url_base: image.urlbase.ok_or(Error::MissingField("urlbase"))?,
            copyright_text: image.copyright.unwrap_or_default(),
        })
    }
}

/// URL of the archive listing today's image for `country_code`.
pub fn archive_url(service_url: &str, country_code: &str) -> String {
    format!(
        "{}/HPImageArchive.aspx?format=js&idx=0&n=1&mkt={}",
        service_url.trim_end_matches('/'),
        country_code
    )
}

/// Parse an archive response body.
pub fn parse_metadata(body: &[u8]) -> Result<ImageMetadata> {
    let archive: ImageArchive = serde_json::from_slice(body)?;
    ImageMetadata::try_from(archive)
}

/// Download and parse today's archive entry.
pub fn fetch_metadata(
    transport: &dyn Transport,
    service_url: &str,
    country_code: &str,
) -> Result<ImageMetadata> {
    info!("Downloading JSON...");
    let body = transport.get(&archive_url(service_url, country_code))?;
    parse_metadata(&body)
}
