use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The service root couldn't be reached.
    #[error("no internet connection")]
    Offline,

    #[error("{0}")]
    Config(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid image archive response: {0}")]
    Json(#[from] serde_json::Error),

    /// The archive response parsed, but listed no images.
    #[error("image archive response contains no images")]
    NoImages,

    #[error("image archive entry is missing `{0}`")]
    MissingField(&'static str),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Failure reported by the platform's desktop settings.
    #[error("couldn't set the desktop background: {0}")]
    Desktop(String),
}
