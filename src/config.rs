use super::{Error, PicturePosition, Resolution, Result};
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "BING_BACKGROUND_CONFIG";

/// Program configuration.
///
/// Every key is optional. Empty strings are treated as missing.
///
/// # Example
/// ```
/// # use bing_background::Config;
/// # let config: Config = toml::from_str(r#"
/// country_code = "en-GB"
/// force_resolution = "2560x1440"
/// position = "fit"
/// # "#).expect("Can't parse example config");
/// # config.validate().expect("Example config invalid");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Market to request the image for. Defaults to `en-US`.
    #[serde(deserialize_with = "non_empty_or_default_country")]
    pub country_code: String,

    /// Resolution to request instead of the primary display's.
    #[serde(deserialize_with = "non_empty")]
    pub force_resolution: Option<Resolution>,

    /// How the image is placed on the desktop, e.g. `fit`. Defaults to fill.
    #[serde(deserialize_with = "non_empty_or_default_position")]
    pub position: PicturePosition,

    /// Root of the image service. Defaults to `https://www.bing.com`.
    #[serde(deserialize_with = "non_empty_or_default_service")]
    pub service_url: String,

    /// Directory `Bing Backgrounds` is created in. Defaults to the user's
    /// pictures directory.
    #[serde(deserialize_with = "non_empty")]
    pub pictures_dir: Option<PathBuf>,
}

pub const DEFAULT_COUNTRY_CODE: &str = "en-US";
pub const DEFAULT_SERVICE_URL: &str = "https://www.bing.com";

impl Default for Config {
    fn default() -> Self {
        Self {
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            force_resolution: None,
            position: PicturePosition::default(),
            service_url: DEFAULT_SERVICE_URL.to_string(),
            pictures_dir: None,
        }
    }
}

impl Config {
    #[doc(hidden)]
    pub fn validate(&self) -> Result<()> {
        if self.country_code.trim().is_empty() {
            return Err(Error::Config("Country code must not be empty."));
        }

        if !(self.service_url.starts_with("http://") || self.service_url.starts_with("https://")) {
            return Err(Error::Config("Service URL must start with http:// or https://."));
        }

        Ok(())
    }

    /// The config file to read: `$BING_BACKGROUND_CONFIG`, or
    /// `~/.config/bing_background/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        std::env::var_os(CONFIG_ENV)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
            .or_else(|| {
                dirs::config_dir().map(|dir| dir.join("bing_background").join("config.toml"))
            })
    }

    /// Read the config given on the command line, which must exist, or the
    /// one at [`Config::default_path`].
    pub fn load(explicit: Option<PathBuf>) -> Result<Self> {
        match explicit {
            Some(filename) => Self::try_from(filename),
            None => Self::load_or_default(Self::default_path()),
        }
    }

    /// Read the config at `filename`, using defaults when it doesn't exist.
    pub fn load_or_default(filename: Option<PathBuf>) -> Result<Self> {
        match filename {
            Some(filename) if filename.exists() => Self::try_from(filename),
            _ => Ok(Self::default()),
        }
    }
}

impl TryFrom<PathBuf> for Config {
    type Error = Error;

    fn try_from(filename: PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(filename)?;

        let config: Self = toml::from_str(&contents)?;

        config.validate()?;

        Ok(config)
    }
}

fn non_empty<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(s) if !s.trim().is_empty() => s
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

fn non_empty_or_default_country<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<String, D::Error> {
    Ok(non_empty(deserializer)?.unwrap_or_else(|| DEFAULT_COUNTRY_CODE.to_string()))
}

fn non_empty_or_default_position<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<PicturePosition, D::Error> {
    Ok(non_empty(deserializer)?.unwrap_or_default())
}

fn non_empty_or_default_service<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<String, D::Error> {
    Ok(non_empty(deserializer)?.unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(Config::default(), config);
        assert_eq!("en-US", config.country_code);
        assert_eq!(PicturePosition::Fill, config.position);
        assert_eq!(None, config.force_resolution);
    }

    #[test]
    fn empty_values_use_defaults() {
        let config: Config = toml::from_str(
            r#"
            country_code = ""
            force_resolution = ""
            service_url = " "
            pictures_dir = ""
            "#,
        )
        .unwrap();
        assert_eq!(Config::default(), config);
    }

    #[test]
    fn all_keys() {
        let config: Config = toml::from_str(
            r#"
            country_code = "de-DE"
            force_resolution = "3840x2160"
            position = "stretch"
            service_url = "http://localhost:8080"
            pictures_dir = "/tmp/pictures"
            "#,
        )
        .unwrap();
        config.validate().unwrap();

        assert_eq!("de-DE", config.country_code);
        assert_eq!(Some(Resolution::new(3840, 2160)), config.force_resolution);
        assert_eq!(PicturePosition::Stretch, config.position);
        assert_eq!("http://localhost:8080", config.service_url);
        assert_eq!(Some(PathBuf::from("/tmp/pictures")), config.pictures_dir);
    }

    #[test]
    #[should_panic]
    fn bad_resolution() {
        toml::from_str::<Config>(r#"force_resolution = "huge""#).expect("resolution check failed");
    }

    #[test]
    #[should_panic]
    fn bad_position() {
        toml::from_str::<Config>(r#"position = "zoom""#).expect("position check failed");
    }

    #[test]
    #[should_panic]
    fn blank_country_code() {
        let config = Config {
            country_code: "  ".to_string(),
            ..Config::default()
        };
        config.validate().expect("country code check failed");
    }

    #[test]
    #[should_panic]
    fn service_url_without_scheme() {
        let config = Config {
            service_url: "www.bing.com".to_string(),
            ..Config::default()
        };
        config.validate().expect("service url check failed");
    }

    #[test]
    fn position_like_the_command_line() {
        let config: Config = toml::from_str(r#"position = "Fit""#).unwrap();
        assert_eq!(PicturePosition::Fit, config.position);

        let config: Config = toml::from_str(r#"position = """#).unwrap();
        assert_eq!(PicturePosition::Fill, config.position);
    }

    #[test]
    fn explicit_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(dir.path().join("typo.toml"))).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let filename = dir.path().join("other.toml");
        std::fs::write(&filename, "position = \"tile\"\n").unwrap();

        let config = Config::load(Some(filename)).unwrap();
        assert_eq!(PicturePosition::Tile, config.position);
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(Some(dir.path().join("config.toml"))).unwrap();
        assert_eq!(Config::default(), config);
    }

    #[test]
    fn read_file() {
        let dir = tempfile::tempdir().unwrap();
        let filename = dir.path().join("config.toml");
        std::fs::write(&filename, "country_code = \"fr-FR\"\n").unwrap();

        let config = Config::load_or_default(Some(filename)).unwrap();
        assert_eq!("fr-FR", config.country_code);
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let filename = dir.path().join("config.toml");
        std::fs::write(&filename, "country_code = [").unwrap();

        let err = Config::load_or_default(Some(filename)).unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }
}
