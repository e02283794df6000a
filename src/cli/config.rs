//! Settings resolution
//!
//! Priority per setting (highest first):
//! 1. CLI flag (`--api-url`, `--image-url`)
//! 2. Environment (`LEXZIG_API_URL`, `LEXZIG_IMAGE_URL`)
//! 3. Config file (`[api] url`, `[ui] image_url`)
//! 4. Build-time `LEXZIG_API_URL`, else `DEFAULT_API_URL`

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::{Args, Error, Result};

/// Endpoint used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/";

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "lexzig.toml";

pub const API_URL_ENV: &str = "LEXZIG_API_URL";
pub const IMAGE_URL_ENV: &str = "LEXZIG_IMAGE_URL";

/// Contents of `lexzig.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub api: ApiSection,
    pub ui: UiSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiSection {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiSection {
    pub image_url: Option<String>,
}

impl FileConfig {
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }
}

/// Resolved settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub image_url: Option<String>,
    pub log_file: PathBuf,
}

impl Settings {
    /// Resolve settings from the process environment
    pub fn from_env(args: &Args) -> Result<Self> {
        Self::resolve(args, |key| std::env::var(key).ok())
    }

    /// Resolve settings with an explicit environment lookup
    ///
    /// An explicit `--config` must exist; the default file is optional.
    pub fn resolve<F>(args: &Args, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = match args.config {
            Some(ref path) => FileConfig::load(path)?,
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    FileConfig::load(path)?
                } else {
                    FileConfig::default()
                }
            }
        };

        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        let api_url = non_empty(args.api_url.clone())
            .or_else(|| non_empty(env(API_URL_ENV)))
            .or_else(|| non_empty(file.api.url.clone()))
            .or_else(|| option_env!("LEXZIG_API_URL").map(str::to_string))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        validate_url(&api_url)?;

        let image_url = non_empty(args.image_url.clone())
            .or_else(|| non_empty(env(IMAGE_URL_ENV)))
            .or_else(|| non_empty(file.ui.image_url.clone()));
        if let Some(ref url) = image_url {
            validate_url(url)?;
        }

        let log_file = args
            .log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("lexzig-ui.log"));

        Ok(Self {
            api_url,
            image_url,
            log_file,
        })
    }
}

/// Accept only absolute http(s) URLs
pub fn validate_url(url: &str) -> Result<()> {
    let rest = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"));
    match rest {
        Some(host) if !host.is_empty() && !host.starts_with('/') => Ok(()),
        _ => Err(Error::InvalidUrl(url.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_full_config() {
        let config = FileConfig::parse(
            r#"
[api]
url = "http://analysis.local/"

[ui]
image_url = "https://example.org/logo.png"
"#,
        )
        .unwrap();
        assert_eq!(config.api.url.as_deref(), Some("http://analysis.local/"));
        assert_eq!(
            config.ui.image_url.as_deref(),
            Some("https://example.org/logo.png")
        );
    }

    #[test]
    fn test_parse_empty_config() {
        assert_eq!(FileConfig::parse("").unwrap(), FileConfig::default());
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        assert!(matches!(
            FileConfig::parse("[api]\nendpoint = \"x\"\n"),
            Err(Error::ConfigParse(_))
        ));
    }

    #[test]
    fn test_flag_beats_env_and_file() {
        let file = write_config("[api]\nurl = \"http://file/\"\n");
        let args = Args {
            api_url: Some("http://flag/".to_string()),
            config: Some(file.path().to_path_buf()),
            ..Args::default()
        };
        let settings = Settings::resolve(&args, |_| Some("http://env/".to_string())).unwrap();
        assert_eq!(settings.api_url, "http://flag/");
    }

    #[test]
    fn test_env_beats_file() {
        let file = write_config("[api]\nurl = \"http://file/\"\n[ui]\nimage_url = \"http://file/img.png\"\n");
        let args = Args {
            config: Some(file.path().to_path_buf()),
            ..Args::default()
        };
        let settings = Settings::resolve(&args, |key| match key {
            API_URL_ENV => Some("http://env/".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(settings.api_url, "http://env/");
        assert_eq!(settings.image_url.as_deref(), Some("http://file/img.png"));
    }

    #[test]
    fn test_file_used_when_nothing_else() {
        let file = write_config("[api]\nurl = \"https://file.example/analyse\"\n");
        let args = Args {
            config: Some(file.path().to_path_buf()),
            ..Args::default()
        };
        let settings = Settings::resolve(&args, no_env).unwrap();
        assert_eq!(settings.api_url, "https://file.example/analyse");
        assert!(settings.image_url.is_none());
    }

    #[test]
    fn test_empty_env_is_ignored() {
        let file = write_config("[api]\nurl = \"http://file/\"\n");
        let args = Args {
            config: Some(file.path().to_path_buf()),
            ..Args::default()
        };
        let settings = Settings::resolve(&args, |_| Some("  ".to_string())).unwrap();
        assert_eq!(settings.api_url, "http://file/");
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let args = Args {
            config: Some(PathBuf::from("/nonexistent/lexzig.toml")),
            ..Args::default()
        };
        assert!(matches!(
            Settings::resolve(&args, no_env),
            Err(Error::ConfigRead { .. })
        ));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let args = Args {
            api_url: Some("ftp://host/".to_string()),
            ..Args::default()
        };
        assert!(matches!(
            Settings::resolve(&args, no_env),
            Err(Error::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_log_file_override() {
        let args = Args {
            api_url: Some("http://flag/".to_string()),
            log_file: Some(PathBuf::from("/tmp/custom.log")),
            ..Args::default()
        };
        let settings = Settings::resolve(&args, no_env).unwrap();
        assert_eq!(settings.log_file, PathBuf::from("/tmp/custom.log"));
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("http://127.0.0.1:8000/").is_ok());
        assert!(validate_url("https://example.org").is_ok());
        assert!(validate_url("http://").is_err());
        assert!(validate_url("http:///path").is_err());
        assert!(validate_url("localhost:8000").is_err());
    }
}
