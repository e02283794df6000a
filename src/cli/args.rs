//! CLI argument parsing
//!
//! Only configuration overrides; the app itself is always the TUI.

use std::path::PathBuf;

use clap::Parser;

/// Parsed CLI arguments
#[derive(Debug, Clone, Default, PartialEq, Eq, Parser)]
#[command(
    name = "lexzig-ui",
    version,
    about = "Terminal front end for the LexZig analysis API"
)]
pub struct Args {
    /// Analysis endpoint (overrides LEXZIG_API_URL and the config file)
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Decorative image URL shown in the header
    #[arg(long, value_name = "URL")]
    pub image_url: Option<String>,

    /// Config file (default: ./lexzig.toml if present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file (default: lexzig-ui.log in the temp directory)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args() {
        let args = Args::try_parse_from(["lexzig-ui"]).unwrap();
        assert_eq!(args, Args::default());
    }

    #[test]
    fn test_all_flags() {
        let args = Args::try_parse_from([
            "lexzig-ui",
            "--api-url",
            "http://localhost:9000/",
            "--image-url",
            "https://example.org/logo.png",
            "--config",
            "custom.toml",
            "--log-file",
            "/tmp/ui.log",
        ])
        .unwrap();
        assert_eq!(args.api_url.as_deref(), Some("http://localhost:9000/"));
        assert_eq!(args.image_url.as_deref(), Some("https://example.org/logo.png"));
        assert_eq!(args.config, Some(PathBuf::from("custom.toml")));
        assert_eq!(args.log_file, Some(PathBuf::from("/tmp/ui.log")));
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Args::try_parse_from(["lexzig-ui", "--db-root", "x"]).is_err());
    }

    #[test]
    fn test_missing_value_rejected() {
        assert!(Args::try_parse_from(["lexzig-ui", "--api-url"]).is_err());
    }
}
