//! Command-line, environment and client-supplied configuration

use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;

/// Environment variable overriding the session log directory.
pub const LOG_DIR_ENV: &str = "ALLOY_LS_LOG_DIR";

/// Language server for Grafana Alloy configuration files
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "alloy-language-server",
    version,
    about = "Language server for Grafana Alloy configuration files"
)]
pub struct Args {
    /// Communicate over stdin/stdout (the default and only transport)
    #[arg(long)]
    pub stdio: bool,

    /// Log filter for stderr, e.g. "debug" or "alloy_language_server=trace"
    ///
    /// Falls back to RUST_LOG, then to "info".
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Disable ANSI colors in stderr output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Do not write a session log file
    #[arg(long = "no-file-logging")]
    pub no_file_logging: bool,
}

/// Resolved logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub no_color: bool,
    pub file_logging: bool,
    /// Overrides the per-user cache directory for session logs.
    pub log_dir: Option<PathBuf>,
}

impl LoggingConfig {
    /// Combines command-line flags with `ALLOY_LS_LOG_DIR` and `NO_COLOR`.
    pub fn from_args_and_env(args: &Args) -> Self {
        Self::from_args_with(args, |key| std::env::var(key).ok())
    }

    /// Same as [`LoggingConfig::from_args_and_env`] with an explicit variable lookup.
    pub fn from_args_with(args: &Args, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let no_color_env = lookup("NO_COLOR").is_some_and(|value| !value.is_empty());
        let log_dir = lookup(LOG_DIR_ENV)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Self {
            level: args.log_level.clone(),
            no_color: args.no_color || no_color_env,
            file_logging: !args.no_file_logging,
            log_dir,
        }
    }
}

/// Options a client may pass in `initializationOptions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InitializationOptions {
    /// Force snippet (`true`) or plain-text (`false`) insertion regardless of
    /// the client's advertised snippet support.
    pub snippets: Option<bool>,
}

impl InitializationOptions {
    /// Parses the raw options; a missing or `null` value yields the defaults.
    pub fn from_value(value: Option<serde_json::Value>) -> Result<Self, serde_json::Error> {
        match value {
            Some(serde_json::Value::Null) | None => Ok(Self::default()),
            Some(value) => serde_json::from_value(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "alloy-language-server",
            "--stdio",
            "--log-level",
            "debug",
            "--no-color",
        ])
        .unwrap();
        assert!(args.stdio);
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(args.no_color);
        assert!(!args.no_file_logging);
    }

    #[test]
    fn test_logging_config_defaults() {
        let config = LoggingConfig::from_args_with(&Args::default(), lookup(&[]));
        assert_eq!(
            config,
            LoggingConfig {
                level: None,
                no_color: false,
                file_logging: true,
                log_dir: None,
            }
        );
    }

    #[test]
    fn test_logging_config_reads_environment() {
        let args = Args {
            no_file_logging: true,
            ..Args::default()
        };
        let config = LoggingConfig::from_args_with(
            &args,
            lookup(&[("NO_COLOR", "1"), (LOG_DIR_ENV, "/tmp/alloy-logs")]),
        );
        assert!(config.no_color);
        assert!(!config.file_logging);
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/alloy-logs")));
    }

    #[test]
    fn test_empty_no_color_is_ignored() {
        let config = LoggingConfig::from_args_with(&Args::default(), lookup(&[("NO_COLOR", "")]));
        assert!(!config.no_color);
    }

    #[test]
    fn test_initialization_options() {
        assert_eq!(
            InitializationOptions::from_value(None).unwrap(),
            InitializationOptions::default()
        );
        assert_eq!(
            InitializationOptions::from_value(Some(json!({ "snippets": false }))).unwrap(),
            InitializationOptions { snippets: Some(false) }
        );
        // Unknown keys are ignored
        assert_eq!(
            InitializationOptions::from_value(Some(json!({ "other": 1 }))).unwrap(),
            InitializationOptions::default()
        );
        assert!(InitializationOptions::from_value(Some(json!({ "snippets": "yes" }))).is_err());
    }
}
