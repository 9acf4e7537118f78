//! Configuration file handling
//!
//! The file only supplies defaults; flags given on the command line win.

use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use std::time::Duration;

use super::paths::config_path;
use super::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Quiz defaults
    #[serde(default)]
    pub quiz: QuizDefaults,
}

/// Defaults for a quiz session
#[derive(Debug, Deserialize)]
pub struct QuizDefaults {
    /// CSV file of `question,answer` records
    #[serde(default = "default_csv")]
    pub csv: PathBuf,

    /// Time limit for the whole quiz, written like `30s` or `1m30s`
    #[serde(default = "default_limit", deserialize_with = "deserialize_duration")]
    pub limit: Duration,

    /// Shuffle the questions before starting
    #[serde(default)]
    pub shuffle: bool,
}

impl Default for QuizDefaults {
    fn default() -> Self {
        Self {
            csv: default_csv(),
            limit: default_limit(),
            shuffle: false,
        }
    }
}

fn default_csv() -> PathBuf {
    PathBuf::from("problems.csv")
}
fn default_limit() -> Duration {
    Duration::from_secs(30)
}

fn deserialize_duration<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_duration(&raw).map_err(serde::de::Error::custom)
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                let content = std::fs::read_to_string(&path).map_err(|e| {
                    super::Error::FileRead {
                        path: path.display().to_string(),
                        error: e.to_string(),
                    }
                })?;
                return Self::from_toml(&content);
            }
        }
        Ok(Self::default())
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| super::Error::ConfigParse(e.to_string()))
    }
}

/// Parse a duration such as `30s`, `1m30s`, `1.5s` or `250ms`
///
/// A bare integer is taken as seconds. Negative durations are rejected.
pub fn parse_duration(input: &str) -> std::result::Result<Duration, String> {
    let s = input.trim();
    if s.is_empty() {
        return Err("empty duration".to_string());
    }
    if s == "0" {
        return Ok(Duration::ZERO);
    }
    if let Ok(secs) = s.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }
    if s.starts_with('-') {
        return Err(format!("negative duration `{}`", input));
    }

    let mut rest = s.strip_prefix('+').unwrap_or(s);
    let mut nanos = 0f64;

    while !rest.is_empty() {
        let num_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let value: f64 = rest[..num_len]
            .parse()
            .map_err(|_| format!("invalid duration `{}`", input))?;
        rest = &rest[num_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let scale = match &rest[..unit_len] {
            "ns" => 1.0,
            "us" | "µs" | "μs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60e9,
            "h" => 3600e9,
            "" => return Err(format!("missing unit in duration `{}`", input)),
            unit => return Err(format!("unknown unit `{}` in duration `{}`", unit, input)),
        };
        nanos += value * scale;
        rest = &rest[unit_len..];
    }

    Ok(Duration::from_nanos(nanos.round() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration("30s").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_duration("1m30s").unwrap(), Duration::from_secs(90));
        assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
        assert_eq!(parse_duration("1.5s").unwrap(), Duration::from_millis(1500));
        assert_eq!(parse_duration("2h").unwrap(), Duration::from_secs(7200));
        assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
        assert_eq!(parse_duration("12").unwrap(), Duration::from_secs(12));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("-5s").is_err());
        assert!(parse_duration("5x").is_err());
        assert!(parse_duration("1m30").is_err());
        assert!(parse_duration("s").is_err());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.quiz.csv, PathBuf::from("problems.csv"));
        assert_eq!(config.quiz.limit, Duration::from_secs(30));
        assert!(!config.quiz.shuffle);
    }

    #[test]
    fn test_config_overrides() {
        let config = Config::from_toml(
            r#"
            [quiz]
            csv = "capitals.csv"
            limit = "1m"
            shuffle = true
            "#,
        )
        .unwrap();
        assert_eq!(config.quiz.csv, PathBuf::from("capitals.csv"));
        assert_eq!(config.quiz.limit, Duration::from_secs(60));
        assert!(config.quiz.shuffle);
    }

    #[test]
    fn test_bad_limit_is_parse_error() {
        let err = Config::from_toml("[quiz]\nlimit = \"soon\"\n").unwrap_err();
        assert!(matches!(err, crate::common::Error::ConfigParse(_)));
    }
}
