use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use plexhub_providers::Backend;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::validation::{is_valid_token, validate_base_url};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
    pub logging: LoggingConfig,
    pub plex: PlexConfig,
    /// Configured Plex servers, `[[server]]` tables in TOML
    #[serde(rename = "server", alias = "servers")]
    pub servers: Vec<ServerEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "pretty"
    pub file_path: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlexConfig {
    /// Per-request timeout for every backend call
    pub timeout_seconds: u64,
}

impl Default for PlexConfig {
    fn default() -> Self {
        Self { timeout_seconds: 30 }
    }
}

/// One `[[server]]` entry as written in the config file.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerEntry {
    pub name: String,
    pub url: String,
    pub token: String,
}

impl std::fmt::Debug for ServerEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerEntry")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl ServerEntry {
    /// Why this entry cannot be used, if it cannot.
    #[must_use]
    pub fn problem(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("missing name".to_string());
        }
        if self.url.trim().is_empty() {
            return Some("missing url".to_string());
        }
        if self.token.is_empty() {
            return Some("missing token".to_string());
        }
        if !is_valid_token(&self.token) {
            return Some("malformed token".to_string());
        }
        if let Err(e) = validate_base_url(self.url.trim()) {
            return Some(e.to_string());
        }
        None
    }
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority order:
    /// 1. Environment variables (highest priority)
    /// 2. Config file (if provided)
    /// 3. Default values (lowest priority)
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        // Load config file if provided
        if let Some(path) = config_file {
            if Path::new(path).exists() {
                builder = builder.add_source(File::with_name(path));
            }
        }

        // Override with environment variables (PLEXHUB_HTTP__PORT, PLEXHUB_LOGGING__LEVEL, etc.)
        builder = builder.add_source(
            Environment::with_prefix("PLEXHUB")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load from environment variables only (for Docker/K8s)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Load from file path
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        Self::load(Some(path))
    }

    /// Get HTTP server address
    #[must_use]
    pub fn http_address(&self) -> String {
        format!("{}:{}", self.http.host, self.http.port)
    }

    #[must_use]
    pub fn plex_timeout(&self) -> Duration {
        Duration::from_secs(self.plex.timeout_seconds)
    }

    /// Usable backends, in configured order.
    ///
    /// Entries with an empty field, a malformed token or an unusable URL are
    /// skipped with a warning rather than failing startup.
    #[must_use]
    pub fn active_backends(&self) -> Vec<Backend> {
        self.servers
            .iter()
            .filter_map(|entry| match entry.problem() {
                Some(problem) => {
                    tracing::warn!(server = %entry.name, url = %entry.url, %problem, "Ignoring server");
                    None
                }
                None => Some(Backend::new(
                    entry.name.trim(),
                    entry.url.trim().trim_end_matches('/'),
                    &entry.token,
                )),
            })
            .collect()
    }

    /// Validate configuration, returning every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.http.port == 0 {
            errors.push("http.port must not be 0".to_string());
        }
        if !matches!(self.logging.format.as_str(), "json" | "pretty") {
            errors.push(format!(
                "logging.format must be \"json\" or \"pretty\", got {:?}",
                self.logging.format
            ));
        }
        if self.plex.timeout_seconds == 0 {
            errors.push("plex.timeout_seconds must be greater than 0".to_string());
        }

        let mut names = std::collections::HashSet::new();
        for entry in &self.servers {
            if !entry.name.is_empty() && !names.insert(entry.name.as_str()) {
                errors.push(format!("duplicate server name {:?}", entry.name));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn entry(name: &str, url: &str, token: &str) -> ServerEntry {
        ServerEntry {
            name: name.to_string(),
            url: url.to_string(),
            token: token.to_string(),
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.http_address(), "0.0.0.0:8080");
        assert_eq!(config.plex_timeout(), Duration::from_secs(30));
        assert_eq!(config.logging.level, "info");
        assert!(config.servers.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_active_backends_skip_unusable_entries() {
        let config = Config {
            servers: vec![
                entry("home", "http://10.0.0.2:32400/", "abcDEF123"),
                entry("", "http://10.0.0.3:32400", "abc"),
                entry("no-url", "", "abc"),
                entry("no-token", "http://10.0.0.4:32400", ""),
                entry("bad-token", "http://10.0.0.5:32400", "illegal base64 data at input byte 0"),
                entry("bad-url", "10.0.0.6:32400", "abc"),
                entry("cabin", "https://cabin.example.com", "x_y-z"),
            ],
            ..Config::default()
        };

        let backends = config.active_backends();
        assert_eq!(backends.len(), 2);
        assert_eq!(backends[0].name, "home");
        assert_eq!(backends[0].base_url, "http://10.0.0.2:32400");
        assert_eq!(backends[1].name, "cabin");
    }

    #[test]
    fn test_validate_reports_all_problems() {
        let mut config = Config::default();
        config.http.port = 0;
        config.logging.format = "xml".to_string();
        config.plex.timeout_seconds = 0;
        config.servers = vec![entry("a", "http://h", "t"), entry("a", "http://i", "t")];

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.iter().any(|e| e.contains("duplicate server name")));
    }

    #[test]
    fn test_load_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
[http]
port = 9090

[plex]
timeout_seconds = 5

[[server]]
name = "living-room"
url = "http://192.168.1.10:32400"
token = "tok1"

[[server]]
name = "broken"
url = ""
token = "tok2"
"#
        )
        .unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let config = Config::from_file(&path).unwrap();

        assert_eq!(config.http.port, 9090);
        assert_eq!(config.http.host, "0.0.0.0");
        assert_eq!(config.plex_timeout(), Duration::from_secs(5));
        assert_eq!(config.servers.len(), 2);

        let backends = config.active_backends();
        assert_eq!(backends.len(), 1);
        assert_eq!(backends[0].name, "living-room");
        assert_eq!(backends[0].token, "tok1");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = Config::from_file("/nonexistent/plexhub.toml").unwrap();
        assert_eq!(config.http.port, 8080);
    }

    #[test]
    fn test_server_entry_debug_redacts_token() {
        let debug = format!("{:?}", entry("home", "http://h", "s3cr3t"));
        assert!(!debug.contains("s3cr3t"));
    }
}
