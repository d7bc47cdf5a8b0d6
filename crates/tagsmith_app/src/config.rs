use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use client_logging::client_warn;
use serde::Deserialize;
use tagsmith_client::ApiSettings;

const CONFIG_FILENAME: &str = "tagsmith.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub export_dir: PathBuf,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            export_dir: PathBuf::from("./exports"),
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Loads `tagsmith.toml` from the working directory (or the path in
    /// `TAGSMITH_CONFIG`). A missing file means defaults; `TAGSMITH_API_URL`
    /// overrides the base URL either way.
    pub fn load() -> Self {
        let path = std::env::var("TAGSMITH_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(CONFIG_FILENAME));
        let mut config = Self::read_file(&path);
        if let Ok(base_url) = std::env::var("TAGSMITH_API_URL") {
            config.api_base_url = base_url;
        }
        config
    }

    fn read_file(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Self::default();
            }
            Err(err) => {
                client_warn!("Could not read config {:?}: {}", path, err);
                return Self::default();
            }
        };
        match toml::from_str(&text) {
            Ok(config) => config,
            Err(err) => {
                client_warn!("Ignoring malformed config {:?}: {}", path, err);
                Self::default()
            }
        }
    }

    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AppConfig;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = AppConfig::read_file(&temp.path().join("nope.toml"));
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.connect_timeout_secs, 10);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("tagsmith.toml");
        std::fs::write(&path, "api_base_url = \"http://backend:9000\"\n").unwrap();

        let config = AppConfig::read_file(&path);
        assert_eq!(config.api_base_url, "http://backend:9000");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("tagsmith.toml");
        std::fs::write(&path, "api_base_url = [not toml").unwrap();

        let config = AppConfig::read_file(&path);
        assert_eq!(config.api_base_url, "http://localhost:8000");
    }

    #[test]
    fn full_file_parses() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("tagsmith.toml");
        std::fs::write(
            &path,
            "api_base_url = \"http://backend:9000\"\nexport_dir = \"/tmp/out\"\nconnect_timeout_secs = 3\nrequest_timeout_secs = 7\n",
        )
        .unwrap();

        let config = AppConfig::read_file(&path);
        assert_eq!(config.export_dir, std::path::PathBuf::from("/tmp/out"));
        assert_eq!(config.api_settings().connect_timeout.as_secs(), 3);
        assert_eq!(config.api_settings().request_timeout.as_secs(), 7);
    }
}
