use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

/// Process-wide service configuration, loaded once at startup and injected
/// into the transport constructor. There is no global mutable state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Optional banner printed before the chat REPL.
    #[serde(default)]
    pub concierge_greeting: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            concierge_greeting: None,
        }
    }
}

impl ServiceConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: ServiceConfig = serde_yaml::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            bail!("base_url must not be empty");
        }
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be greater than zero");
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_point_at_localhost() {
        let config = ServiceConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 60);
        assert!(config.concierge_greeting.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_full_config() {
        let file = write_config(
            "base_url: http://service:9000\ntimeout_secs: 10\nconcierge_greeting: Hello!\n",
        );
        let config = ServiceConfig::load(file.path()).unwrap();
        assert_eq!(config.base_url, "http://service:9000");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.concierge_greeting.as_deref(), Some("Hello!"));
    }

    #[test]
    fn load_applies_defaults_for_missing_fields() {
        let file = write_config("base_url: http://service:9000\n");
        let config = ServiceConfig::load(file.path()).unwrap();
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn load_rejects_zero_timeout() {
        let file = write_config("base_url: http://service:9000\ntimeout_secs: 0\n");
        let err = ServiceConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn validate_rejects_blank_base_url() {
        let config = ServiceConfig {
            base_url: "   ".into(),
            ..ServiceConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = ServiceConfig::load(Path::new("/nonexistent/frontdesk.yaml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/frontdesk.yaml"));
    }
}
