use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

const MAX_TIMEOUT_SECS: f64 = 3600.0;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub deepl: DeepLConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeepLConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: f64,
    /// Status returned to callers when the provider rejects our credential.
    #[serde(default = "default_auth_error_status")]
    pub auth_error_status: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:3000".to_string(),
    ]
}

fn default_api_url() -> String {
    "https://api-free.deepl.com/v2/translate".to_string()
}

fn default_timeout_secs() -> f64 {
    30.0
}

fn default_auth_error_status() -> u16 {
    500
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl Default for DeepLConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            auth_error_status: default_auth_error_status(),
        }
    }
}

impl Config {
    /// Load a YAML or JSON config file, substituting `${VAR}` references.
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            anyhow::bail!("Configuration file not found: {}", path);
        }

        let content = substitute_env(&read_text_file(path)?);
        let path_lower = path.to_lowercase();
        let config: Config = if path_lower.ends_with(".json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        Ok(config)
    }

    /// Defaults with the credential taken from `DEEPL_API_KEY`.
    pub fn from_env() -> Self {
        let mut config = Config::default();
        if let Ok(key) = std::env::var("DEEPL_API_KEY") {
            config.deepl.api_key = key;
        }
        config
    }

    /// Try each path in order, falling back to [`Config::from_env`].
    pub fn discover(paths: &[String]) -> Result<(Self, Option<String>)> {
        for path in paths {
            match Config::load(path) {
                Ok(config) => return Ok((config, Some(path.clone()))),
                Err(e) => debug!("Failed to load config from {}: {}", path, e),
            }
        }
        Ok((Config::from_env(), None))
    }

    pub fn validate(&self) -> Result<()> {
        if self.deepl.api_key.trim().is_empty() || self.deepl.api_key.starts_with("${") {
            anyhow::bail!("DeepL API key is required (set DEEPL_API_KEY or deepl.api_key)");
        }
        let timeout = self.deepl.timeout_secs;
        if !timeout.is_finite() || timeout <= 0.0 || timeout > MAX_TIMEOUT_SECS {
            anyhow::bail!("deepl.timeout_secs must be between 0 and {}", MAX_TIMEOUT_SECS);
        }
        if !(400..600).contains(&self.deepl.auth_error_status) {
            anyhow::bail!("deepl.auth_error_status must be a 4xx or 5xx status");
        }
        Ok(())
    }
}

/// Replace `${VAR_NAME}` with the variable's value, leaving unknown ones as-is.
fn substitute_env(content: &str) -> String {
    let pattern = Regex::new(r"\$\{(\w+)\}").expect("static regex");
    pattern
        .replace_all(content, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}

/// Read a UTF-8 file, tolerating a byte-order mark and invalid sequences.
fn read_text_file(path: &str) -> Result<String> {
    let bytes = fs::read(path)?;
    let (text, _, had_errors) = encoding_rs::UTF_8.decode(&bytes);
    if had_errors {
        debug!("Config file {} contained invalid UTF-8, replaced lossily", path);
    }
    Ok(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, content: &[u8]) -> String {
        let dir = std::env::temp_dir().join(format!("lingo-proxy-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_yaml_with_env_substitution_and_defaults() {
        std::env::set_var("LINGO_TEST_KEY_YAML", "secret-123");
        let path = write_temp(
            "conf.yaml",
            b"server:\n  port: 9000\ndeepl:\n  api_key: ${LINGO_TEST_KEY_YAML}\n",
        );

        let config = Config::load(&path).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.deepl.api_key, "secret-123");
        assert_eq!(config.deepl.timeout_secs, 30.0);
        assert_eq!(config.deepl.auth_error_status, 500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_with_bom() {
        let mut content = vec![0xEF, 0xBB, 0xBF];
        content.extend_from_slice(br#"{"deepl": {"api_key": "k", "auth_error_status": 502}}"#);
        let path = write_temp("conf.json", &content);

        let config = Config::load(&path).unwrap();
        assert_eq!(config.deepl.api_key, "k");
        assert_eq!(config.deepl.auth_error_status, 502);
        assert_eq!(config.server.cors_origins.len(), 2);
    }

    #[test]
    fn test_unresolved_key_fails_validation() {
        let path = write_temp("conf.yaml", b"deepl:\n  api_key: ${LINGO_TEST_UNSET_VAR}\n");
        let config = Config::load(&path).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_discover_skips_missing_files() {
        let path = write_temp("conf.yaml", b"deepl:\n  api_key: found\n");
        let paths = vec!["/definitely/missing.yaml".to_string(), path.clone()];

        let (config, loaded) = Config::discover(&paths).unwrap();
        assert_eq!(loaded.as_deref(), Some(path.as_str()));
        assert_eq!(config.deepl.api_key, "found");
    }

    #[test]
    fn test_rejects_unusable_timeouts() {
        for value in [".inf", "-.inf", ".nan", "0", "-5", "1e30"] {
            let yaml = format!("deepl:\n  api_key: k\n  timeout_secs: {}\n", value);
            let path = write_temp("conf.yaml", yaml.as_bytes());
            let config = Config::load(&path).unwrap();
            assert!(config.validate().is_err(), "timeout_secs: {}", value);
        }
    }

    #[test]
    fn test_rejects_bad_auth_status() {
        let mut config = Config::default();
        config.deepl.api_key = "k".to_string();
        config.deepl.auth_error_status = 200;
        assert!(config.validate().is_err());
    }
}
