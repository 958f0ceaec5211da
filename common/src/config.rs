use crate::Result;
use anyhow::anyhow;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

// TOML configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub analyze: AnalyzeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct GeminiConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_http_bind")]
    pub bind: String,
    #[serde(default = "default_server_base_url")]
    pub base_url: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeConfig {
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    #[serde(default = "default_retry_base_delay")]
    pub retry_base_delay: String,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_rust_log_format")]
    pub rust_log_format: String,
}

// Default values
fn default_gemini_model() -> String {
    "gemini-2.5-flash-lite".to_string()
}
fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}
fn default_http_bind() -> String {
    "0.0.0.0:8080".to_string()
}
fn default_server_base_url() -> String {
    "http://localhost:8080".to_string()
}
fn default_retry_attempts() -> u32 {
    3
}
fn default_retry_base_delay() -> String {
    "2s".to_string()
}
fn default_rust_log_format() -> String {
    "json".to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_gemini_model(),
            base_url: default_gemini_base_url(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_http_bind(),
            base_url: default_server_base_url(),
        }
    }
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            retry_attempts: default_retry_attempts(),
            retry_base_delay: default_retry_base_delay(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            rust_log_format: default_rust_log_format(),
        }
    }
}

static CONFIG: Lazy<Config> = Lazy::new(|| {
    load_config().unwrap_or_else(|e| {
        eprintln!(
            "Warning: Failed to load config files: {}. Using defaults.",
            e
        );
        Config::default()
    })
});

static CONFIG_STORE: Lazy<Arc<Mutex<HashMap<String, String>>>> =
    Lazy::new(|| Arc::new(Mutex::new(HashMap::new())));

pub fn get(name: &str) -> Result<String> {
    // Priority 1: CONFIG_STORE (runtime overrides)
    if let Some(value) = get_from_store(name) {
        if value.is_empty() {
            return Err(anyhow!("{} is empty", name));
        }
        return Ok(value);
    }

    // Priority 2: Environment variables
    if let Ok(val) = std::env::var(name)
        && !val.is_empty()
    {
        return Ok(val);
    }

    // Priority 3: TOML config
    let toml_value = match name {
        "GEMINI_API_KEY" => {
            // 資格情報にはデフォルト値を持たせない
            if !CONFIG.gemini.api_key.is_empty() {
                Some(CONFIG.gemini.api_key.clone())
            } else {
                None
            }
        }
        "GEMINI_MODEL" => Some(CONFIG.gemini.model.clone()),
        "GEMINI_BASE_URL" => Some(CONFIG.gemini.base_url.clone()),
        "HTTP_BIND" => Some(CONFIG.server.bind.clone()),
        "SERVER_BASE_URL" => Some(CONFIG.server.base_url.clone()),
        "ANALYZE_RETRY_ATTEMPTS" => Some(CONFIG.analyze.retry_attempts.to_string()),
        "ANALYZE_RETRY_BASE_DELAY" => Some(CONFIG.analyze.retry_base_delay.clone()),
        "RUST_LOG_FORMAT" => Some(CONFIG.logging.rust_log_format.clone()),
        _ => None,
    };

    if let Some(value) = toml_value
        && !value.is_empty()
    {
        return Ok(value);
    }

    Err(anyhow!("Configuration key not found: {}", name))
}

pub fn set(name: &str, value: &str) {
    if let Ok(mut store) = CONFIG_STORE.lock() {
        store.insert(name.to_string(), value.to_string());
    }
}

fn get_from_store(name: &str) -> Option<String> {
    if let Ok(store) = CONFIG_STORE.lock() {
        store.get(name).cloned()
    } else {
        None
    }
}

/// Load configuration from TOML files with priority:
/// 1. config/config.local.toml (git-ignored, for local overrides)
/// 2. config/config.toml (git-managed template)
/// 3. Default values
fn load_config() -> Result<Config> {
    let mut config = Config::default();

    let base_path = "config/config.toml";
    if Path::new(base_path).exists() {
        let content = fs::read_to_string(base_path)?;
        config = toml::from_str(&content)?;
    }

    let local_path = "config/config.local.toml";
    if Path::new(local_path).exists() {
        let content = fs::read_to_string(local_path)?;
        let local_config: Config = toml::from_str(&content)?;
        merge_config(&mut config, local_config);
    }

    Ok(config)
}

/// Merge local config into base config (local values override base values)
fn merge_config(base: &mut Config, local: Config) {
    // Gemini
    if !local.gemini.api_key.is_empty() {
        base.gemini.api_key = local.gemini.api_key;
    }
    if local.gemini.model != default_gemini_model() {
        base.gemini.model = local.gemini.model;
    }
    if local.gemini.base_url != default_gemini_base_url() {
        base.gemini.base_url = local.gemini.base_url;
    }

    // Server
    if local.server.bind != default_http_bind() {
        base.server.bind = local.server.bind;
    }
    if local.server.base_url != default_server_base_url() {
        base.server.base_url = local.server.base_url;
    }

    // Analyze
    if local.analyze.retry_attempts != default_retry_attempts() {
        base.analyze.retry_attempts = local.analyze.retry_attempts;
    }
    if local.analyze.retry_base_delay != default_retry_base_delay() {
        base.analyze.retry_base_delay = local.analyze.retry_base_delay;
    }

    // Logging
    if local.logging.rust_log_format != default_rust_log_format() {
        base.logging.rust_log_format = local.logging.rust_log_format;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_default_values() {
        // 環境変数が設定されていない場合はTOMLのデフォルト値が使われる
        unsafe {
            std::env::remove_var("GEMINI_MODEL");
        }
        let result = get("GEMINI_MODEL").unwrap();
        assert_eq!(result, "gemini-2.5-flash-lite");
    }

    #[test]
    #[serial]
    fn test_env_var_overrides_toml() {
        // 環境変数が設定されている場合は環境変数の値が使われる
        unsafe {
            std::env::set_var("GEMINI_MODEL", "test-model");
        }
        let result = get("GEMINI_MODEL").unwrap();
        assert_eq!(result, "test-model");
        unsafe {
            std::env::remove_var("GEMINI_MODEL");
        }
    }

    #[test]
    #[serial]
    fn test_config_store_priority() {
        // CONFIG_STOREの値が最優先
        const TEST_KEY: &str = "RUST_LOG_FORMAT";
        unsafe {
            std::env::set_var(TEST_KEY, "env-value");
        }
        set(TEST_KEY, "store-value");
        let result = get(TEST_KEY).unwrap();
        assert_eq!(result, "store-value");

        // Cleanup
        if let Ok(mut store) = CONFIG_STORE.lock() {
            store.remove(TEST_KEY);
        }
        unsafe {
            std::env::remove_var(TEST_KEY);
        }
    }

    #[test]
    #[serial]
    fn test_missing_api_key_is_an_error() {
        // 資格情報はデフォルト値を持たない
        unsafe {
            std::env::remove_var("GEMINI_API_KEY");
        }
        assert!(get("GEMINI_API_KEY").is_err());
    }

    #[test]
    #[serial]
    fn test_api_key_from_env() {
        unsafe {
            std::env::set_var("GEMINI_API_KEY", "k-123");
        }
        assert_eq!(get("GEMINI_API_KEY").unwrap(), "k-123");
        unsafe {
            std::env::remove_var("GEMINI_API_KEY");
        }
    }

    #[test]
    #[serial]
    fn test_numeric_config() {
        unsafe {
            std::env::remove_var("ANALYZE_RETRY_ATTEMPTS");
        }
        let result = get("ANALYZE_RETRY_ATTEMPTS").unwrap();
        assert_eq!(result, "3");
    }

    #[test]
    #[serial]
    fn test_unknown_key_is_an_error() {
        assert!(get("NO_SUCH_KEY").is_err());
    }
}
