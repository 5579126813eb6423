use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::ReportError;
use crate::types::{Config, ConfigFile, DEFAULT_REPORT_DIR, DEFAULT_TIMEOUT_SECS};

pub const CONFIG_PATH_VAR: &str = "ZABBIX_REPORT_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Trait for abstracting environment variable access
pub trait EnvironmentProvider {
    fn get_var(&self, key: &str) -> Option<String>;
}

/// Production implementation using std::env
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Mock implementation for testing
#[derive(Debug, Default)]
pub struct MockEnvironment {
    vars: HashMap<String, String>,
}

impl MockEnvironment {
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
        }
    }

    pub fn with_var<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

pub fn load_config() -> Result<Config, ReportError> {
    load_config_with_env(&SystemEnvironment)
}

pub fn load_config_with_env<E: EnvironmentProvider>(env: &E) -> Result<Config, ReportError> {
    let path = env
        .get_var(CONFIG_PATH_VAR)
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    load_config_from_path(path)
}

pub fn load_config_from_path(path: impl AsRef<Path>) -> Result<Config, ReportError> {
    let path = path.as_ref();
    info!("loading {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|source| ReportError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    let file: ConfigFile = serde_yaml::from_str(&content).map_err(|source| ReportError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;

    let cfg = config_from_file(file)?;
    info!("zabbix_username: {}", cfg.username);
    info!("zabbix_password: {}", cfg.masked_password());
    info!("zabbix_url: {}", cfg.base_url);
    Ok(cfg)
}

fn config_from_file(file: ConfigFile) -> Result<Config, ReportError> {
    let base_url = file.zabbix_url.trim().trim_end_matches('/').to_string();
    if base_url.is_empty() {
        return Err(ReportError::ConfigInvalid("zabbix_url must not be empty".to_string()));
    }
    if file.zabbix_username.is_empty() {
        return Err(ReportError::ConfigInvalid("zabbix_username must not be empty".to_string()));
    }

    let timeout_secs = file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err(ReportError::ConfigInvalid("timeout_secs must be greater than zero".to_string()));
    }

    Ok(Config {
        username: file.zabbix_username,
        password: file.zabbix_password,
        base_url,
        report_dir: file.report_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_DIR)),
        timeout_secs,
    })
}
