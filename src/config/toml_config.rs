use crate::adapters::strava::{DEFAULT_API_BASE, DEFAULT_PAGE_SIZE};
use crate::config::{validate_provider, DEFAULT_CONCURRENT_REQUESTS, DEFAULT_SEGMENTS, DEFAULT_TIMEOUT_SECONDS};
use crate::core::ConfigProvider;
use crate::utils::error::{GreensError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub segments: SegmentsConfig,
    #[serde(default)]
    pub collect: CollectConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub api_base: Option<String>,
    pub access_token: Option<String>,
    pub page_size: Option<usize>,
    pub timeout_seconds: Option<u64>,
    pub effort_log: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentsConfig {
    pub ids: Vec<String>,
}

impl Default for SegmentsConfig {
    fn default() -> Self {
        Self {
            ids: DEFAULT_SEGMENTS.map(String::from).to_vec(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectConfig {
    pub concurrent_requests: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub log_level: Option<String>,
    pub json_logs: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GreensError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| GreensError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${STRAVA_ACCESS_TOKEN})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| GreensError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn verbose_logging(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.log_level.as_deref())
            .map(|level| level.eq_ignore_ascii_case("debug") || level.eq_ignore_ascii_case("trace"))
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.json_logs)
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn api_base(&self) -> &str {
        self.source.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
    }

    /// An unresolved `${VAR}` placeholder counts as no token.
    fn access_token(&self) -> Option<&str> {
        self.source
            .access_token
            .as_deref()
            .filter(|token| !token.contains("${"))
    }

    fn segments(&self) -> &[String] {
        &self.segments.ids
    }

    fn concurrent_requests(&self) -> usize {
        self.collect
            .concurrent_requests
            .unwrap_or(DEFAULT_CONCURRENT_REQUESTS)
    }

    fn page_size(&self) -> usize {
        self.source.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    fn timeout_seconds(&self) -> u64 {
        self.source.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn effort_log(&self) -> Option<&str> {
        self.source.effort_log.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
