//! 配置模块，负责加载 TweetScout 客户端配置
//!
//! 配置来源依次为 JSON 配置文件和环境变量，环境变量优先。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub const DEFAULT_BASE_URL: &str = "https://api.tweetscout.io/v2/";
pub const API_KEY_ENV: &str = "TWEETSCOUT_API_KEY";
pub const BASE_URL_ENV: &str = "TWEETSCOUT_BASE_URL";

/// 配置错误
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError {
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "配置错误: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

impl ConfigError {
    pub fn new(message: String) -> Self {
        Self { message }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// TweetScout 客户端配置
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct TweetScoutConfig {
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

// 不在日志中输出 api_key
impl fmt::Debug for TweetScoutConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweetScoutConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl TweetScoutConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
        }
    }

    /// 从JSON文件加载配置
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(ConfigError::new(format!(
                "配置文件不存在: {}",
                path_ref.display()
            )));
        }

        let content = fs::read_to_string(path_ref).map_err(|e| {
            ConfigError::new(format!("无法读取配置文件 {}: {}", path_ref.display(), e))
        })?;

        let config: TweetScoutConfig = serde_json::from_str(&content).map_err(|e| {
            ConfigError::new(format!(
                "无法解析JSON配置文件 {}: {}",
                path_ref.display(),
                e
            ))
        })?;

        if config.api_key.is_empty() {
            return Err(ConfigError::new(format!(
                "配置文件 {} 中 api_key 为空",
                path_ref.display()
            )));
        }

        debug!(path = %path_ref.display(), base_url = %config.base_url, "loaded config file");
        Ok(config)
    }

    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// 使用给定的查找函数读取环境变量，便于测试
    pub fn from_env_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::new(format!("环境变量 {} 未设置", API_KEY_ENV)))?;

        let base_url = lookup(BASE_URL_ENV)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(default_base_url);

        Ok(Self { api_key, base_url })
    }

    /// 用环境变量覆盖已有配置
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_key) = lookup(API_KEY_ENV).filter(|v| !v.is_empty()) {
            self.api_key = api_key;
        }
        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|v| !v.is_empty()) {
            self.base_url = base_url;
        }
        self
    }

    /// 配置文件存在时从文件加载，否则从环境变量加载
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// `load` 的核心逻辑，环境变量通过 `lookup` 读取
    pub fn load_with<P, F>(path: P, lookup: F) -> Result<Self, ConfigError>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let path_ref = path.as_ref();
        if path_ref.exists() {
            info!(path = %path_ref.display(), "using config file");
            Ok(Self::from_json_file(path_ref)?.with_overrides_from(lookup))
        } else {
            info!("config file not found, using environment");
            Self::from_env_with(lookup)
        }
    }

    /// 拼接接口地址，保证中间只有一个 `/`
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
