use crate::error::ConfigError;
use serde::Deserialize;
use std::time::Duration;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 监听地址
    pub host: String,
    /// 监听端口
    pub port: u16,
    /// 每批同时查询的号码数量
    pub batch_size: usize,
    /// 批次之间的等待时间（毫秒）
    pub batch_delay_ms: u64,
    // --- 上游充值接口配置 ---
    pub upstream_base_url: String,
    /// 允许连接不支持安全重协商的旧 TLS 服务器
    pub legacy_server_connect: bool,
    /// 单次上游调用超时（秒），不设置则不限时
    pub upstream_timeout_secs: Option<u64>,
    pub user_agent: String,
    // --- 号码输入配置 ---
    pub trim_numbers: bool,
    pub number_pattern: Option<String>,
    /// 静态页面目录
    pub static_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            batch_size: 20,
            batch_delay_ms: 1000,
            upstream_base_url: "https://www.jio.com/api/jio-recharge-service/recharge".to_string(),
            legacy_server_connect: true,
            upstream_timeout_secs: None,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36".to_string(),
            trim_numbers: false,
            number_pattern: None,
            static_dir: "public".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 加载配置：先读 `TOPUP_CONFIG` 指向的 TOML 文件（可选），再用环境变量覆盖
    pub fn load() -> Result<Self, ConfigError> {
        let config = match std::env::var("TOPUP_CONFIG") {
            Ok(path) => Self::from_toml_file(&path)?.with_env_overrides(),
            Err(_) => Self::from_env(),
        };
        config.validate()?;
        Ok(config)
    }

    /// 从 TOML 文件读取配置，缺省字段使用默认值
    pub fn from_toml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.to_string(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn with_env_overrides(self) -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or(self.host),
            port: std::env::var("PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(self.port),
            batch_size: std::env::var("BATCH_SIZE").ok().and_then(|v| v.parse().ok()).unwrap_or(self.batch_size),
            batch_delay_ms: std::env::var("BATCH_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.batch_delay_ms),
            upstream_base_url: std::env::var("UPSTREAM_BASE_URL").unwrap_or(self.upstream_base_url),
            legacy_server_connect: std::env::var("UPSTREAM_LEGACY_TLS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.legacy_server_connect),
            upstream_timeout_secs: std::env::var("UPSTREAM_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).or(self.upstream_timeout_secs),
            user_agent: std::env::var("UPSTREAM_USER_AGENT").unwrap_or(self.user_agent),
            trim_numbers: std::env::var("TRIM_NUMBERS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.trim_numbers),
            number_pattern: std::env::var("NUMBER_PATTERN").ok().filter(|v| !v.is_empty()).or(self.number_pattern),
            static_dir: std::env::var("STATIC_DIR").unwrap_or(self.static_dir),
        }
    }

    /// 校验配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        if let Some(pattern) = &self.number_pattern {
            regex::Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
        }
        Ok(())
    }

    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    pub fn upstream_timeout(&self) -> Option<Duration> {
        self.upstream_timeout_secs.map(Duration::from_secs)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
