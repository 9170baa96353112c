//! 号码输入规则
//!
//! 号码格式没有固定标准，默认原样透传；去空白和正则校验都由配置打开。

use crate::config::Config;
use crate::error::ConfigError;
use regex::Regex;

pub const INVALID_NUMBER: &str = "Invalid mobile number";

#[derive(Debug, Clone, Default)]
pub struct NumberPolicy {
    trim: bool,
    pattern: Option<Regex>,
}

impl NumberPolicy {
    pub fn new(trim: bool, pattern: Option<Regex>) -> Self {
        Self { trim, pattern }
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let pattern = config
            .number_pattern
            .as_deref()
            .map(|p| {
                Regex::new(p).map_err(|source| ConfigError::InvalidPattern {
                    pattern: p.to_string(),
                    source,
                })
            })
            .transpose()?;
        Ok(Self::new(config.trim_numbers, pattern))
    }

    /// 规范化号码（只用于拼接上游 URL，结果里始终回显原始输入）
    ///
    /// # 返回
    /// - `Some(号码)`：可以发起上游查询
    /// - `None`：不符合配置的正则
    pub fn apply<'a>(&self, raw: &'a str) -> Option<&'a str> {
        let number = if self.trim { raw.trim() } else { raw };
        match &self.pattern {
            Some(re) if !re.is_match(number) => None,
            _ => Some(number),
        }
    }
}
