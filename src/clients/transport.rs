//! 出站 HTTP 传输配置
//!
//! TLS 兼容选项作为显式配置传给客户端，不做进程级全局设置。

use crate::config::Config;
use crate::error::UpstreamError;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// 允许与不支持 RFC 5746 安全重协商的服务器握手
    ///
    /// 开启时使用 rustls 后端：rustls 不要求服务端返回 renegotiation_info，
    /// 等价于 OpenSSL 的 `SSL_OP_LEGACY_SERVER_CONNECT`。
    pub legacy_server_connect: bool,
    /// 每个上游步骤的超时，`None` 表示不限时
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl TransportConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            legacy_server_connect: config.legacy_server_connect,
            timeout: config.upstream_timeout(),
            user_agent: config.user_agent.clone(),
        }
    }

    /// 构建共享的 reqwest 客户端
    ///
    /// 不开启 cookie store：每次查询的 cookie 都由调用方显式拼接，
    /// 客户端本身不携带任何会话状态。
    pub fn build_client(&self) -> Result<reqwest::Client, UpstreamError> {
        let mut builder = reqwest::Client::builder().user_agent(self.user_agent.as_str());

        if self.legacy_server_connect {
            debug!("上游 TLS: 启用 legacy server connect (rustls)");
            builder = builder.use_rustls_tls();
        }

        builder.build().map_err(UpstreamError::Transport)
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
