//! 应用入口：组装依赖并启动 HTTP 服务

use crate::clients::{RechargeClient, TransportConfig};
use crate::config::Config;
use crate::models::NumberPolicy;
use crate::orchestrator::{BatchOptions, BatchProcessor};
use crate::server::{self, AppState};
use crate::utils::logging;
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// 应用主结构
pub struct App {
    config: Config,
    router: Router,
}

impl App {
    /// 初始化应用
    ///
    /// 创建上游客户端（传输层配置显式传入）、批量处理器和路由
    pub fn initialize(config: Config) -> Result<Self> {
        logging::log_startup(&config);

        let transport = TransportConfig::from_config(&config);
        let client = RechargeClient::new(config.upstream_base_url.clone(), &transport)
            .context("无法创建上游客户端")?;
        let policy = NumberPolicy::from_config(&config)?;

        let processor = BatchProcessor::new(
            Arc::new(client),
            BatchOptions::from_config(&config),
            policy,
        );
        let state = Arc::new(AppState::new(processor, config.static_dir.clone()));
        let router = server::build_router(state);

        Ok(Self { config, router })
    }

    /// 路由（测试时可以直接拿来发请求）
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// 绑定端口并运行，直到收到 Ctrl+C
    pub async fn run(self) -> Result<()> {
        let addr = self.config.listen_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("无法监听 {}", addr))?;

        info!("✅ Server running at http://localhost:{}", self.config.port);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP 服务异常退出")?;

        info!("👋 服务已停止");
        Ok(())
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("收到退出信号，正在关闭服务...");
    }
}
