//! # Top-up Checker
//!
//! 批量查询手机号是否有 Top-up 充值套餐的 HTTP 服务
//!
//! ## 架构设计
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 与上游充值接口交互，只处理单个号码
//! - `RechargeClient` - 注册会话 → 查询套餐的两步握手
//! - `TransportConfig` - 出站 HTTP 配置（TLS 兼容、超时、UA）
//!
//! ### ② 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 分批并发查询，批次间限速，失败隔离
//!
//! ### ③ 接口层（Server）
//! - `server/` - `POST /check-topup-bulk` 与静态页面
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod server;
pub mod utils;

// 重新导出常用类型
pub use app::App;
pub use clients::{RechargeClient, TopUpLookup, TransportConfig};
pub use config::Config;
pub use error::{AppError, AppResult, UpstreamError};
pub use models::{LookupRequest, LookupResult, NumberPolicy};
pub use orchestrator::{BatchOptions, BatchOutcome, BatchProcessor, BatchStats};
