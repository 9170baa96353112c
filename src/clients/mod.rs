pub mod recharge_client;
pub mod transport;

pub use recharge_client::{extract_auth_token, RechargeClient};
pub use transport::TransportConfig;

use crate::error::UpstreamError;
use async_trait::async_trait;

/// 单个号码的 Top-up 查询能力
///
/// 编排层只依赖这个 trait，测试里可以替换成假的实现。
#[async_trait]
pub trait TopUpLookup: Send + Sync {
    async fn check_availability(&self, mobile_number: &str) -> Result<bool, UpstreamError>;
}
