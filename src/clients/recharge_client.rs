/// 充值套餐 API 客户端
///
/// 模拟浏览器会话完成两步握手：注册会话 → 查询套餐
use crate::clients::transport::TransportConfig;
use crate::clients::TopUpLookup;
use crate::error::UpstreamError;
use crate::models::{LookupRequest, PlansResponse};
use crate::utils::logging::truncate_text;
use async_trait::async_trait;
use reqwest::header::{COOKIE, SET_COOKIE};
use std::future::Future;
use std::time::Duration;
use tracing::debug;

const AUTH_COOKIE: &str = "authorization";

/// 充值套餐客户端
pub struct RechargeClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl RechargeClient {
    /// 创建新的充值套餐客户端
    pub fn new(base_url: impl Into<String>, transport: &TransportConfig) -> Result<Self, UpstreamError> {
        Ok(Self {
            http: transport.build_client()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: transport.timeout,
        })
    }

    /// 查询号码是否有 Top-up 套餐
    ///
    /// # 参数
    /// - `mobile_number`: 手机号（不做校验，原样拼进 URL）
    ///
    /// # 返回
    /// 任何一步失败都直接返回 `UpstreamError`，不重试
    pub async fn check_availability(&self, mobile_number: &str) -> Result<bool, UpstreamError> {
        let request = LookupRequest::new(mobile_number);
        let auth_token = self.register(&request).await?;
        let plans = self.fetch_plans(&request, &auth_token).await?;
        Ok(plans.has_top_up())
    }

    /// 第一步：注册会话，从 set-cookie 中拿到 Authorization
    async fn register(&self, request: &LookupRequest) -> Result<String, UpstreamError> {
        let endpoint = format!("{}/mobility/number/{}", self.base_url, request.mobile_number);
        let cookie = request.session_cookie();

        let response = self
            .timed(&endpoint, self.send(&endpoint, cookie))
            .await?;

        let set_cookies = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok());

        let token = extract_auth_token(set_cookies).ok_or(UpstreamError::AuthorizationFailed)?;
        debug!(
            "[{}] 会话注册成功, Authorization: {}",
            request.mobile_number,
            truncate_text(&token, 8)
        );
        Ok(token)
    }

    /// 第二步：带 Authorization cookie 查询套餐
    async fn fetch_plans(
        &self,
        request: &LookupRequest,
        auth_token: &str,
    ) -> Result<PlansResponse, UpstreamError> {
        let endpoint = format!("{}/plans/serviceId/{}", self.base_url, request.mobile_number);
        let cookie = request.authorized_cookie(auth_token);

        self.timed(&endpoint, async {
            let response = self.send(&endpoint, cookie).await?;
            response
                .json::<PlansResponse>()
                .await
                .map_err(|source| UpstreamError::InvalidBody {
                    endpoint: endpoint.clone(),
                    source,
                })
        })
        .await
    }

    async fn send(&self, endpoint: &str, cookie: String) -> Result<reqwest::Response, UpstreamError> {
        debug!("GET {}", endpoint);

        let response = self
            .http
            .get(endpoint)
            .header(COOKIE, cookie)
            .send()
            .await
            .map_err(|source| UpstreamError::Request {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::BadStatus {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    async fn timed<T>(
        &self,
        endpoint: &str,
        fut: impl Future<Output = Result<T, UpstreamError>>,
    ) -> Result<T, UpstreamError> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, fut).await.map_err(|_| UpstreamError::Timeout {
                endpoint: endpoint.to_string(),
                millis: limit.as_millis(),
            })?,
            None => fut.await,
        }
    }
}

#[async_trait]
impl TopUpLookup for RechargeClient {
    async fn check_availability(&self, mobile_number: &str) -> Result<bool, UpstreamError> {
        RechargeClient::check_availability(self, mobile_number).await
    }
}

/// 从多个 set-cookie 头中提取 Authorization 的值
///
/// cookie 名大小写不敏感，只看第一个名字匹配的 cookie；
/// 值截取到第一个 `;` 之前，空值视为授权失败。
pub fn extract_auth_token<'a>(set_cookies: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let rest = set_cookies.into_iter().find_map(|header| {
        let (key, rest) = header.split_once('=')?;
        key.trim().eq_ignore_ascii_case(AUTH_COOKIE).then_some(rest)
    })?;
    let token = rest.split(';').next().unwrap_or_default().trim();
    (!token.is_empty()).then(|| token.to_string())
}
