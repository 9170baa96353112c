//! 单个号码的查询请求与结果

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 单次查询请求
///
/// `session_id` 同时作为 `JioSessionID` 和 `ssjsid` 两个 cookie 的值，
/// 每次查询重新生成，查询结束即丢弃。
#[derive(Debug, Clone)]
pub struct LookupRequest {
    pub mobile_number: String,
    pub session_id: String,
}

impl LookupRequest {
    /// 为号码创建新的会话
    pub fn new(mobile_number: impl Into<String>) -> Self {
        Self {
            mobile_number: mobile_number.into(),
            session_id: Uuid::new_v4().to_string(),
        }
    }

    /// 只带会话 cookie 的请求头（注册接口使用）
    pub fn session_cookie(&self) -> String {
        format!("JioSessionID={id}; ssjsid={id};", id = self.session_id)
    }

    /// 会话 cookie + Authorization cookie（套餐接口使用）
    pub fn authorized_cookie(&self, auth_token: &str) -> String {
        format!(
            "JioSessionID={id}; ssjsid={id}; Authorization={auth_token};",
            id = self.session_id
        )
    }
}

/// 单个号码的查询结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResult {
    pub mobile_number: String,
    pub is_top_up_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LookupResult {
    pub fn available(mobile_number: impl Into<String>, is_top_up_available: bool) -> Self {
        Self {
            mobile_number: mobile_number.into(),
            is_top_up_available,
            error: None,
        }
    }

    /// 查询失败：结果一律视为不可充值，并附带错误信息
    pub fn failed(mobile_number: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            mobile_number: mobile_number.into(),
            is_top_up_available: false,
            error: Some(error.into()),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookies_share_id() {
        let req = LookupRequest::new("911234567890");
        let cookie = req.session_cookie();
        assert_eq!(
            cookie,
            format!("JioSessionID={0}; ssjsid={0};", req.session_id)
        );
        assert!(req
            .authorized_cookie("tok")
            .ends_with("Authorization=tok;"));
    }

    #[test]
    fn test_fresh_session_per_request() {
        let a = LookupRequest::new("1");
        let b = LookupRequest::new("1");
        assert_ne!(a.session_id, b.session_id);
    }

    #[test]
    fn test_result_json_shape() {
        let ok = serde_json::to_value(LookupResult::available("1", true)).unwrap();
        assert_eq!(
            ok,
            serde_json::json!({ "mobileNumber": "1", "isTopUpAvailable": true })
        );

        let failed = serde_json::to_value(LookupResult::failed("2", "Authorization failed")).unwrap();
        assert_eq!(failed["isTopUpAvailable"], false);
        assert_eq!(failed["error"], "Authorization failed");
    }
}
