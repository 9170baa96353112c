use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 请求参数错误（HTTP 400）
    #[error("{0}")]
    Validation(String),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 编排过程中的意外错误（HTTP 500）
    #[error("{0}")]
    Internal(String),
}

/// 上游充值接口错误
///
/// `Display` 的内容会原样写入 `LookupResult.error`，所以保持英文。
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// 网络请求失败
    #[error("Request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 上游返回非 2xx 状态码
    #[error("Request failed with status code {status}")]
    BadStatus { endpoint: String, status: u16 },
    /// 注册接口没有下发 Authorization cookie
    #[error("Authorization failed")]
    AuthorizationFailed,
    /// 响应体无法解析
    #[error("Invalid response body from {endpoint}: {source}")]
    InvalidBody {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 单次调用超时
    #[error("Request to {endpoint} timed out after {millis}ms")]
    Timeout { endpoint: String, millis: u128 },
    /// HTTP 客户端构建失败
    #[error("Failed to build HTTP client: {0}")]
    Transport(#[source] reqwest::Error),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 批次大小必须大于 0
    #[error("batch_size 必须大于 0")]
    ZeroBatchSize,
    /// 号码正则无效
    #[error("号码正则 '{pattern}' 无效: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    /// 配置文件读取失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 配置文件解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

impl AppError {
    /// 对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_failed_message() {
        assert_eq!(
            UpstreamError::AuthorizationFailed.to_string(),
            "Authorization failed"
        );
    }

    #[test]
    fn test_bad_status_message() {
        let err = UpstreamError::BadStatus {
            endpoint: "plans".to_string(),
            status: 403,
        };
        assert_eq!(err.to_string(), "Request failed with status code 403");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::from(ConfigError::ZeroBatchSize).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
