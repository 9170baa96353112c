//! 批量 Top-up 查询接口

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::LookupResult;
use crate::orchestrator::NO_NUMBERS;
use crate::server::state::AppState;

const NOT_A_NUMBER: &str = "Mobile numbers must be strings.";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/check-topup-bulk", post(check_topup_bulk))
}

/// POST /check-topup-bulk：`{ "mobileNumbers": [...] }` → `[LookupResult]`
async fn check_topup_bulk(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Vec<LookupResult>>> {
    let Json(body) = payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    let numbers = parse_mobile_numbers(&body)?;

    info!("📥 收到批量查询请求: {} 个号码", numbers.len());

    let results = state.processor.run(&numbers).await?;
    Ok(Json(results))
}

/// 解析请求体中的号码列表
///
/// 缺失、不是数组、空数组都按同一个 400 处理；数字元素转成字符串。
fn parse_mobile_numbers(body: &Value) -> AppResult<Vec<String>> {
    let items = body
        .get("mobileNumbers")
        .and_then(Value::as_array)
        .filter(|items| !items.is_empty())
        .ok_or_else(|| AppError::Validation(NO_NUMBERS.to_string()))?;

    items
        .iter()
        .map(|item| match item {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            _ => Err(AppError::Validation(NOT_A_NUMBER.to_string())),
        })
        .collect()
}
