//! 上游套餐接口的响应结构（只解析用得到的字段）

use serde::Deserialize;

const TOP_UP_TYPE: &str = "Top-up";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlansResponse {
    #[serde(default)]
    pub plan_categories: Option<Vec<PlanCategory>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlanCategory {
    #[serde(rename = "type", default)]
    pub category_type: Option<String>,
}

impl PlansResponse {
    /// 是否存在 `type` 恰好为 "Top-up" 的套餐分类
    pub fn has_top_up(&self) -> bool {
        self.plan_categories
            .as_deref()
            .unwrap_or_default()
            .iter()
            .any(|c| c.category_type.as_deref() == Some(TOP_UP_TYPE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> PlansResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_top_up_present() {
        let resp = parse(
            r#"{"planCategories":[{"type":"Popular Plans"},{"type":"Top-up","name":"x"}]}"#,
        );
        assert!(resp.has_top_up());
    }

    #[test]
    fn test_missing_categories() {
        assert!(!parse(r#"{"status":"ok"}"#).has_top_up());
        assert!(!parse(r#"{"planCategories":null}"#).has_top_up());
        assert!(!parse(r#"{"planCategories":[]}"#).has_top_up());
    }

    #[test]
    fn test_match_is_exact() {
        let resp = parse(r#"{"planCategories":[{"type":"top-up"},{"type":"Top-up "},{}]}"#);
        assert!(!resp.has_top_up());
    }
}
