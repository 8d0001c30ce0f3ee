//! 模型响应解析 - 业务能力层
//!
//! 从模型的原始文本中提取 JSON 结构。模型经常无视"只返回 JSON"的要求，
//! 在外面包一层 markdown 代码块或解释性文字，也可能输出被截断的 JSON。
//! 任何解析失败都降级为空结果 `{"clusters": []}`，错误不会传播给调用方。

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::models::analysis::Cluster;
use crate::utils::truncate_text;

static LEADING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```[A-Za-z0-9_-]*[ \t]*(?:\r?\n)?").expect("leading fence pattern"));
static TRAILING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\r?\n)?[ \t]*```$").expect("trailing fence pattern"));

/// 空结果
pub fn empty_result() -> Value {
    json!({ "clusters": [] })
}

/// 去掉首尾空白和 markdown 代码块标记
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let start = LEADING_FENCE.find(trimmed).map_or(0, |m| m.end());
    let body = &trimmed[start..];
    let end = TRAILING_FENCE.find(body).map_or(body.len(), |m| m.start());
    body[..end].trim()
}

/// 定位第一个 `{` 到最后一个 `}` 之间的片段
fn object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// 定位第一个 `[` 到最后一个 `]` 之间的片段
fn array_span(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (end > start).then(|| &text[start..=end])
}

/// 解析模型响应
///
/// 返回值一定是包含 `clusters` 键的 JSON 对象；除此之外不校验字段
pub fn parse_response(raw: &str) -> Value {
    let cleaned = strip_code_fence(raw);

    let Some(span) = object_span(cleaned) else {
        warn!(
            "响应中没有找到 JSON 对象: {}",
            truncate_text(cleaned, 120)
        );
        return empty_result();
    };

    let parsed: Value = match serde_json::from_str(span) {
        Ok(value) => value,
        Err(e) => {
            warn!("JSON 解析失败: {}", e);
            debug!("原始响应: {}", raw);
            return empty_result();
        }
    };

    if parsed.get("clusters").is_none() {
        warn!("响应结构无效: 缺少 clusters 字段");
        return empty_result();
    }

    parsed
}

/// 解析模型响应并映射为强类型的聚类列表
pub fn parse_clusters(raw: &str) -> Vec<Cluster> {
    Cluster::list_from_value(&parse_response(raw))
}

/// 从响应中提取 JSON 数组（用于细分市场和商业点子）
///
/// 找不到或解析失败时返回空列表；顶层是对象时尝试取其中第一个数组字段
pub fn parse_array(raw: &str) -> Vec<Value> {
    let cleaned = strip_code_fence(raw);

    if let Some(span) = array_span(cleaned) {
        if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(span) {
            return items;
        }
    }

    if let Some(span) = object_span(cleaned) {
        if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(span) {
            if let Some(items) = map.into_iter().find_map(|(_, v)| match v {
                Value::Array(items) => Some(items),
                _ => None,
            }) {
                return items;
            }
        }
    }

    warn!("响应中没有找到 JSON 数组: {}", truncate_text(cleaned, 120));
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEAN: &str = r#"{"clusters":[{"name":"Client acquisition","emotionIntensity":8,"solutionGap":7,"frequency":3}]}"#;

    #[test]
    fn test_fenced_empty_clusters() {
        let value = parse_response("```json\n{\"clusters\":[]}\n```");
        assert_eq!(value, json!({"clusters": []}));
    }

    #[test]
    fn test_fenced_and_clean_parse_identically() {
        let fenced = format!("```json\n{}\n```", CLEAN);
        let bare_fence = format!("```\n{}\n```", CLEAN);
        assert_eq!(parse_response(&fenced), parse_response(CLEAN));
        assert_eq!(parse_response(&bare_fence), parse_response(CLEAN));
        assert_eq!(parse_clusters(CLEAN).len(), 1);
    }

    #[test]
    fn test_json_inside_prose() {
        let raw = format!("Here is the analysis you asked for:\n{}\nLet me know if you need more.", CLEAN);
        let clusters = parse_clusters(&raw);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].name, "Client acquisition");
    }

    #[test]
    fn test_degrades_to_empty_result() {
        let inputs = [
            "",
            "   \n  ",
            "I could not find any pain points in this content.",
            "{\"clusters\": [{\"name\": \"cut off",
            "}{",
            "```json\n```",
            "{\"themes\": [\"no clusters key\"]}",
            "[1, 2, 3]",
            "{not json at all}",
        ];

        for raw in inputs {
            let value = parse_response(raw);
            assert!(value.get("clusters").is_some(), "input: {:?}", raw);
            assert!(parse_clusters(raw).is_empty(), "input: {:?}", raw);
        }
    }

    #[test]
    fn test_malformed_clusters_pass_through() {
        let raw = r#"{"clusters": [{"name": "A", "frequency": "lots"}, "junk"], "extra": true}"#;
        let value = parse_response(raw);
        assert_eq!(value["clusters"].as_array().unwrap().len(), 2);
        assert_eq!(value["extra"], json!(true));

        let clusters = parse_clusters(raw);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].frequency, 0);
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("  ```json\n{}\n```  "), "{}");
        assert_eq!(strip_code_fence("{}"), "{}");
        assert_eq!(strip_code_fence("```JSON {\"a\":1}```"), "{\"a\":1}");
    }

    #[test]
    fn test_parse_array() {
        let raw = "```json\n[{\"name\": \"Niche A\"}, {\"name\": \"Niche B\"}]\n```";
        assert_eq!(parse_array(raw).len(), 2);

        let wrapped = r#"{"ideas": [{"name": "Idea"}]}"#;
        assert_eq!(parse_array(wrapped).len(), 1);

        assert!(parse_array("no json here").is_empty());
        assert!(parse_array("[1, 2").is_empty());
    }
}
