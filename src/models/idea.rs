use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 竞品信息
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Competition {
    pub existing_solutions: Vec<String>,
    pub our_advantage: String,
}

/// 商业点子
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessIdea {
    pub name: String,
    pub description: String,
    pub target_audience: String,
    pub value_proposition: String,
    pub unique_mechanism: String,
    pub monetization: String,
    /// 共鸣度评分（0-100）
    pub resonance_score: f64,
    pub key_features: Vec<String>,
    pub market_trends: Vec<String>,
    pub competition: Competition,
}

impl BusinessIdea {
    /// 从松散 JSON 映射；字段类型不符时整个条目被丢弃
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }
}

/// 市场细分
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Niche {
    pub name: String,
    pub description: String,
}

/// 发送给 LLM 的痛点摘要
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PainPointBrief {
    pub point: String,
    pub quote: String,
    pub emotion_intensity: f64,
    pub solution_gap: f64,
}

impl PainPointBrief {
    /// 只有纯文本时使用的默认评分
    pub const DEFAULT_SCORE: f64 = 7.0;

    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            point: text.into(),
            quote: String::new(),
            emotion_intensity: Self::DEFAULT_SCORE,
            solution_gap: Self::DEFAULT_SCORE,
        }
    }
}

impl From<&crate::models::analysis::PainPoint> for PainPointBrief {
    fn from(p: &crate::models::analysis::PainPoint) -> Self {
        Self {
            point: p.point.clone(),
            quote: p.quote.clone(),
            emotion_intensity: p.emotion_intensity,
            solution_gap: p.solution_gap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_business_idea_partial_fields() {
        let value = json!({
            "name": "GhostGuard",
            "resonanceScore": 82,
            "keyFeatures": ["Automated follow-ups"],
            "competition": {"existingSolutions": ["CRM"]}
        });
        let idea = BusinessIdea::from_value(&value).unwrap();
        assert_eq!(idea.name, "GhostGuard");
        assert_eq!(idea.resonance_score, 82.0);
        assert_eq!(idea.competition.existing_solutions, vec!["CRM"]);
        assert!(idea.competition.our_advantage.is_empty());
    }

    #[test]
    fn test_business_idea_rejects_non_object() {
        assert!(BusinessIdea::from_value(&json!("an idea")).is_none());
        assert!(BusinessIdea::from_value(&json!({"name": ["wrong"]})).is_none());
    }
}
