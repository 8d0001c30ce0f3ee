//! 痛点分析数据模型
//!
//! 模型输出先解析为松散的 `serde_json::Value`，再逐字段映射为强类型结构：
//! 缺失或类型不符的字段使用默认值，不会因为单个字段而整体失败。

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 单个痛点
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PainPoint {
    pub point: String,
    pub quote: String,
    /// 情绪强度（1-10）
    pub emotion_intensity: f64,
    pub current_solutions: Vec<String>,
    /// 现有方案缺口（1-10）
    pub solution_gap: f64,
}

impl PainPoint {
    /// 从松散 JSON 映射，非对象返回 `None`
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            point: string_field(obj.get("point")),
            quote: string_field(obj.get("quote")),
            emotion_intensity: number_field(obj.get("emotionIntensity")),
            current_solutions: string_list_field(obj.get("currentSolutions")),
            solution_gap: number_field(obj.get("solutionGap")),
        })
    }
}

/// 痛点聚类
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub name: String,
    pub themes: Vec<String>,
    pub quotes: Vec<String>,
    pub emotion_intensity: f64,
    pub solution_gap: f64,
    pub frequency: u64,
    pub pain_points: Vec<PainPoint>,
}

impl Cluster {
    /// 从松散 JSON 映射，非对象返回 `None`
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let pain_points = obj
            .get("painPoints")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(PainPoint::from_value).collect())
            .unwrap_or_default();

        Some(Self {
            name: string_field(obj.get("name")),
            themes: string_list_field(obj.get("themes")),
            quotes: string_list_field(obj.get("quotes")),
            emotion_intensity: number_field(obj.get("emotionIntensity")),
            solution_gap: number_field(obj.get("solutionGap")),
            frequency: count_field(obj.get("frequency")),
            pain_points,
        })
    }

    /// 从包含 `clusters` 键的 JSON 对象中映射全部聚类
    ///
    /// 非对象的条目被跳过
    pub fn list_from_value(value: &Value) -> Vec<Self> {
        value
            .get("clusters")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Cluster::from_value).collect())
            .unwrap_or_default()
    }
}

/// 聚类汇总统计
///
/// 聚类为空时只有 `totalClusters`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_clusters: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub most_intense_cluster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biggest_solution_gap: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub most_frequent_cluster: Option<String>,
}

/// 最终分析结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub clusters: Vec<Cluster>,
    pub summary: Summary,
}

impl Analysis {
    /// 空分析结果：`{"clusters": [], "summary": {"totalClusters": 0}}`
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}

/// 对外输出格式：`{"analysis": Analysis}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub analysis: Analysis,
}

impl From<Analysis> for AnalysisResponse {
    fn from(analysis: Analysis) -> Self {
        Self { analysis }
    }
}

// ========== 松散字段读取 ==========

fn string_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// 字符串列表；单个字符串视为一个元素，非字符串元素被忽略
fn string_list_field(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        Some(Value::String(s)) => vec![s.clone()],
        _ => Vec::new(),
    }
}

/// 数值字段；接受数字或数字字符串（如 "8.5"），否则为 0
fn number_field(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

/// 计数字段；小数向下取整，负数视为 0
fn count_field(value: Option<&Value>) -> u64 {
    let number = match value {
        Some(Value::Number(n)) => match n.as_u64() {
            Some(count) => return count,
            None => n.as_f64().unwrap_or(0.0),
        },
        _ => number_field(value),
    };
    if number.is_finite() && number > 0.0 {
        number.floor() as u64
    } else {
        0
    }
}
