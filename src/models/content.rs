use serde::{Deserialize, Serialize};

/// 分块之间、条目之间的分隔符（空行）
pub const ITEM_SEPARATOR: &str = "\n\n";

/// 内容分块
///
/// 若干条痛点文本按原顺序以空行拼接而成，只被抽取服务消费一次
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentChunk {
    /// 分块序号（从 0 开始）
    pub index: usize,
    /// 拼接后的文本
    pub text: String,
    /// 包含的条目数量
    pub item_count: usize,
}

impl ContentChunk {
    /// 文本长度（按字符计）
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// 待分析的一批痛点文本（TOML 输入文件）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PainPointBatch {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub pain_points: Vec<String>,
    #[serde(default)]
    pub posts: Vec<crate::models::thread::ForumPost>,
    /// 定向搜索得到的帖子，只保留标题带求助关键词的
    #[serde(default)]
    pub targeted_posts: Vec<crate::models::thread::ForumPost>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<crate::models::profile::UserProfile>,
    #[serde(skip_serializing, skip_deserializing)]
    pub file_path: Option<String>,
}
