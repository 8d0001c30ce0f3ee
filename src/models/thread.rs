use serde::{Deserialize, Serialize};

/// 论坛评论
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForumComment {
    pub text: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default = "deleted_author")]
    pub author: String,
}

/// 论坛帖子（由外部抓取器提供）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForumPost {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub subreddit: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub num_comments: u64,
    #[serde(default)]
    pub comments: Vec<ForumComment>,
}

fn deleted_author() -> String {
    "[deleted]".to_string()
}
