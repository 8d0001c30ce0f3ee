//! 社区元数据静态表

use phf::phf_map;
use serde::Serialize;

/// 社区元数据
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubredditInfo {
    pub name: &'static str,
    pub display_name: &'static str,
    pub subscribers: u64,
    pub category: &'static str,
    pub topics: &'static [&'static str],
    /// 活跃度（1-10）
    pub activity_score: u32,
}

/// 推荐结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubredditSuggestion {
    pub name: String,
    pub display_name: String,
    pub category: String,
    pub subscribers: u64,
    pub activity_score: u32,
    pub relevance_score: u32,
}

impl SubredditSuggestion {
    pub fn new(info: &SubredditInfo, relevance_score: u32) -> Self {
        Self {
            name: info.name.to_string(),
            display_name: info.display_name.to_string(),
            category: info.category.to_string(),
            subscribers: info.subscribers,
            activity_score: info.activity_score,
            relevance_score,
        }
    }
}

pub static SUBREDDITS: phf::Map<&'static str, SubredditInfo> = phf_map! {
    "entrepreneur" => SubredditInfo {
        name: "entrepreneur",
        display_name: "Entrepreneur",
        subscribers: 3_000_000,
        category: "business",
        topics: &["startup", "business", "entrepreneurship", "marketing"],
        activity_score: 9,
    },
    "smallbusiness" => SubredditInfo {
        name: "smallbusiness",
        display_name: "Small Business",
        subscribers: 500_000,
        category: "business",
        topics: &["small business", "entrepreneurship", "marketing", "finance"],
        activity_score: 8,
    },
    "startups" => SubredditInfo {
        name: "startups",
        display_name: "Startups",
        subscribers: 1_000_000,
        category: "business",
        topics: &["startup", "entrepreneurship", "tech", "funding"],
        activity_score: 9,
    },
    "freelance" => SubredditInfo {
        name: "freelance",
        display_name: "Freelance",
        subscribers: 200_000,
        category: "business",
        topics: &["freelancing", "remote work", "clients", "income"],
        activity_score: 8,
    },
    "programming" => SubredditInfo {
        name: "programming",
        display_name: "Programming",
        subscribers: 4_000_000,
        category: "tech",
        topics: &["programming", "coding", "development", "software"],
        activity_score: 9,
    },
    "webdev" => SubredditInfo {
        name: "webdev",
        display_name: "Web Development",
        subscribers: 800_000,
        category: "tech",
        topics: &["web development", "frontend", "backend", "coding"],
        activity_score: 8,
    },
    "productivity" => SubredditInfo {
        name: "productivity",
        display_name: "Productivity",
        subscribers: 300_000,
        category: "lifestyle",
        topics: &["productivity", "time management", "organization", "efficiency"],
        activity_score: 7,
    },
    "marketing" => SubredditInfo {
        name: "marketing",
        display_name: "Marketing",
        subscribers: 400_000,
        category: "business",
        topics: &["marketing", "advertising", "branding", "growth"],
        activity_score: 8,
    },
    "health" => SubredditInfo {
        name: "health",
        display_name: "Health",
        subscribers: 2_000_000,
        category: "health",
        topics: &["health", "wellness", "fitness", "nutrition"],
        activity_score: 8,
    },
    "education" => SubredditInfo {
        name: "education",
        display_name: "Education",
        subscribers: 500_000,
        category: "education",
        topics: &["education", "learning", "teaching", "skills"],
        activity_score: 7,
    },
};
