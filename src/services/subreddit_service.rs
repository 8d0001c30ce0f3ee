//! 社区推荐服务 - 业务能力层
//!
//! 基于静态元数据表，根据用户画像给社区打分排序

use std::collections::BTreeMap;

use crate::models::profile::UserProfile;
use crate::models::subreddit::{SubredditInfo, SubredditSuggestion, SUBREDDITS};

const INTEREST_WEIGHT: u32 = 10;
const SKILL_WEIGHT: u32 = 8;
const PROBLEM_WEIGHT: u32 = 6;
const ACTIVITY_WEIGHT: u32 = 5;

/// 推荐数量上限
pub const MAX_SUGGESTIONS: usize = 12;

/// 画像字段是否命中社区话题（话题等于或包含该字段，忽略大小写）
fn matches_topic(info: &SubredditInfo, field: &str) -> bool {
    let field = field.trim().to_lowercase();
    if field.is_empty() {
        return false;
    }
    info.topics.iter().any(|topic| {
        let topic = topic.to_lowercase();
        topic == field || topic.contains(&field)
    })
}

/// 计算相关度
pub fn relevance_score(info: &SubredditInfo, profile: &UserProfile) -> u32 {
    let mut score = info.activity_score * ACTIVITY_WEIGHT;
    if matches_topic(info, profile.resolved_interest()) {
        score += INTEREST_WEIGHT;
    }
    if matches_topic(info, profile.resolved_skill()) {
        score += SKILL_WEIGHT;
    }
    if matches_topic(info, profile.resolved_problem()) {
        score += PROBLEM_WEIGHT;
    }
    score
}

/// 根据画像推荐社区，按相关度降序，并列时按名称
pub fn suggest(profile: &UserProfile) -> Vec<SubredditSuggestion> {
    let mut suggestions: Vec<SubredditSuggestion> = SUBREDDITS
        .values()
        .map(|info| SubredditSuggestion::new(info, relevance_score(info, profile)))
        .collect();

    suggestions.sort_by(|a, b| {
        b.relevance_score
            .cmp(&a.relevance_score)
            .then_with(|| a.name.cmp(&b.name))
    });
    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

/// 全部社区，按订阅数降序
pub fn all() -> Vec<&'static SubredditInfo> {
    let mut infos: Vec<&'static SubredditInfo> = SUBREDDITS.values().collect();
    infos.sort_by(|a, b| {
        b.subscribers
            .cmp(&a.subscribers)
            .then_with(|| a.name.cmp(b.name))
    });
    infos
}

/// 分类 → 社区名称列表
pub fn categories() -> BTreeMap<&'static str, Vec<&'static str>> {
    let mut by_category: BTreeMap<&'static str, Vec<&'static str>> = BTreeMap::new();
    for info in all() {
        by_category.entry(info.category).or_default().push(info.name);
    }
    by_category
}
