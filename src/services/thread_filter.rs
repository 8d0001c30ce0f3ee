//! 帖子筛选服务 - 业务能力层
//!
//! 把抓取到的论坛帖子筛选、整理成痛点文本。
//! 只保留个人求助类帖子，过滤招聘和公司宣传帖。

use std::collections::HashSet;

use tracing::debug;

use crate::models::thread::{ForumComment, ForumPost};

/// 招聘、公司宣传类关键词
const BUSINESS_INDICATORS: &[&str] = &[
    "hiring",
    "job opening",
    "position available",
    "we are looking for",
    "company",
    "business",
    "startup",
    "entrepreneur",
    "looking to hire",
    "recruiting",
    "employment",
    "career opportunity",
    "join our team",
    "apply now",
    "submit your resume",
    "send your cv",
];

/// 个人求助类关键词
const PROBLEM_INDICATORS: &[&str] = &[
    "i have",
    "i'm having",
    "i am having",
    "i struggle",
    "i'm struggling",
    "i need help",
    "i can't",
    "i cannot",
    "i'm stuck",
    "i feel",
    "my problem",
    "my issue",
    "my pain",
    "my struggle",
    "help me",
    "advice needed",
    "anyone else",
    "does anyone",
    "how do you",
    "what should i",
    "what can i",
    "feeling",
    "experiencing",
];

/// 定向搜索时标题需要包含的关键词
const TARGETED_TITLE_WORDS: &[&str] = &[
    "help",
    "problem",
    "issue",
    "struggle",
    "question",
    "advice",
    "recommendation",
];

/// 无关键词时正文长度超过该值也保留
const LONG_BODY_CHARS: usize = 100;
/// 最多收集的帖子数
const MAX_COLLECTED: usize = 30;
/// 最终保留的帖子数
const MAX_SELECTED: usize = 20;
/// 参与排序的评论数
const COMMENTS_CONSIDERED: usize = 10;
/// 附加到正文的评论数
const COMMENTS_APPENDED: usize = 5;
/// 评论最短有效长度
const MIN_COMMENT_CHARS: usize = 10;
/// 定向搜索时正文截断长度
const TARGETED_BODY_CHARS: usize = 500;

fn contains_any(post: &ForumPost, indicators: &[&str]) -> bool {
    let title = post.title.to_lowercase();
    let content = post.content.to_lowercase();
    indicators
        .iter()
        .any(|indicator| title.contains(indicator) || content.contains(indicator))
}

/// 是否为招聘或公司宣传帖
pub fn is_business_post(post: &ForumPost) -> bool {
    contains_any(post, BUSINESS_INDICATORS)
}

/// 是否包含个人求助类表达
pub fn has_problem_indicator(post: &ForumPost) -> bool {
    contains_any(post, PROBLEM_INDICATORS)
}

/// 筛选相关帖子
///
/// 去重（按 URL）→ 过滤公司帖 → 保留求助帖或长正文 → 按 score + 评论数降序 → 取前 20
pub fn select_relevant_posts(posts: &[ForumPost]) -> Vec<ForumPost> {
    let mut seen_urls: HashSet<&str> = HashSet::new();
    let mut collected: Vec<ForumPost> = Vec::new();

    for post in posts {
        if !post.url.is_empty() && !seen_urls.insert(post.url.as_str()) {
            continue;
        }

        if is_business_post(post) {
            debug!("跳过公司/招聘帖: {}", post.title);
            continue;
        }

        if has_problem_indicator(post) || post.content.chars().count() > LONG_BODY_CHARS {
            collected.push(post.clone());
        }

        if collected.len() >= MAX_COLLECTED {
            break;
        }
    }

    collected.sort_by_key(|post| std::cmp::Reverse(post.score.saturating_add(post.num_comments as i64)));
    collected.truncate(MAX_SELECTED);
    collected
}

/// 整理帖子正文，附加得分最高的评论
pub fn assemble_content(post: &ForumPost) -> String {
    let mut comments: Vec<&ForumComment> = post
        .comments
        .iter()
        .take(COMMENTS_CONSIDERED)
        .filter(|c| c.text.trim().chars().count() > MIN_COMMENT_CHARS)
        .collect();
    comments.sort_by_key(|c| std::cmp::Reverse(c.score));

    let mut full_content = post.content.clone();
    if !comments.is_empty() {
        full_content.push_str("\n\n--- COMMENTS ---\n");
        for comment in comments.iter().take(COMMENTS_APPENDED) {
            full_content.push_str(&format!(
                "\nComment by {} (score: {}):\n{}\n",
                comment.author, comment.score, comment.text
            ));
        }
    }
    full_content
}

/// 转换为痛点文本：标题 + 正文（含评论）
pub fn to_pain_point_text(post: &ForumPost) -> String {
    format!("{}\n{}", post.title, assemble_content(post))
        .trim()
        .to_string()
}

/// 定向搜索结果筛选：标题需包含求助类关键词，正文截断到 500 字符
pub fn filter_targeted_titles(posts: &[ForumPost]) -> Vec<ForumPost> {
    let mut seen_urls: HashSet<&str> = HashSet::new();
    posts
        .iter()
        .filter(|post| post.url.is_empty() || seen_urls.insert(post.url.as_str()))
        .filter(|post| {
            let title = post.title.to_lowercase();
            TARGETED_TITLE_WORDS.iter().any(|word| title.contains(word))
        })
        .map(|post| ForumPost {
            content: post.content.chars().take(TARGETED_BODY_CHARS).collect(),
            ..post.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, content: &str, url: &str, score: i64, num_comments: u64) -> ForumPost {
        ForumPost {
            title: title.to_string(),
            content: content.to_string(),
            url: url.to_string(),
            score,
            num_comments,
            ..Default::default()
        }
    }

    fn comment(text: &str, score: i64) -> ForumComment {
        ForumComment {
            text: text.to_string(),
            score,
            author: "someone".to_string(),
        }
    }

    #[test]
    fn test_business_posts_are_dropped() {
        let posts = vec![
            post("We are hiring designers", "I can't wait to meet you", "u1", 50, 5),
            post("I can't find clients", "Every quote gets ghosted", "u2", 3, 1),
        ];
        let selected = select_relevant_posts(&posts);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].url, "u2");
    }

    #[test]
    fn test_long_body_without_indicator_is_kept() {
        let long_body = "x".repeat(101);
        let posts = vec![
            post("Weekly thread", &long_body, "u1", 1, 0),
            post("Weekly thread", "short", "u2", 1, 0),
        ];
        let selected = select_relevant_posts(&posts);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].url, "u1");
    }

    #[test]
    fn test_duplicates_removed_and_sorted_by_engagement() {
        let posts = vec![
            post("I need help with invoices", "", "u1", 1, 1),
            post("I need help with invoices", "", "u1", 1, 1),
            post("Does anyone track time well?", "", "u2", 10, 10),
            post("I feel overwhelmed", "", "u3", 5, 0),
        ];
        let selected = select_relevant_posts(&posts);
        let urls: Vec<&str> = selected.iter().map(|p| p.url.as_str()).collect();
        assert_eq!(urls, vec!["u2", "u3", "u1"]);
    }

    #[test]
    fn test_selection_is_capped() {
        let posts: Vec<ForumPost> = (0..40)
            .map(|i| post("I need help", "", &format!("u{}", i), i, 0))
            .collect();
        let selected = select_relevant_posts(&posts);
        assert_eq!(selected.len(), 20);
        // 只收集前 30 条，其中得分最高的是 u29
        assert_eq!(selected[0].url, "u29");
    }

    #[test]
    fn test_assemble_content_appends_top_comments() {
        let mut p = post("I can't find clients", "Body text", "u1", 1, 3);
        p.comments = vec![
            comment("Try cold emailing local agencies.", 3),
            comment("ok", 100),
            comment("Join a freelancer community for referrals.", 9),
        ];

        let content = assemble_content(&p);
        assert!(content.starts_with("Body text\n\n--- COMMENTS ---\n"));
        assert!(!content.contains("score: 100"));
        let referrals = content.find("referrals").unwrap();
        let cold = content.find("cold emailing").unwrap();
        assert!(referrals < cold);
    }

    #[test]
    fn test_to_pain_point_text_without_comments() {
        let p = post("Clients ghost me", "After every quote.", "u1", 1, 0);
        assert_eq!(to_pain_point_text(&p), "Clients ghost me\nAfter every quote.");
    }

    #[test]
    fn test_filter_targeted_titles() {
        let long_body = "y".repeat(800);
        let posts = vec![
            post("Need advice on pricing", &long_body, "u1", 1, 0),
            post("Show off my new site", "", "u2", 1, 0),
        ];
        let filtered = filter_targeted_titles(&posts);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].content.chars().count(), 500);
    }
}
