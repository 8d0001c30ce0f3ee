//! 提示词模板
//!
//! 每次调用都在提示词末尾附加一个随机数种子，只用于让相似输入得到不同措辞，
//! 不是可复现的采样种子

use rand::Rng;

use crate::models::profile::UserProfile;

/// 系统消息：市场研究分析师
pub const ANALYST_SYSTEM_MESSAGE: &str =
    "You are a business strategist specializing in market research and idea generation.";

/// 随机种子范围
const SEED_RANGE: std::ops::RangeInclusive<u32> = 1..=10_000;

/// 生成随机种子
pub fn random_seed() -> u32 {
    rand::rng().random_range(SEED_RANGE)
}

/// 在提示词末尾附加种子
pub fn with_seed(prompt: &str, seed: u32) -> String {
    format!("{}\nUse seed {} for varied responses.", prompt, seed)
}

/// 构建痛点抽取提示词
pub fn build_extraction_prompt(content: &str) -> String {
    format!(
        r#"
You are a pain point analyzer. Analyze the following Reddit content and extract pain points:

{}

Extract pain points from this content and group them into clusters. For each pain point, identify:
1. The core issue/problem
2. Representative quotes from the text
3. Emotion intensity (1-10 scale)
4. Current solutions being used
5. Solution gap (1-10 scale - how well current solutions work)

Return ONLY a valid JSON object with this exact structure (no other text):
{{
    "clusters": [
        {{
            "name": "Cluster Name",
            "themes": ["Theme 1", "Theme 2"],
            "quotes": ["Quote 1", "Quote 2"],
            "emotionIntensity": 8.5,
            "solutionGap": 7.5,
            "frequency": 5,
            "painPoints": [
                {{
                    "point": "Specific Pain Point",
                    "quote": "Representative Quote",
                    "emotionIntensity": 9,
                    "currentSolutions": ["Solution 1", "Solution 2"],
                    "solutionGap": 8
                }}
            ]
        }}
    ]
}}

Focus on real pain points mentioned in the text. If no clear pain points are found, return an empty clusters array.
"#,
        content
    )
}

/// 构建细分市场提示词
pub fn build_niche_prompt(profile: &UserProfile) -> String {
    format!(
        r#"
# Niche Generator
Based on the user profile:
- Interest: {}
- Skill: {}
- Problem: {}
- Details: {}
Generate 5 relevant market niches with brief descriptions.
Return a list in JSON format: [{{"name": "Niche", "description": "Description"}}, ...]
"#,
        profile.resolved_interest(),
        profile.resolved_skill(),
        profile.resolved_problem(),
        profile.details
    )
}

/// 构建商业点子提示词
///
/// `pain_points_json` 是已经序列化好的痛点列表
pub fn build_idea_prompt(profile: &UserProfile, pain_points_json: &str) -> String {
    format!(
        r#"
# Business Idea Generator (Strategic Framework)

You are a market strategist specializing in startup ideation. Your task is to generate innovative business ideas that solve real problems in underserved markets.

Context:
- The user is looking for a startup idea
- Avoid generic productivity tools
- Focus on underserved problems or rising trends
- Consider emerging technologies and market shifts

User Profile:
- Interest: {}
- Skill: {}
- Problem Focus: {}
- Additional Details: {}

Pain Point Analysis:
{}

For each pain point cluster, generate a business idea that:
1. Has a unique hook or twist
2. Solves the pain in a new or better way than existing solutions
3. Is clearly monetizable
4. Targets an underserved or emerging market
5. Leverages the user's skills effectively

Return a JSON array of ideas, each containing:
{{
    "name": "Product Name",
    "description": "Clear, concise description of the solution",
    "targetAudience": "Specific target market segment",
    "valueProposition": "Unique value that solves the pain point",
    "uniqueMechanism": "How it differs from existing solutions",
    "monetization": "Clear revenue model",
    "resonanceScore": 0-100 (based on skill fit, market need, and uniqueness),
    "keyFeatures": ["Feature 1", "Feature 2", "Feature 3"],
    "marketTrends": ["Relevant trend 1", "Relevant trend 2"],
    "competition": {{
        "existingSolutions": ["Solution 1", "Solution 2"],
        "ourAdvantage": "How we're different"
    }}
}}

Focus on generating 3 high-quality ideas that are:
- Specific and actionable
- Based on real market needs
- Leveraging emerging trends
- Different from existing solutions
"#,
        profile.resolved_interest(),
        profile.resolved_skill(),
        profile.resolved_problem(),
        profile.details,
        pain_points_json
    )
}
