use serde::{Deserialize, Serialize};

/// 选择 "Other" 时使用自由填写的字段
const OTHER: &str = "Other";

/// 用户画像
///
/// 与批次文件中的其他键一致，使用 snake_case（`interest_other` 等）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub interest: String,
    #[serde(default)]
    pub interest_other: String,
    #[serde(default)]
    pub skill: String,
    #[serde(default)]
    pub skill_other: String,
    #[serde(default)]
    pub problem: String,
    #[serde(default)]
    pub problem_other: String,
    #[serde(default)]
    pub details: String,
}

impl UserProfile {
    pub fn resolved_interest(&self) -> &str {
        resolve(&self.interest, &self.interest_other)
    }

    pub fn resolved_skill(&self) -> &str {
        resolve(&self.skill, &self.skill_other)
    }

    pub fn resolved_problem(&self) -> &str {
        resolve(&self.problem, &self.problem_other)
    }
}

fn resolve<'a>(value: &'a str, other: &'a str) -> &'a str {
    if value == OTHER {
        other
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_selects_free_text() {
        let profile = UserProfile {
            interest: "Other".to_string(),
            interest_other: "beekeeping".to_string(),
            skill: "programming".to_string(),
            skill_other: "ignored".to_string(),
            ..Default::default()
        };
        assert_eq!(profile.resolved_interest(), "beekeeping");
        assert_eq!(profile.resolved_skill(), "programming");
        assert_eq!(profile.resolved_problem(), "");
    }
}
