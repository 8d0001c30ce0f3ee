//! 点子生成服务 - 业务能力层
//!
//! 根据用户画像生成细分市场，根据痛点分析生成商业点子。
//! 模型输出无法解析时返回空列表，传输错误原样向上传播。

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::clients::CompletionClient;
use crate::error::LlmError;
use crate::models::analysis::Analysis;
use crate::models::idea::{BusinessIdea, Niche, PainPointBrief};
use crate::models::profile::UserProfile;
use crate::services::{prompts, response_parser};

/// 只有纯文本时最多取的条数
const MAX_TEXT_BRIEFS: usize = 3;

/// 收集用于生成点子的痛点摘要
///
/// 优先取分析结果中所有聚类的痛点；没有时取前 3 条原始文本并使用默认评分
pub fn collect_briefs(analysis: &Analysis, texts: &[String]) -> Vec<PainPointBrief> {
    let from_clusters: Vec<PainPointBrief> = analysis
        .clusters
        .iter()
        .flat_map(|cluster| cluster.pain_points.iter())
        .map(PainPointBrief::from)
        .collect();

    if !from_clusters.is_empty() {
        return from_clusters;
    }

    texts
        .iter()
        .filter(|text| !text.trim().is_empty())
        .take(MAX_TEXT_BRIEFS)
        .map(|text| PainPointBrief::from_text(text.trim()))
        .collect()
}

/// 点子生成服务
pub struct IdeaService {
    client: Arc<dyn CompletionClient>,
}

impl IdeaService {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// 生成细分市场名称
    pub async fn generate_niches(&self, profile: &UserProfile) -> Result<Vec<String>, LlmError> {
        let prompt = prompts::with_seed(&prompts::build_niche_prompt(profile), prompts::random_seed());
        let response = self
            .client
            .complete(prompts::ANALYST_SYSTEM_MESSAGE, &prompt)
            .await?;

        let names: Vec<String> = response_parser::parse_array(&response)
            .into_iter()
            .filter_map(|value| serde_json::from_value::<Niche>(value).ok())
            .map(|niche| niche.name)
            .filter(|name| !name.trim().is_empty())
            .collect();

        debug!("生成细分市场 {} 个", names.len());
        Ok(names)
    }

    /// 生成商业点子
    pub async fn generate_ideas(
        &self,
        profile: &UserProfile,
        pain_points: &[PainPointBrief],
    ) -> Result<Vec<BusinessIdea>, LlmError> {
        if pain_points.is_empty() {
            warn!("没有可用的痛点，跳过点子生成");
            return Ok(Vec::new());
        }

        let pain_points_json = serde_json::to_string_pretty(pain_points).map_err(|e| {
            LlmError::RequestBuildFailed {
                message: format!("序列化痛点失败: {}", e),
            }
        })?;

        let prompt = prompts::with_seed(
            &prompts::build_idea_prompt(profile, &pain_points_json),
            prompts::random_seed(),
        );
        let response = self
            .client
            .complete(prompts::ANALYST_SYSTEM_MESSAGE, &prompt)
            .await?;

        let ideas: Vec<BusinessIdea> = response_parser::parse_array(&response)
            .iter()
            .filter_map(BusinessIdea::from_value)
            .collect();

        info!("💡 基于 {} 个痛点生成点子 {} 个", pain_points.len(), ideas.len());
        Ok(ideas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::{Cluster, PainPoint};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct CannedClient {
        reply: Result<String, ()>,
        prompts: Mutex<Vec<String>>,
    }

    impl CannedClient {
        fn new(reply: Result<String, ()>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CompletionClient for CannedClient {
        async fn complete(&self, _system: &str, user: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(user.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(_) => Err(LlmError::Unauthorized {
                    model: "test-model".to_string(),
                    message: "invalid_api_key".to_string(),
                }),
            }
        }

        fn model_name(&self) -> &str {
            "test-model"
        }
    }

    fn analysis_with_pain_point() -> Analysis {
        Analysis {
            clusters: vec![Cluster {
                name: "Client acquisition".to_string(),
                pain_points: vec![PainPoint {
                    point: "No steady clients".to_string(),
                    quote: "I can't find clients".to_string(),
                    emotion_intensity: 9.0,
                    solution_gap: 8.0,
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Analysis::empty()
        }
    }

    #[test]
    fn test_collect_briefs_prefers_clusters() {
        let texts = vec!["ignored".to_string()];
        let briefs = collect_briefs(&analysis_with_pain_point(), &texts);
        assert_eq!(briefs.len(), 1);
        assert_eq!(briefs[0].point, "No steady clients");
        assert_eq!(briefs[0].emotion_intensity, 9.0);
    }

    #[test]
    fn test_collect_briefs_falls_back_to_texts() {
        let texts: Vec<String> = ["a", " ", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        let briefs = collect_briefs(&Analysis::empty(), &texts);
        let points: Vec<&str> = briefs.iter().map(|b| b.point.as_str()).collect();
        assert_eq!(points, vec!["a", "b", "c"]);
        assert!(briefs.iter().all(|b| b.quote.is_empty()));
        assert!(briefs.iter().all(|b| b.emotion_intensity == 7.0 && b.solution_gap == 7.0));
    }

    #[tokio::test]
    async fn test_generate_niches() {
        let client = CannedClient::new(Ok(
            "```json\n[{\"name\": \"Solo designers\", \"description\": \"...\"}, {\"name\": \"\"}, \"junk\"]\n```"
                .to_string(),
        ));
        let service = IdeaService::new(client.clone());
        let niches = service.generate_niches(&UserProfile::default()).await.unwrap();
        assert_eq!(niches, vec!["Solo designers"]);
        assert!(client.prompts.lock().unwrap()[0].contains("Use seed "));
    }

    #[tokio::test]
    async fn test_generate_ideas_parses_array() {
        let client = CannedClient::new(Ok(
            r#"Here you go: [{"name": "GhostGuard", "resonanceScore": 80}, {"name": ["bad"]}]"#.to_string(),
        ));
        let service = IdeaService::new(client.clone());
        let briefs = collect_briefs(&analysis_with_pain_point(), &[]);
        let ideas = service
            .generate_ideas(&UserProfile::default(), &briefs)
            .await
            .unwrap();
        assert_eq!(ideas.len(), 1);
        assert_eq!(ideas[0].name, "GhostGuard");
        assert!(client.prompts.lock().unwrap()[0].contains("No steady clients"));
    }

    #[tokio::test]
    async fn test_unparsable_ideas_degrade_to_empty() {
        let client = CannedClient::new(Ok("Sorry, I can't help with that.".to_string()));
        let service = IdeaService::new(client);
        let briefs = vec![PainPointBrief::from_text("slow invoicing")];
        let ideas = service
            .generate_ideas(&UserProfile::default(), &briefs)
            .await
            .unwrap();
        assert!(ideas.is_empty());
    }

    #[tokio::test]
    async fn test_no_pain_points_skips_call() {
        let client = CannedClient::new(Ok("[]".to_string()));
        let service = IdeaService::new(client.clone());
        let ideas = service.generate_ideas(&UserProfile::default(), &[]).await.unwrap();
        assert!(ideas.is_empty());
        assert!(client.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let client = CannedClient::new(Err(()));
        let service = IdeaService::new(client);
        let err = service.generate_niches(&UserProfile::default()).await.unwrap_err();
        assert!(matches!(err, LlmError::Unauthorized { .. }));
    }
}
