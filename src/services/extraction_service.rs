//! 痛点抽取服务 - 业务能力层
//!
//! 只负责"把一段内容交给模型抽取痛点"，返回原始文本；
//! 不解析、不合并，也不知道自己处理的是第几个分块

use std::sync::Arc;

use tracing::debug;

use crate::clients::CompletionClient;
use crate::error::ExtractionCallError;
use crate::services::prompts;

/// 痛点抽取服务
pub struct ExtractionService {
    client: Arc<dyn CompletionClient>,
}

impl ExtractionService {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// 构建带种子的抽取提示词
    pub fn build_prompt(content: &str, seed: u32) -> String {
        prompts::with_seed(&prompts::build_extraction_prompt(content), seed)
    }

    /// 对一段内容执行抽取
    ///
    /// # 参数
    /// - `label`: 分块标签（如 "Full Content"、"Part 2"），用于日志和错误信息
    /// - `content`: 分块文本
    ///
    /// # 返回
    /// 返回模型的原始输出；传输失败时返回带标签的 `ExtractionCallError`
    pub async fn extract(&self, label: &str, content: &str) -> Result<String, ExtractionCallError> {
        let seed = prompts::random_seed();
        let prompt = Self::build_prompt(content, seed);

        debug!(
            "发送抽取请求: {} (模型: {}, 种子: {}, 内容长度: {} 字符)",
            label,
            self.client.model_name(),
            seed,
            content.chars().count()
        );

        let response = self
            .client
            .complete(prompts::ANALYST_SYSTEM_MESSAGE, &prompt)
            .await
            .map_err(|source| ExtractionCallError {
                label: label.to_string(),
                source,
            })?;

        debug!("收到 {} 的响应，长度: {} 字符", label, response.chars().count());

        Ok(response)
    }
}
