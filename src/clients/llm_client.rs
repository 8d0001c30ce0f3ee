//! LLM API 客户端 - 基础设施层
//!
//! 持有模型连接，只暴露"补全"能力
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 兼容 OpenAI API 的服务（自定义 API 端点和模型）
//! - 调用级超时和有限次数的重试在构造时一次性配置

use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::LlmError;

/// 补全能力
///
/// 流程层只依赖这个 trait，测试中可以替换为脚本化的实现
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// 发送系统消息和用户消息，返回模型输出的文本
    async fn complete(&self, system_message: &str, user_message: &str) -> Result<String, LlmError>;

    /// 模型名称（仅用于日志）
    fn model_name(&self) -> &str;
}

/// 采样参数
#[derive(Debug, Clone, Copy)]
struct SamplingParams {
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
}

/// OpenAI 兼容的补全客户端
pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    model_name: String,
    sampling: SamplingParams,
    timeout: Duration,
    max_retries: u32,
}

impl OpenAiClient {
    /// 创建新的 LLM 客户端
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_model_name.clone(),
            sampling: SamplingParams {
                temperature: config.llm_temperature,
                top_p: config.llm_top_p,
                max_tokens: config.llm_max_tokens,
            },
            timeout: Duration::from_secs(config.llm_timeout_secs),
            max_retries: config.llm_max_retries,
        }
    }

    /// 发送一次请求（不含重试）
    async fn send_once(
        &self,
        system_message: &str,
        user_message: &str,
    ) -> Result<String, LlmError> {
        let system_msg = ChatCompletionRequestSystemMessageArgs::default()
            .content(system_message)
            .build()
            .map_err(|e| LlmError::RequestBuildFailed {
                message: e.to_string(),
            })?;

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(|e| LlmError::RequestBuildFailed {
                message: e.to_string(),
            })?;

        let messages = vec![
            ChatCompletionRequestMessage::System(system_msg),
            ChatCompletionRequestMessage::User(user_msg),
        ];

        // 构建请求
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(self.sampling.temperature)
            .top_p(self.sampling.top_p)
            .max_tokens(self.sampling.max_tokens)
            .build()
            .map_err(|e| LlmError::RequestBuildFailed {
                message: e.to_string(),
            })?;

        // 调用 API（带超时）
        let response = tokio::time::timeout(self.timeout, self.client.chat().create(request))
            .await
            .map_err(|_| LlmError::Timeout {
                model: self.model_name.clone(),
                secs: self.timeout.as_secs(),
            })?
            .map_err(|e| classify_api_error(&self.model_name, &e.to_string()))?;

        // 提取响应内容
        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| LlmError::EmptyResponse {
                model: self.model_name.clone(),
            })?;

        Ok(content.trim().to_string())
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, system_message: &str, user_message: &str) -> Result<String, LlmError> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.chars().count());

        let mut attempt = 0;
        loop {
            match self.send_once(system_message, user_message).await {
                Ok(content) => {
                    debug!("LLM API 调用成功");
                    return Ok(content);
                }
                Err(e) if e.is_fatal() || attempt >= self.max_retries => {
                    warn!("LLM API 调用失败 (第 {} 次尝试): {}", attempt + 1, e);
                    return Err(e);
                }
                Err(e) => {
                    let delay = retry_delay(attempt);
                    warn!(
                        "LLM API 调用失败 (第 {} 次尝试): {}，{} 毫秒后重试",
                        attempt + 1,
                        e,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// 指数退避：500ms, 1s, 2s, ... 最多 8s
fn retry_delay(attempt: u32) -> Duration {
    let millis = 500u64.saturating_mul(1u64 << attempt.min(4));
    Duration::from_millis(millis)
}

/// 根据错误信息区分鉴权失败和其他调用失败
fn classify_api_error(model: &str, message: &str) -> LlmError {
    let lower = message.to_lowercase();
    let unauthorized = ["invalid_api_key", "incorrect api key", "unauthorized", "401"]
        .iter()
        .any(|marker| lower.contains(marker));

    if unauthorized {
        LlmError::Unauthorized {
            model: model.to_string(),
            message: message.to_string(),
        }
    } else {
        LlmError::ApiCallFailed {
            model: model.to_string(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_api_error() {
        assert!(matches!(
            classify_api_error("gpt-4", "Incorrect API key provided: sk-xxx"),
            LlmError::Unauthorized { .. }
        ));
        assert!(matches!(
            classify_api_error("gpt-4", "Rate limit reached for requests"),
            LlmError::ApiCallFailed { .. }
        ));
    }

    #[test]
    fn test_retry_delay_is_bounded() {
        assert_eq!(retry_delay(0), Duration::from_millis(500));
        assert_eq!(retry_delay(1), Duration::from_millis(1000));
        assert_eq!(retry_delay(4), Duration::from_millis(8000));
        assert_eq!(retry_delay(10), Duration::from_millis(8000));
    }

    /// 测试真实 LLM 调用
    ///
    /// 运行方式：
    /// ```bash
    /// OPENAI_API_KEY=sk-... cargo test test_complete_live -- --ignored --nocapture
    /// ```
    #[tokio::test]
    #[ignore]
    async fn test_complete_live() {
        let _ = tracing_subscriber::fmt::try_init();

        let config = Config::from_env();
        let client = OpenAiClient::new(&config);

        let response = client
            .complete("You are a concise assistant.", "Reply with the single word: ok")
            .await;

        match response {
            Ok(text) => {
                println!("LLM 响应: {}", text);
                assert!(!text.is_empty());
            }
            Err(e) => panic!("LLM 调用失败: {}", e),
        }
    }
}
