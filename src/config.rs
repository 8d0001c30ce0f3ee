use crate::error::ConfigError;

/// 程序配置文件
///
/// 构造后不可变；需要新的凭据或参数时，重新构造 `Config` 和流程对象
#[derive(Clone, Debug)]
pub struct Config {
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    pub llm_temperature: f32,
    pub llm_top_p: f32,
    pub llm_max_tokens: u32,
    /// 单次调用超时（秒）
    pub llm_timeout_secs: u64,
    /// 传输层重试次数（不含首次调用）
    pub llm_max_retries: u32,
    // --- 分块配置 ---
    /// 总长度超过该值才启用分块
    pub chunk_trigger_chars: usize,
    /// 每个分块的软上限
    pub chunk_max_chars: usize,
    /// 同时处理的分块数量（1 表示顺序处理）
    pub max_concurrent_chunks: usize,
    // --- 批处理配置 ---
    /// 同时处理的批次数量
    pub max_concurrent_batches: usize,
    /// TOML 输入文件目录
    pub input_folder: String,
    /// JSON 结果输出目录
    pub output_folder: String,
    /// 是否在分析后生成商业点子
    pub generate_ideas: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4".to_string(),
            llm_temperature: 0.7,
            llm_top_p: 0.9,
            llm_max_tokens: 1000,
            llm_timeout_secs: 30,
            llm_max_retries: 3,
            chunk_trigger_chars: 8000,
            chunk_max_chars: 6000,
            max_concurrent_chunks: 1,
            max_concurrent_batches: 4,
            input_folder: "input_toml".to_string(),
            output_folder: "output_json".to_string(),
            generate_ideas: false,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            llm_api_key: std::env::var("OPENAI_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
            llm_temperature: parse_env("LLM_TEMPERATURE").unwrap_or(default.llm_temperature),
            llm_top_p: parse_env("LLM_TOP_P").unwrap_or(default.llm_top_p),
            llm_max_tokens: parse_env("LLM_MAX_TOKENS").unwrap_or(default.llm_max_tokens),
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS").unwrap_or(default.llm_timeout_secs),
            llm_max_retries: parse_env("LLM_MAX_RETRIES").unwrap_or(default.llm_max_retries),
            chunk_trigger_chars: parse_env("CHUNK_TRIGGER_CHARS").unwrap_or(default.chunk_trigger_chars),
            chunk_max_chars: parse_env("CHUNK_MAX_CHARS").unwrap_or(default.chunk_max_chars),
            max_concurrent_chunks: parse_env("MAX_CONCURRENT_CHUNKS").unwrap_or(default.max_concurrent_chunks),
            max_concurrent_batches: parse_env("MAX_CONCURRENT_BATCHES").unwrap_or(default.max_concurrent_batches),
            input_folder: std::env::var("INPUT_FOLDER").unwrap_or(default.input_folder),
            output_folder: std::env::var("OUTPUT_FOLDER").unwrap_or(default.output_folder),
            generate_ideas: parse_env("GENERATE_IDEAS").unwrap_or(default.generate_ideas),
            verbose_logging: parse_env("VERBOSE_LOGGING").unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }

    /// 校验配置
    ///
    /// 在构造任何流程对象之前调用；缺少 API 密钥属于配置错误，由调用方处理
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.llm_api_key.trim().is_empty() {
            return Err(ConfigError::MissingValue {
                var_name: "OPENAI_API_KEY".to_string(),
            });
        }
        if self.chunk_max_chars == 0 {
            return Err(ConfigError::InvalidValue {
                var_name: "CHUNK_MAX_CHARS".to_string(),
                reason: "必须大于 0".to_string(),
            });
        }
        if self.max_concurrent_chunks == 0 {
            return Err(ConfigError::InvalidValue {
                var_name: "MAX_CONCURRENT_CHUNKS".to_string(),
                reason: "必须大于 0".to_string(),
            });
        }
        if self.max_concurrent_batches == 0 {
            return Err(ConfigError::InvalidValue {
                var_name: "MAX_CONCURRENT_BATCHES".to_string(),
                reason: "必须大于 0".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(var_name: &str) -> Option<T> {
    std::env::var(var_name).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_chunk_bounds() {
        let config = Config::default();
        assert_eq!(config.chunk_trigger_chars, 8000);
        assert_eq!(config.chunk_max_chars, 6000);
        assert_eq!(config.max_concurrent_chunks, 1);
    }

    #[test]
    fn test_validate_requires_api_key() {
        let config = Config::default();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingValue { ref var_name }) if var_name == "OPENAI_API_KEY"
        ));

        let config = Config {
            llm_api_key: "sk-test".to_string(),
            ..Config::default()
        };
        tokio_test::assert_ok!(config.validate());
    }

    #[test]
    fn test_validate_rejects_zero_chunk_cap() {
        let config = Config {
            llm_api_key: "sk-test".to_string(),
            chunk_max_chars: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));

        let config = Config {
            llm_api_key: "sk-test".to_string(),
            max_concurrent_batches: 0,
            ..Config::default()
        };
        tokio_test::assert_err!(config.validate());
    }
}
