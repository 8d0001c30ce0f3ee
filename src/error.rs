use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// LLM 服务错误
    #[error("LLM错误: {0}")]
    Llm(#[from] LlmError),
    /// 单个分块的抽取调用失败
    #[error("抽取错误: {0}")]
    Extraction(#[from] ExtractionCallError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 其他错误（用于包装第三方库错误）
    #[error("错误: {0}")]
    Other(String),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 必需的配置项缺失
    #[error("缺少配置项 {var_name}")]
    MissingValue { var_name: String },
    /// 配置值不合法
    #[error("配置项 {var_name} 不合法: {reason}")]
    InvalidValue { var_name: String, reason: String },
}

/// LLM 服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// 构建请求失败
    #[error("构建 LLM 请求失败: {message}")]
    RequestBuildFailed { message: String },
    /// API 调用失败（网络、限流、服务端错误）
    #[error("LLM API调用失败 (模型: {model}): {message}")]
    ApiCallFailed { model: String, message: String },
    /// 鉴权失败
    #[error("LLM 鉴权失败 (模型: {model}): {message}")]
    Unauthorized { model: String, message: String },
    /// 调用超时
    #[error("LLM 调用超时 (模型: {model}, {secs} 秒)")]
    Timeout { model: String, secs: u64 },
    /// 返回结果为空
    #[error("LLM返回结果为空 (模型: {model})")]
    EmptyResponse { model: String },
}

impl LlmError {
    /// 是否为不可恢复的错误
    ///
    /// 鉴权失败和请求构建失败对每个分块都会重复出现，流程应立即终止；
    /// 其他错误只影响当前分块
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            LlmError::Unauthorized { .. } | LlmError::RequestBuildFailed { .. }
        )
    }
}

/// 单个分块的抽取调用失败
#[derive(Debug, Error)]
#[error("分块 {label} 抽取失败: {source}")]
pub struct ExtractionCallError {
    /// 分块标签（如 "Part 2"）
    pub label: String,
    #[source]
    pub source: LlmError,
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Other(format!("JSON序列化失败: {}", err))
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 是否为不可恢复的错误
    pub fn is_fatal(&self) -> bool {
        match self {
            AppError::Llm(e) => e.is_fatal(),
            AppError::Extraction(e) => e.source.is_fatal(),
            AppError::Config(_) => true,
            _ => false,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
