//! # Idea Spark
//!
//! 从论坛痛点文本中抽取、聚类痛点，并据此生成商业点子
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Clients）
//! - `clients/` - 持有稀缺资源（模型连接），只暴露能力
//! - `CompletionClient` - 补全能力 trait，`OpenAiClient` 为其实现
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，每个服务只处理一个单元
//! - `Chunker` - 按长度上限分块
//! - `ExtractionService` - 对一段内容调用模型抽取痛点
//! - `response_parser` - 宽松解析模型输出
//! - `ClusterMerger` - 合并分块结果并计算汇总
//! - `IdeaService` / `subreddit_service` / `thread_filter` - 点子生成、社区推荐、帖子筛选
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一批痛点文本"的完整处理流程
//! - `ChunkCtx` - 上下文封装（分块序号 + 标签）
//! - `PainPointFlow` - 流程编排（单块 / 多块 → 抽取 → 解析 → 合并）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量处理器，管理资源、并发和结果输出
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{CompletionClient, OpenAiClient};
pub use config::Config;
pub use error::{AppError, AppResult, ConfigError, ExtractionCallError, LlmError};
pub use models::{Analysis, AnalysisResponse, Cluster, PainPoint, Summary};
pub use orchestrator::{App, ProcessingStats};
pub use workflow::{ChunkCtx, PainPointFlow};
