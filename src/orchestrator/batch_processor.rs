//! 批量痛点分析处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量输入的处理和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：校验配置、初始化日志文件、创建模型客户端
//! 2. **批量加载**：扫描并加载所有待处理的 TOML 批次（`Vec<PainPointBatch>`）
//! 3. **并发控制**：使用 Semaphore 限制同时处理的批次数量
//! 4. **结果输出**：每个批次写出一个 JSON 文件，文件名冲突时追加序号
//! 5. **全局统计**：汇总所有批次的处理结果
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单个分块的细节
//! - **资源所有者**：唯一创建模型客户端的模块
//! - **向下委托**：委托 PainPointFlow 处理单个批次

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::clients::{CompletionClient, OpenAiClient};
use crate::config::Config;
use crate::error::{AppError, AppResult, LlmError};
use crate::models::{Analysis, BusinessIdea, PainPointBatch, SubredditSuggestion};
use crate::services::{idea_service, subreddit_service, thread_filter, IdeaService};
use crate::utils::logging;
use crate::workflow::PainPointFlow;

/// 单个批次的输出文件内容
///
/// 除 `analysis` 外的字段只在批次带画像时出现
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutput {
    pub analysis: Analysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ideas: Option<Vec<BusinessIdea>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub niches: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_subreddits: Option<Vec<SubredditSuggestion>>,
}

/// 处理统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingStats {
    pub success: usize,
    pub failed: usize,
    pub total: usize,
}

/// 应用主结构
pub struct App {
    config: Arc<Config>,
    flow: Arc<PainPointFlow>,
    idea_service: Arc<IdeaService>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        config.validate()?;

        // 初始化日志文件
        logging::init_log_file(&config.output_log_file)?;
        logging::log_startup(&config.llm_model_name, config.max_concurrent_batches);

        let client: Arc<dyn CompletionClient> = Arc::new(OpenAiClient::new(&config));
        Ok(Self::with_client(config, client))
    }

    /// 使用指定客户端创建应用（不做校验，不写日志文件）
    pub fn with_client(config: Config, client: Arc<dyn CompletionClient>) -> Self {
        let flow = PainPointFlow::new(client.clone(), &config);
        let idea_service = IdeaService::new(client);

        Self {
            config: Arc::new(config),
            flow: Arc::new(flow),
            idea_service: Arc::new(idea_service),
        }
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<ProcessingStats> {
        // 加载所有待处理的批次
        let all_batches = self.load_batches().await?;

        if all_batches.is_empty() {
            warn!("⚠️ 没有找到待处理的TOML文件，程序结束");
            return Ok(ProcessingStats::default());
        }

        logging::log_batches_loaded(all_batches.len(), self.config.max_concurrent_batches);

        let stats = self.process_all_batches(all_batches).await?;

        logging::print_final_stats(
            stats.success,
            stats.failed,
            stats.total,
            &self.config.output_log_file,
        );

        Ok(stats)
    }

    /// 加载批次
    async fn load_batches(&self) -> AppResult<Vec<PainPointBatch>> {
        info!("\n📁 正在扫描待处理的批次...");
        crate::models::load_all_toml_files(&self.config.input_folder).await
    }

    /// 并发处理所有批次
    async fn process_all_batches(&self, all_batches: Vec<PainPointBatch>) -> Result<ProcessingStats> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_batches.max(1)));
        let mut stats = ProcessingStats {
            total: all_batches.len(),
            ..Default::default()
        };

        // 先统一分配输出路径，避免并发批次写同一个文件
        let paths = assign_output_paths(&self.config.output_folder, &all_batches);

        let mut handles = Vec::new();
        for (idx, (batch, path)) in all_batches.into_iter().zip(paths).enumerate() {
            let batch_index = idx + 1;
            let permit = semaphore.clone().acquire_owned().await?;

            let flow = self.flow.clone();
            let idea_service = self.idea_service.clone();
            let config = self.config.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                match process_batch(&flow, &idea_service, &config, batch, path, batch_index).await {
                    Ok(path) => Ok(path),
                    Err(e) => {
                        error!("[批次 {}] ❌ 处理过程中发生错误: {}", batch_index, e);
                        Err(e)
                    }
                }
            });
            handles.push((batch_index, handle));
        }

        // 等待所有任务完成
        for (batch_index, handle) in handles {
            match handle.await {
                Ok(Ok(_)) => stats.success += 1,
                Ok(Err(_)) => stats.failed += 1,
                Err(e) => {
                    error!("[批次 {}] 任务执行失败: {}", batch_index, e);
                    stats.failed += 1;
                }
            }
        }

        Ok(stats)
    }
}

/// 汇总批次中的痛点文本：直接给出的文本在前，筛选后的帖子其次，定向搜索的帖子最后
pub fn batch_items(batch: &PainPointBatch) -> Vec<String> {
    let mut items: Vec<String> = batch.pain_points.clone();
    let posts = thread_filter::select_relevant_posts(&batch.posts);
    items.extend(posts.iter().map(thread_filter::to_pain_point_text));
    let targeted = thread_filter::filter_targeted_titles(&batch.targeted_posts);
    items.extend(targeted.iter().map(thread_filter::to_pain_point_text));
    items
}

/// 批次名转为文件名：只保留字母、数字、`-` 和 `_`，其余替换为 `_`
///
/// 没有任何有效字符时使用 `batch`
pub fn output_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if stem.chars().all(|c| c == '_') {
        "batch".to_string()
    } else {
        stem
    }
}

/// 为每个批次分配互不相同的输出路径：`<output_folder>/<stem>.json`
///
/// 文件名按小写比较（兼容大小写不敏感的文件系统），
/// 冲突时追加批次序号 `<stem>-<n>.json`，序号仍冲突则继续递增
pub fn assign_output_paths(output_folder: &str, batches: &[PainPointBatch]) -> Vec<PathBuf> {
    let mut taken: HashSet<String> = HashSet::new();

    batches
        .iter()
        .enumerate()
        .map(|(idx, batch)| {
            let stem = output_stem(&batch.name);
            let mut file_stem = stem.clone();
            let mut suffix = idx + 1;
            while !taken.insert(file_stem.to_lowercase()) {
                file_stem = format!("{}-{}", stem, suffix);
                suffix += 1;
            }

            if file_stem != stem {
                warn!(
                    "[批次 {}] ⚠️ 输出文件名 {}.json 已被占用，改为 {}.json",
                    idx + 1,
                    stem,
                    file_stem
                );
            }
            Path::new(output_folder).join(format!("{}.json", file_stem))
        })
        .collect()
}

/// 可选的模型调用结果：致命错误让批次失败，其它错误跳过该部分
fn optional_llm<T>(batch_index: usize, what: &str, result: Result<T, LlmError>) -> AppResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_fatal() => Err(AppError::Llm(e)),
        Err(e) => {
            warn!("[批次 {}] ⚠️ {}失败，跳过: {}", batch_index, what, e);
            Ok(None)
        }
    }
}

/// 处理单个批次
async fn process_batch(
    flow: &PainPointFlow,
    idea_service: &IdeaService,
    config: &Config,
    batch: PainPointBatch,
    path: PathBuf,
    batch_index: usize,
) -> AppResult<PathBuf> {
    let items = batch_items(&batch);
    logging::log_batch_start(batch_index, &batch.name, items.len());

    let analysis = flow.run(&items).await?;

    let mut output = BatchOutput {
        suggested_subreddits: batch.profile.as_ref().map(subreddit_service::suggest),
        ..Default::default()
    };

    if let (Some(profile), true) = (&batch.profile, config.generate_ideas) {
        let briefs = idea_service::collect_briefs(&analysis, &items);
        output.ideas = optional_llm(
            batch_index,
            "点子生成",
            idea_service.generate_ideas(profile, &briefs).await,
        )?;
        output.niches = optional_llm(
            batch_index,
            "细分市场生成",
            idea_service.generate_niches(profile).await,
        )?;
    }

    let total_clusters = analysis.summary.total_clusters;
    output.analysis = analysis;
    write_output(&path, &output).await?;

    logging::log_batch_complete(batch_index, total_clusters, &path.display().to_string());
    Ok(path)
}

/// 写出 JSON 结果
async fn write_output(path: &Path, output: &BatchOutput) -> AppResult<()> {
    let json = serde_json::to_string_pretty(output)?;

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::file_write_failed(parent.display().to_string(), e))?;
    }

    tokio::fs::write(path, json)
        .await
        .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))
}
