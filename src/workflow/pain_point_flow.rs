//! 痛点分析流程 - 流程层
//!
//! 核心职责：定义"一批痛点文本"的完整处理流程
//!
//! 流程顺序：
//! 1. 清洗输入（去空白、丢弃空条目）
//! 2. 总长度未超过阈值 → 单块路径：整体抽取一次 → 解析 → 汇总
//! 3. 超过阈值 → 多块路径：分块 → 逐块抽取、解析 → 合并 → 汇总
//!
//! 单个分块失败只让该分块贡献零个聚类，不影响其它分块；
//! 只有鉴权失败这类致命错误才会中止整个流程

use std::sync::Arc;

use futures::{stream, StreamExt, TryStreamExt};
use tracing::{debug, error, info, warn};

use crate::clients::CompletionClient;
use crate::config::Config;
use crate::error::{AppResult, ExtractionCallError};
use crate::models::analysis::{Analysis, Cluster};
use crate::models::content::ITEM_SEPARATOR;
use crate::services::{response_parser, Chunker, ClusterMerger, ExtractionService};
use crate::workflow::chunk_ctx::ChunkCtx;

/// 痛点分析流程
///
/// - 决定走单块还是多块路径
/// - 隔离单个分块的失败
/// - 不重试（重试由客户端负责）
pub struct PainPointFlow {
    chunker: Chunker,
    extraction: ExtractionService,
    max_concurrent_chunks: usize,
}

impl PainPointFlow {
    /// 创建新的痛点分析流程
    pub fn new(client: Arc<dyn CompletionClient>, config: &Config) -> Self {
        Self::with_chunker(
            client,
            Chunker::from_config(config),
            config.max_concurrent_chunks,
        )
    }

    /// 使用指定分块器创建流程
    ///
    /// `max_concurrent_chunks` 为 1 时逐块顺序调用
    pub fn with_chunker(
        client: Arc<dyn CompletionClient>,
        chunker: Chunker,
        max_concurrent_chunks: usize,
    ) -> Self {
        Self {
            chunker,
            extraction: ExtractionService::new(client),
            max_concurrent_chunks: max_concurrent_chunks.max(1),
        }
    }

    /// 运行流程
    ///
    /// # 返回
    /// - `Ok(Analysis)`: 包括零个聚类的情况（没有找到痛点不算错误）
    /// - `Err(AppError::Extraction)`: 仅在致命的模型错误时返回
    pub async fn run(&self, items: &[String]) -> AppResult<Analysis> {
        let items: Vec<String> = items
            .iter()
            .map(|item| item.trim())
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect();

        if items.is_empty() {
            warn!("⚠️ 没有可分析的内容，返回空结果");
            return Ok(Analysis::empty());
        }

        let total_chars = Chunker::joined_len(&items);
        let analysis = if self.chunker.needs_chunking(&items) {
            self.run_chunked(&items, total_chars).await?
        } else {
            self.run_single(&items, total_chars).await?
        };

        info!(
            "✓ 分析完成: {} 条内容 → {} 个聚类",
            items.len(),
            analysis.summary.total_clusters
        );

        Ok(analysis)
    }

    /// 单块路径
    async fn run_single(&self, items: &[String], total_chars: usize) -> AppResult<Analysis> {
        let ctx = ChunkCtx::full_content();
        info!("{} 🔍 内容长度 {} 字符，整体抽取", ctx, total_chars);

        let content = items.join(ITEM_SEPARATOR);
        let clusters = self.process_chunk(&content, &ctx).await?;

        Ok(ClusterMerger::merge(vec![clusters]))
    }

    /// 多块路径
    async fn run_chunked(&self, items: &[String], total_chars: usize) -> AppResult<Analysis> {
        let chunks = self.chunker.split(items);
        let total = chunks.len();

        info!(
            "📦 内容长度 {} 字符，拆分为 {} 个分块（并发数: {}）",
            total_chars, total, self.max_concurrent_chunks
        );

        // buffered 按输入顺序产出结果，合并顺序与分块顺序一致
        let per_chunk = stream::iter(chunks)
            .map(|chunk| {
                let ctx = ChunkCtx::part(chunk.index, total);
                debug!(
                    "{} 包含 {} 条内容，{} 字符",
                    ctx,
                    chunk.item_count,
                    chunk.char_len()
                );
                async move { self.process_chunk(&chunk.text, &ctx).await }
            })
            .buffered(self.max_concurrent_chunks)
            .try_collect::<Vec<Vec<Cluster>>>()
            .await?;

        Ok(ClusterMerger::merge(per_chunk))
    }

    /// 处理单个分块：抽取 → 解析
    ///
    /// 非致命的调用失败降级为零个聚类
    async fn process_chunk(
        &self,
        content: &str,
        ctx: &ChunkCtx,
    ) -> Result<Vec<Cluster>, ExtractionCallError> {
        match self.extraction.extract(&ctx.label, content).await {
            Ok(raw) => {
                let clusters = response_parser::parse_clusters(&raw);
                info!("{} ✓ 得到 {} 个聚类", ctx, clusters.len());
                Ok(clusters)
            }
            Err(e) if e.source.is_fatal() => {
                error!("{} ❌ 致命错误，中止分析: {}", ctx, e);
                Err(e)
            }
            Err(e) => {
                warn!("{} ⚠️ 抽取失败，该分块不贡献结果: {}", ctx, e);
                Ok(Vec::new())
            }
        }
    }
}
