/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use anyhow::{Context, Result};
use std::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 日志
///
/// 优先使用 `RUST_LOG`，否则根据 `verbose` 选择 debug 或 info 级别
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n痛点分析日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)
        .with_context(|| format!("无法写入日志文件: {}", log_file_path))?;
    Ok(())
}

/// 记录程序启动信息
///
/// # 参数
/// - `model_name`: 模型名称
/// - `max_concurrent`: 最大并发批次数
pub fn log_startup(model_name: &str, max_concurrent: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 痛点聚类分析模式");
    info!("🤖 模型: {}", model_name);
    info!("📊 最大并发批次数: {}", max_concurrent);
    info!("{}", "=".repeat(60));
}

/// 记录批次加载信息
pub fn log_batches_loaded(total: usize, max_concurrent: usize) {
    info!("✓ 找到 {} 个待处理的批次", total);
    info!("📋 最多同时处理 {} 个批次\n", max_concurrent);
}

/// 记录单个批次开始信息
pub fn log_batch_start(batch_index: usize, name: &str, item_count: usize) {
    info!("\n{}", "─".repeat(60));
    info!("[批次 {}] 📦 开始处理: {}", batch_index, name);
    info!("[批次 {}] 📄 痛点文本数量: {}", batch_index, item_count);
}

/// 记录单个批次完成信息
pub fn log_batch_complete(batch_index: usize, total_clusters: usize, output_path: &str) {
    info!(
        "[批次 {}] ✓ 完成: {} 个聚类，结果已写入 {}",
        batch_index, total_clusters, output_path
    );
}

/// 打印最终统计信息
///
/// # 参数
/// - `success`: 成功数量
/// - `failed`: 失败数量
/// - `total`: 总数
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(success: usize, failed: usize, total: usize, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", success, total);
    info!("❌ 失败: {}", failed);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（按字符计）
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("hello", 10), "hello");
        assert_eq!(truncate_text("hello world", 5), "hello...");
        assert_eq!(truncate_text("痛点分析日志", 2), "痛点...");
    }
}
