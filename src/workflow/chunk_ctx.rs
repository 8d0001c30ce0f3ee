//! 分块处理上下文
//!
//! 封装"我正在处理哪个批次的第几个分块"这一信息

use std::fmt::Display;

/// 单块路径使用的标签
pub const FULL_CONTENT_LABEL: &str = "Full Content";

/// 分块处理上下文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkCtx {
    /// 分块序号（从 0 开始）
    pub index: usize,

    /// 分块总数
    pub total: usize,

    /// 分块标签（"Full Content" 或 "Part N"）
    pub label: String,
}

impl ChunkCtx {
    /// 单块路径的上下文
    pub fn full_content() -> Self {
        Self {
            index: 0,
            total: 1,
            label: FULL_CONTENT_LABEL.to_string(),
        }
    }

    /// 多块路径中第 `index` 个分块的上下文，标签从 1 开始编号
    pub fn part(index: usize, total: usize) -> Self {
        Self {
            index,
            total,
            label: format!("Part {}", index + 1),
        }
    }
}

impl Display for ChunkCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} {}/{}]", self.label, self.index + 1, self.total)
    }
}
