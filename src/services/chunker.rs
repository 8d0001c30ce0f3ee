//! 分块服务 - 业务能力层
//!
//! 只负责把有序的痛点文本按长度上限分组，不关心抽取和合并

use crate::config::Config;
use crate::models::content::{ContentChunk, ITEM_SEPARATOR};

/// 分块服务
///
/// - 总长度（以空行拼接后）不超过 `trigger_chars` 时不分块
/// - 否则贪心装箱：追加后超过 `max_chars` 就开启新分块
/// - 单个条目从不拆分，超长条目独占一个分块
#[derive(Debug, Clone, Copy)]
pub struct Chunker {
    trigger_chars: usize,
    max_chars: usize,
}

impl Chunker {
    pub const DEFAULT_TRIGGER_CHARS: usize = 8000;
    pub const DEFAULT_MAX_CHARS: usize = 6000;

    pub fn new(trigger_chars: usize, max_chars: usize) -> Self {
        Self {
            trigger_chars,
            max_chars,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.chunk_trigger_chars, config.chunk_max_chars)
    }

    /// 以空行拼接后的总长度（按字符计）
    pub fn joined_len(items: &[String]) -> usize {
        let separators = items.len().saturating_sub(1) * ITEM_SEPARATOR.len();
        items.iter().map(|item| item.chars().count()).sum::<usize>() + separators
    }

    /// 是否需要分块
    pub fn needs_chunking(&self, items: &[String]) -> bool {
        Self::joined_len(items) > self.trigger_chars
    }

    /// 拆分为分块
    ///
    /// 空输入返回空列表
    pub fn split(&self, items: &[String]) -> Vec<ContentChunk> {
        if items.is_empty() {
            return Vec::new();
        }

        if !self.needs_chunking(items) {
            return vec![ContentChunk {
                index: 0,
                text: items.join(ITEM_SEPARATOR),
                item_count: items.len(),
            }];
        }

        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut current_len = 0usize;
        let mut current_count = 0usize;

        for item in items {
            let item_len = item.chars().count();
            let appended_len = if current_count == 0 {
                item_len
            } else {
                current_len + ITEM_SEPARATOR.len() + item_len
            };

            if appended_len > self.max_chars && current_count > 0 {
                chunks.push(ContentChunk {
                    index: chunks.len(),
                    text: std::mem::take(&mut current),
                    item_count: current_count,
                });
                current.push_str(item);
                current_len = item_len;
                current_count = 1;
            } else {
                if current_count > 0 {
                    current.push_str(ITEM_SEPARATOR);
                }
                current.push_str(item);
                current_len = appended_len;
                current_count += 1;
            }
        }

        if current_count > 0 {
            chunks.push(ContentChunk {
                index: chunks.len(),
                text: current,
                item_count: current_count,
            });
        }

        chunks
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TRIGGER_CHARS, Self::DEFAULT_MAX_CHARS)
    }
}
