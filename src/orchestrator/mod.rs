//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度。
//!
//! ### `batch_processor` - 批量痛点分析处理器
//! - 管理应用生命周期（初始化、运行）
//! - 批量加载输入批次（Vec<PainPointBatch>）
//! - 控制并发数量（Semaphore）
//! - 持有模型客户端
//! - 写出结果文件并输出全局统计信息
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<PainPointBatch>)
//!     ↓
//! workflow::PainPointFlow (处理一个批次的痛点文本)
//!     ↓
//! services (能力层：chunker / extraction / parser / merger / ideas)
//!     ↓
//! clients (基础设施：CompletionClient)
//! ```

pub mod batch_processor;

pub use batch_processor::{App, BatchOutput, ProcessingStats};
