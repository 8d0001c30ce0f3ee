pub mod chunk_ctx;
pub mod pain_point_flow;

pub use chunk_ctx::ChunkCtx;
pub use pain_point_flow::PainPointFlow;
