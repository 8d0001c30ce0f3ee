pub mod chunker;
pub mod cluster_merger;
pub mod extraction_service;
pub mod idea_service;
pub mod prompts;
pub mod response_parser;
pub mod subreddit_service;
pub mod thread_filter;

pub use chunker::Chunker;
pub use cluster_merger::ClusterMerger;
pub use extraction_service::ExtractionService;
pub use idea_service::IdeaService;
