pub mod analysis;
pub mod content;
pub mod idea;
pub mod loaders;
pub mod profile;
pub mod subreddit;
pub mod thread;

pub use analysis::{Analysis, AnalysisResponse, Cluster, PainPoint, Summary};
pub use content::{ContentChunk, PainPointBatch, ITEM_SEPARATOR};
pub use idea::{BusinessIdea, Competition, Niche, PainPointBrief};
pub use loaders::{load_all_toml_files, load_toml_to_batch};
pub use profile::UserProfile;
pub use subreddit::{SubredditInfo, SubredditSuggestion, SUBREDDITS};
pub use thread::{ForumComment, ForumPost};
