pub mod analysis;
pub mod args;
pub mod config;
pub mod dataset;
pub mod patterns;
pub mod pipeline;
pub mod plots;
pub mod stats;
pub mod utils;

pub use analysis::{calculate_word_counts, load_word_counts, save_word_counts, word_count};
pub use args::Args;
pub use config::ProjectPaths;
pub use dataset::{load_text, prepare_dataset, save_text, strip_headers};
pub use plots::plot_word_counts;
pub use stats::{AnalysisResult, FrequencyTable, WordCount};
