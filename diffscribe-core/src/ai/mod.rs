// ai module - organises generation functionality into submodules

pub mod api;
pub mod message;
pub mod mock;
pub mod models;
pub mod pipeline;
pub mod prompts;

// re-export key public items for convenient access
pub use api::{ModelClient, ModelRequest, OpenRouterClient};
pub use message::{CommitMessage, Style, parse_commit_message};
pub use mock::generate_mock_commit_message;
pub use models::{PipelineShape, select_pipeline};
pub use pipeline::{GeneratedMessage, Generation, GenerationService};
