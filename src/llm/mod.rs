pub mod client;
pub mod service;
pub mod tools;

pub use client::LLMClient;
pub use client::{ReActConfig, ReActResponse};
pub use service::{CompletionRequest, GenerationService, Toolset};
