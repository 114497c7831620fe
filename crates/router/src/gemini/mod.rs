//! Gemini API integration for intent resolution.
//!
//! A thin client for the `generateContent` endpoint with function
//! declarations, used by the intent resolver to let the model either select
//! a catalog tool or answer conversationally.

mod client;
mod error;
mod types;

pub use client::GeminiClient;
pub use error::GeminiError;
pub use types::{
    Content, FunctionCall, FunctionDeclaration, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, Part, ToolConfig, UsageMetadata,
};
