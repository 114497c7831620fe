//! Types for the Gemini `generateContent` API.
//!
//! These types match the Generative Language API format for function calling.

use serde::{Deserialize, Serialize};

/// A conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// The role of the turn ("user" or "model").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// The parts of the turn.
    pub parts: Vec<Part>,
}

impl Content {
    /// Build a single-part user turn.
    #[must_use]
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part::Text { text: text.into() }],
        }
    }
}

/// A part within a content turn.
///
/// Variant order matters for untagged deserialization: a function call part
/// must be tried before the text part.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    /// Structured function call emitted by the model.
    FunctionCall {
        /// The call details.
        #[serde(rename = "functionCall")]
        function_call: FunctionCall,
    },
    /// Plain text.
    Text {
        /// The text content.
        text: String,
    },
}

/// A function call selected by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Name of the declared function.
    pub name: String,
    /// Arguments as a JSON object.
    #[serde(default)]
    pub args: serde_json::Value,
}

/// A function declaration the model may select.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    /// Name of the function.
    pub name: String,
    /// Description of what the function does.
    pub description: String,
    /// JSON Schema for the function's parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

/// Tool configuration wrapping function declarations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    /// The declared functions.
    #[serde(rename = "functionDeclarations")]
    pub function_declarations: Vec<FunctionDeclaration>,
}

/// Sampling configuration.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationConfig {
    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Maximum tokens to generate.
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    /// Conversation turns.
    pub contents: Vec<Content>,
    /// Available tools.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolConfig>>,
    /// Sampling configuration.
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// Response from `generateContent`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    /// Generated candidates (the API returns one unless configured otherwise).
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Token usage information.
    #[serde(rename = "usageMetadata")]
    pub usage_metadata: Option<UsageMetadata>,
}

impl GenerateContentResponse {
    /// The first function call in the first candidate, if any.
    #[must_use]
    pub fn function_call(&self) -> Option<&FunctionCall> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|part| match part {
                Part::FunctionCall { function_call } => Some(function_call),
                Part::Text { .. } => None,
            })
    }

    /// Concatenated text of the first candidate, if it has any text parts.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: Vec<&str> = parts
            .iter()
            .filter_map(|part| match part {
                Part::Text { text } => Some(text.as_str()),
                Part::FunctionCall { .. } => None,
            })
            .collect();

        if text.is_empty() {
            None
        } else {
            Some(text.concat())
        }
    }
}

/// A generated candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    /// Generated content.
    pub content: Option<Content>,
    /// Reason generation stopped (e.g. `STOP`, `MAX_TOKENS`).
    #[serde(rename = "finishReason")]
    pub finish_reason: Option<String>,
}

/// Token usage information.
#[derive(Debug, Clone, Deserialize)]
pub struct UsageMetadata {
    /// Number of prompt tokens.
    #[serde(rename = "promptTokenCount", default)]
    pub prompt_token_count: u32,
    /// Number of generated tokens.
    #[serde(rename = "candidatesTokenCount", default)]
    pub candidates_token_count: u32,
}
