//! Intent resolution via Gemini.
//!
//! Builds the fixed instruction prompt, calls `generateContent` with the
//! catalog tools declared, and interprets the model's answer as either a
//! tool call or a conversational reply. Classification quality is entirely
//! delegated to the model; the only local validation is allow-list matching,
//! which happens in the dispatcher.

use tracing::{info, instrument};

use crate::gemini::{
    Content, GeminiClient, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    GeminiError, ToolConfig,
};

use super::tools::{ToolCall, catalog_tools};

const TEMPERATURE: f32 = 0.2;

/// The resolver's decision for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The model selected a catalog tool.
    Call(ToolCall),
    /// The model answered conversationally.
    Reply(String),
}

/// Build the instruction prompt for one user query.
///
/// The prompt is the routing policy: it enumerates the five operations and
/// their triggering phrasings, pins the exact output shape for tool calls,
/// and tells the model to answer conversationally for greetings, unrelated
/// input, or ambiguous intent.
fn build_prompt(user_query: &str) -> String {
    format!(
        r#"You are an assistant for an e-commerce platform.

You must respond to the user's query in one of two ways:

1. Tool call - if the query is about products, use one of these tools:
   - Air conditioners -> "get_all_ac_data"
   - Televisions -> "get_all_tv_data"
   - All mobile phones -> "get_all_phones_data"
   - Phones of a specific brand (e.g. "show me all iphones", "show samsung phones",
     or simply the brand name is given) -> "get_particular_phone" with a brand parameter
   - A specific phone model (e.g. "show me samsung galaxy s23", "i want", "do you have",
     or simply the model name is given) -> "get_particular_model" with model_name and
     brand parameters

   Respond in this format, and only if applicable:
   {{"name": "tool_name", "args": {{}}}}
   Include parameters only for get_particular_phone ("brand") and
   get_particular_model ("model_name" and "brand").

2. Normal message - if the query is not asking about products or is a greeting,
   question, or anything unrelated (e.g. "hello", "how are you", "home"), just
   respond with a natural message instead of a tool call.

Do not attempt a tool call if the user's query is not clearly about one of the
product types above.

User query: "{user_query}""#
    )
}

/// Intent resolver delegating query classification to Gemini.
pub struct IntentResolver<'a> {
    gemini: &'a GeminiClient,
}

impl<'a> IntentResolver<'a> {
    /// Create a new intent resolver.
    #[must_use]
    pub const fn new(gemini: &'a GeminiClient) -> Self {
        Self { gemini }
    }

    /// Resolve a user query into a tool call or a free-text reply.
    ///
    /// The Gemini call is attempted exactly once.
    ///
    /// # Errors
    ///
    /// Returns an error if the Gemini call fails or returns no candidates.
    #[instrument(skip(self, user_query))]
    pub async fn resolve(&self, user_query: &str) -> Result<Resolution, GeminiError> {
        let request = GenerateContentRequest {
            contents: vec![Content::user_text(build_prompt(user_query))],
            tools: Some(vec![ToolConfig {
                function_declarations: catalog_tools(),
            }]),
            generation_config: Some(GenerationConfig {
                temperature: Some(TEMPERATURE),
                max_output_tokens: None,
            }),
        };

        let response = self.gemini.generate(request).await?;
        if response.candidates.is_empty() {
            return Err(GeminiError::EmptyResponse);
        }

        let resolution = interpret(&response);
        info!(
            resolution = match &resolution {
                Resolution::Call(call) => call.name.as_str(),
                Resolution::Reply(_) => "reply",
            },
            "query resolved"
        );
        Ok(resolution)
    }
}

/// Interpret a Gemini response as a tool call or a free-text reply.
///
/// Precedence: a native function call part wins; otherwise a JSON object
/// embedded in the text (optionally inside a ```json fence) that carries a
/// `name` field is treated as a tool call; anything else is a reply.
#[must_use]
pub fn interpret(response: &GenerateContentResponse) -> Resolution {
    if let Some(call) = response.function_call() {
        return Resolution::Call(ToolCall::from(call));
    }

    let text = response.text().unwrap_or_default();
    match extract_tool_call(&text) {
        Some(call) => Resolution::Call(call),
        None => Resolution::Reply(text),
    }
}

/// Extract a tool call from free text, if the text embeds one.
fn extract_tool_call(text: &str) -> Option<ToolCall> {
    let candidate = fenced_json(text).or_else(|| json_object_slice(text))?;
    let call: ToolCall = serde_json::from_str(candidate).ok()?;
    if call.name.is_empty() {
        return None;
    }
    Some(call)
}

/// The body of a ```json fenced code block, if present.
fn fenced_json(text: &str) -> Option<&str> {
    let start = text.find("```json")? + "```json".len();
    let rest = text.get(start..)?;
    let end = rest.find("```")?;
    rest.get(..end).map(str::trim)
}

/// The widest `{...}` slice of the text, to tolerate surrounding prose.
fn json_object_slice(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    text.get(start..=end)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn text_response(text: &str) -> GenerateContentResponse {
        serde_json::from_value(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] }
            }]
        }))
        .expect("deserialize")
    }

    #[test]
    fn test_prompt_mentions_every_tool() {
        let prompt = build_prompt("show me all tvs");
        for name in super::super::tools::ALLOWED_TOOLS {
            assert!(prompt.contains(name), "prompt missing {name}");
        }
        assert!(prompt.contains("show me all tvs"));
    }

    #[test]
    fn test_interpret_native_function_call() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{
                        "functionCall": {
                            "name": "get_particular_model",
                            "args": { "model_name": "galaxy s23", "brand": "samsung" }
                        }
                    }]
                }
            }]
        }))
        .expect("deserialize");

        let Resolution::Call(call) = interpret(&response) else {
            panic!("expected a tool call");
        };
        assert_eq!(call.name, "get_particular_model");
        assert_eq!(call.arg("brand"), Some("samsung"));
    }

    #[test]
    fn test_interpret_fenced_json() {
        let response = text_response(
            "```json\n{\"name\": \"get_all_tv_data\", \"args\": {}}\n```",
        );

        let Resolution::Call(call) = interpret(&response) else {
            panic!("expected a tool call");
        };
        assert_eq!(call.name, "get_all_tv_data");
        assert!(call.args.is_empty());
    }

    #[test]
    fn test_interpret_bare_json_with_prose() {
        let response = text_response(
            "Sure! {\"name\": \"get_particular_phone\", \"args\": {\"brand\": \"iphone\"}} there you go",
        );

        let Resolution::Call(call) = interpret(&response) else {
            panic!("expected a tool call");
        };
        assert_eq!(call.name, "get_particular_phone");
        assert_eq!(call.arg("brand"), Some("iphone"));
    }

    #[test]
    fn test_interpret_plain_text_is_reply() {
        let response = text_response("Hello! How can I help you today?");
        assert_eq!(
            interpret(&response),
            Resolution::Reply("Hello! How can I help you today?".to_string())
        );
    }

    #[test]
    fn test_interpret_json_without_name_is_reply() {
        let text = "{\"answer\": 42}";
        let response = text_response(text);
        assert_eq!(interpret(&response), Resolution::Reply(text.to_string()));
    }

    #[test]
    fn test_interpret_unparseable_braces_is_reply() {
        let text = "sets like {1, 2, 3} are not JSON";
        let response = text_response(text);
        assert_eq!(interpret(&response), Resolution::Reply(text.to_string()));
    }

    #[test]
    fn test_fenced_json_unterminated_fence() {
        assert!(fenced_json("```json\n{\"name\": \"x\"}").is_none());
    }
}
