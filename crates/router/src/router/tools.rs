//! Catalog tool definitions for Gemini function calling.
//!
//! Five fixed, read-only lookup operations. The same names double as the
//! dispatcher's allow-list; nothing outside this set is ever executed.

use serde::Deserialize;
use serde_json::json;

use crate::gemini::FunctionDeclaration;

/// Fetch all air conditioner products.
pub const GET_ALL_AC_DATA: &str = "get_all_ac_data";
/// Fetch all TV products.
pub const GET_ALL_TV_DATA: &str = "get_all_tv_data";
/// Fetch all phone products.
pub const GET_ALL_PHONES_DATA: &str = "get_all_phones_data";
/// Fetch phones of a specific brand.
pub const GET_PARTICULAR_PHONE: &str = "get_particular_phone";
/// Fetch a specific phone model of a brand.
pub const GET_PARTICULAR_MODEL: &str = "get_particular_model";

/// The fixed set of operation names the dispatcher will execute.
pub const ALLOWED_TOOLS: [&str; 5] = [
    GET_ALL_AC_DATA,
    GET_ALL_TV_DATA,
    GET_ALL_PHONES_DATA,
    GET_PARTICULAR_PHONE,
    GET_PARTICULAR_MODEL,
];

/// The model's tool-selection decision, parsed from a function call part or
/// from JSON embedded in its text reply.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ToolCall {
    /// Selected operation name. Must match the allow-list exactly.
    pub name: String,
    /// String arguments by parameter name; empty for parameterless tools.
    #[serde(default)]
    pub args: serde_json::Map<String, serde_json::Value>,
}

impl ToolCall {
    /// Look up a string argument by name.
    #[must_use]
    pub fn arg(&self, key: &str) -> Option<&str> {
        self.args.get(key).and_then(serde_json::Value::as_str)
    }
}

impl From<&crate::gemini::FunctionCall> for ToolCall {
    fn from(call: &crate::gemini::FunctionCall) -> Self {
        let args = match &call.args {
            serde_json::Value::Object(map) => map.clone(),
            _ => serde_json::Map::new(),
        };
        Self {
            name: call.name.clone(),
            args,
        }
    }
}

/// Get the list of catalog tools declared to Gemini.
#[must_use]
pub fn catalog_tools() -> Vec<FunctionDeclaration> {
    vec![
        FunctionDeclaration {
            name: GET_ALL_AC_DATA.to_string(),
            description: "Fetch all air conditioner products from the catalog.".to_string(),
            parameters: None,
        },
        FunctionDeclaration {
            name: GET_ALL_TV_DATA.to_string(),
            description: "Fetch all TV products from the catalog.".to_string(),
            parameters: None,
        },
        FunctionDeclaration {
            name: GET_ALL_PHONES_DATA.to_string(),
            description: "Fetch all phone products from the catalog.".to_string(),
            parameters: None,
        },
        FunctionDeclaration {
            name: GET_PARTICULAR_PHONE.to_string(),
            description: "Fetch phones of a specific brand (e.g. 'samsung', 'iphone')."
                .to_string(),
            parameters: Some(json!({
                "type": "object",
                "properties": {
                    "brand": {
                        "type": "string",
                        "description": "Phone brand, e.g. 'samsung'"
                    }
                },
                "required": ["brand"]
            })),
        },
        FunctionDeclaration {
            name: GET_PARTICULAR_MODEL.to_string(),
            description:
                "Fetch a specific phone model of a brand (e.g. 'samsung galaxy s23', 'samsung')."
                    .to_string(),
            parameters: Some(json!({
                "type": "object",
                "properties": {
                    "model_name": {
                        "type": "string",
                        "description": "Phone model name, e.g. 'galaxy s23'"
                    },
                    "brand": {
                        "type": "string",
                        "description": "Phone brand, e.g. 'samsung'"
                    }
                },
                "required": ["model_name", "brand"]
            })),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_tools_count() {
        assert_eq!(catalog_tools().len(), 5);
    }

    #[test]
    fn test_catalog_tools_match_allow_list() {
        let names: Vec<String> = catalog_tools().into_iter().map(|t| t.name).collect();
        for allowed in ALLOWED_TOOLS {
            assert!(names.contains(&allowed.to_string()), "missing {allowed}");
        }
    }

    #[test]
    fn test_parameterized_tools_declare_object_schemas() {
        for tool in catalog_tools() {
            if let Some(schema) = tool.parameters {
                assert_eq!(schema.get("type"), Some(&serde_json::json!("object")));
            }
        }
    }

    #[test]
    fn test_tool_call_arg_lookup() {
        let call: ToolCall = serde_json::from_str(
            r#"{"name": "get_particular_phone", "args": {"brand": "Samsung"}}"#,
        )
        .expect("deserialize");
        assert_eq!(call.arg("brand"), Some("Samsung"));
        assert_eq!(call.arg("model_name"), None);
    }

    #[test]
    fn test_tool_call_args_default_to_empty() {
        let call: ToolCall =
            serde_json::from_str(r#"{"name": "get_all_tv_data"}"#).expect("deserialize");
        assert!(call.args.is_empty());
    }

    #[test]
    fn test_tool_call_from_non_object_args() {
        let function_call = crate::gemini::FunctionCall {
            name: GET_ALL_AC_DATA.to_string(),
            args: serde_json::Value::Null,
        };
        let call = ToolCall::from(&function_call);
        assert_eq!(call.name, GET_ALL_AC_DATA);
        assert!(call.args.is_empty());
    }
}
