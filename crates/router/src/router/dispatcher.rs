//! Tool dispatch over the catalog.
//!
//! Validates the resolver's decision against the allow-list, invokes the
//! matching query executor, and converts every failure into an error
//! envelope. No failure from this path is raised to the caller.

use tracing::{error, instrument, warn};

use crate::catalog::{Catalog, Envelope};
use crate::gemini::{GeminiClient, GeminiError};

use super::resolver::{IntentResolver, Resolution};
use super::tools::{
    GET_ALL_AC_DATA, GET_ALL_PHONES_DATA, GET_ALL_TV_DATA, GET_PARTICULAR_MODEL,
    GET_PARTICULAR_PHONE, ToolCall,
};

/// Dispatcher executing allow-listed tool calls against a catalog.
pub struct Dispatcher<'a, C> {
    catalog: &'a C,
}

impl<'a, C: Catalog> Dispatcher<'a, C> {
    /// Create a new dispatcher.
    #[must_use]
    pub const fn new(catalog: &'a C) -> Self {
        Self { catalog }
    }

    /// Produce the final response for a resolved query.
    pub async fn dispatch(&self, resolution: Resolution) -> Envelope {
        match resolution {
            Resolution::Reply(text) => Envelope::reply(text),
            Resolution::Call(call) => self.execute(&call).await,
        }
    }

    /// Execute an allow-listed tool call.
    ///
    /// Unknown names are rejected before any catalog access; a missing
    /// required argument is rejected the same way.
    async fn execute(&self, call: &ToolCall) -> Envelope {
        let result = match call.name.as_str() {
            GET_ALL_AC_DATA => self.catalog.all_air_conditioners().await,
            GET_ALL_TV_DATA => self.catalog.all_televisions().await,
            GET_ALL_PHONES_DATA => self.catalog.all_phones().await,
            GET_PARTICULAR_PHONE => {
                let Some(brand) = call.arg("brand") else {
                    return Envelope::error("missing required argument: brand");
                };
                self.catalog.phones_by_brand(brand).await
            }
            GET_PARTICULAR_MODEL => {
                let Some(model_name) = call.arg("model_name") else {
                    return Envelope::error("missing required argument: model_name");
                };
                let Some(brand) = call.arg("brand") else {
                    return Envelope::error("missing required argument: brand");
                };
                self.catalog.phone_model(model_name, brand).await
            }
            unknown => {
                warn!(tool = %unknown, "rejected tool call outside the allow-list");
                return Envelope::error(format!("unknown tool: {unknown}"));
            }
        };

        if let Err(e) = &result {
            error!(tool = %call.name, error = %e, "catalog lookup failed");
        }
        Envelope::from(result)
    }
}

/// Build the error envelope for a failed resolver call.
///
/// Uses only information available at the failure site.
fn resolver_failure(e: &GeminiError) -> Envelope {
    Envelope::error(format!("assistant unavailable: {e}"))
}

/// Route one user query end to end: resolve intent, then dispatch.
///
/// Every outcome is an envelope; resolver faults are reported as error
/// envelopes carrying the failure's own message.
#[instrument(skip(gemini, catalog, user_query))]
pub async fn route_query<C: Catalog>(
    gemini: &GeminiClient,
    catalog: &C,
    user_query: &str,
) -> Envelope {
    let resolver = IntentResolver::new(gemini);
    match resolver.resolve(user_query).await {
        Ok(resolution) => Dispatcher::new(catalog).dispatch(resolution).await,
        Err(e) => {
            error!(error = %e, "intent resolution failed");
            resolver_failure(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use rust_decimal::Decimal;

    use crate::catalog::{CatalogError, Product};

    use super::*;

    /// In-memory catalog recording every lookup it receives.
    #[derive(Default)]
    struct FakeCatalog {
        calls: Mutex<Vec<String>>,
        phones: Vec<Product>,
    }

    impl FakeCatalog {
        fn with_phones(phones: Vec<Product>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                phones,
            }
        }

        fn record(&self, call: impl Into<String>) {
            self.calls.lock().expect("lock").push(call.into());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().expect("lock").clone()
        }

        fn respond(&self) -> Result<Vec<Product>, CatalogError> {
            if self.phones.is_empty() {
                Err(CatalogError::NoResults)
            } else {
                Ok(self.phones.clone())
            }
        }
    }

    impl Catalog for FakeCatalog {
        async fn all_air_conditioners(&self) -> Result<Vec<Product>, CatalogError> {
            self.record("ac");
            self.respond()
        }

        async fn all_televisions(&self) -> Result<Vec<Product>, CatalogError> {
            self.record("tv");
            self.respond()
        }

        async fn all_phones(&self) -> Result<Vec<Product>, CatalogError> {
            self.record("phones");
            self.respond()
        }

        async fn phones_by_brand(&self, brand: &str) -> Result<Vec<Product>, CatalogError> {
            self.record(format!("brand:{brand}"));
            self.respond()
        }

        async fn phone_model(
            &self,
            model_name: &str,
            brand: &str,
        ) -> Result<Vec<Product>, CatalogError> {
            self.record(format!("model:{model_name}:{brand}"));
            self.respond()
        }
    }

    fn product(id: i32) -> Product {
        Product {
            id,
            name: format!("product {id}"),
            description: String::new(),
            image: String::new(),
            price: Decimal::new(49_999, 2),
        }
    }

    fn call(name: &str, args: serde_json::Value) -> Resolution {
        Resolution::Call(
            serde_json::from_value(serde_json::json!({ "name": name, "args": args }))
                .expect("tool call"),
        )
    }

    #[tokio::test]
    async fn test_dispatch_returns_all_rows() {
        let catalog = FakeCatalog::with_phones(vec![product(1), product(2), product(3)]);
        let envelope = Dispatcher::new(&catalog)
            .dispatch(call("get_all_phones_data", serde_json::json!({})))
            .await;

        let Envelope::Success { msg, data } = envelope else {
            panic!("expected success");
        };
        assert_eq!(msg, "success");
        assert_eq!(data.len(), 3);
        assert_eq!(catalog.calls(), vec!["phones"]);
    }

    #[tokio::test]
    async fn test_dispatch_empty_table_is_error_envelope() {
        let catalog = FakeCatalog::default();
        let envelope = Dispatcher::new(&catalog)
            .dispatch(call("get_all_tv_data", serde_json::json!({})))
            .await;

        assert_eq!(envelope, Envelope::error("no data found in the catalog"));
        assert_eq!(catalog.calls(), vec!["tv"]);
    }

    #[tokio::test]
    async fn test_dispatch_unknown_tool_never_touches_catalog() {
        let catalog = FakeCatalog::with_phones(vec![product(1)]);
        let envelope = Dispatcher::new(&catalog)
            .dispatch(call("delete_all_ac_data", serde_json::json!({})))
            .await;

        assert_eq!(envelope, Envelope::error("unknown tool: delete_all_ac_data"));
        assert!(catalog.calls().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_missing_argument_never_touches_catalog() {
        let catalog = FakeCatalog::with_phones(vec![product(1)]);
        let envelope = Dispatcher::new(&catalog)
            .dispatch(call("get_particular_phone", serde_json::json!({})))
            .await;

        assert_eq!(envelope, Envelope::error("missing required argument: brand"));
        assert!(catalog.calls().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_forwards_both_model_arguments() {
        let catalog = FakeCatalog::with_phones(vec![product(7)]);
        let envelope = Dispatcher::new(&catalog)
            .dispatch(call(
                "get_particular_model",
                serde_json::json!({ "model_name": "Galaxy S23", "brand": "Samsung" }),
            ))
            .await;

        assert!(matches!(envelope, Envelope::Success { .. }));
        assert_eq!(catalog.calls(), vec!["model:Galaxy S23:Samsung"]);
    }

    #[tokio::test]
    async fn test_dispatch_reply_passes_through_untouched() {
        let catalog = FakeCatalog::with_phones(vec![product(1)]);
        let envelope = Dispatcher::new(&catalog)
            .dispatch(Resolution::Reply(
                "Hello! How can I help you today?".to_string(),
            ))
            .await;

        assert_eq!(
            envelope,
            Envelope::reply("Hello! How can I help you today?")
        );
        assert!(catalog.calls().is_empty());
    }

    #[tokio::test]
    async fn test_fenced_json_resolution_executes_exactly_once() {
        let response: crate::gemini::GenerateContentResponse =
            serde_json::from_value(serde_json::json!({
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [{ "text": "```json\n{\"name\": \"get_all_tv_data\", \"args\": {}}\n```" }]
                    }
                }]
            }))
            .expect("deserialize");

        let catalog = FakeCatalog::with_phones(vec![product(1)]);
        let envelope = Dispatcher::new(&catalog)
            .dispatch(crate::router::interpret(&response))
            .await;

        assert!(matches!(envelope, Envelope::Success { .. }));
        assert_eq!(catalog.calls(), vec!["tv"]);
    }

    #[test]
    fn test_resolver_failure_uses_the_failure_message() {
        let envelope = resolver_failure(&GeminiError::EmptyResponse);
        assert_eq!(
            envelope,
            Envelope::error("assistant unavailable: empty response: no candidates returned")
        );
    }
}
