//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::RouterConfig;
use crate::gemini::GeminiClient;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: RouterConfig,
    pool: PgPool,
    gemini: GeminiClient,
}

impl AppState {
    /// Build the application state.
    ///
    /// The Gemini client is constructed once here and reused across requests.
    #[must_use]
    pub fn new(config: RouterConfig, pool: PgPool) -> Self {
        let gemini = GeminiClient::new(config.gemini());
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                gemini,
            }),
        }
    }

    /// Returns the application configuration.
    #[must_use]
    pub fn config(&self) -> &RouterConfig {
        &self.inner.config
    }

    /// Returns the database pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Returns the Gemini client.
    #[must_use]
    pub fn gemini(&self) -> &GeminiClient {
        &self.inner.gemini
    }
}
