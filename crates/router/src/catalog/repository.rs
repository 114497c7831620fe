//! `PostgreSQL`-backed catalog queries.
//!
//! All queries are parameterized, read-only, single-statement selects. The
//! pool is the only shared resource and is passed explicitly; the repository
//! never holds global state.

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::{Catalog, CatalogError, Product};

const PRODUCT_COLUMNS: &str = "id, name, description, image, price";

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Normalize a user-supplied filter value for case-insensitive matching.
///
/// Phone brands and model names are stored lower-cased in the catalog.
#[must_use]
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Map a result set to the executor contract: zero rows are an error, not an
/// empty success.
fn require_rows(rows: Vec<Product>) -> Result<Vec<Product>, CatalogError> {
    if rows.is_empty() {
        Err(CatalogError::NoResults)
    } else {
        Ok(rows)
    }
}

/// Repository for catalog lookups.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch every row of one product table.
    async fn fetch_all(&self, table: &str) -> Result<Vec<Product>, CatalogError> {
        // `table` is one of three static names, never user input.
        let rows = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM {table}"
        ))
        .fetch_all(self.pool)
        .await?;

        require_rows(rows)
    }
}

impl Catalog for CatalogRepository<'_> {
    async fn all_air_conditioners(&self) -> Result<Vec<Product>, CatalogError> {
        self.fetch_all("ac").await
    }

    async fn all_televisions(&self) -> Result<Vec<Product>, CatalogError> {
        self.fetch_all("tv").await
    }

    async fn all_phones(&self) -> Result<Vec<Product>, CatalogError> {
        self.fetch_all("phone").await
    }

    async fn phones_by_brand(&self, brand: &str) -> Result<Vec<Product>, CatalogError> {
        let rows = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM phone WHERE category = $1"
        ))
        .bind(normalize(brand))
        .fetch_all(self.pool)
        .await?;

        require_rows(rows)
    }

    async fn phone_model(
        &self,
        model_name: &str,
        brand: &str,
    ) -> Result<Vec<Product>, CatalogError> {
        let rows = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM phone WHERE category = $1 AND name = $2"
        ))
        .bind(normalize(brand))
        .bind(normalize(model_name))
        .fetch_all(self.pool)
        .await?;

        require_rows(rows)
    }
}
