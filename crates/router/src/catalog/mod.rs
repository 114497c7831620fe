//! Catalog data model and the query executor seam.
//!
//! The catalog is three read-only `PostgreSQL` tables (`ac`, `tv`, `phone`)
//! with identically shaped rows; `phone` additionally carries a lower-cased
//! `category` column holding the brand. The [`Catalog`] trait is the seam the
//! dispatcher executes through, so tests can substitute an in-memory store.

pub mod repository;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use repository::{CatalogRepository, create_pool};

/// A catalog item as returned by every lookup operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    /// Unique product ID.
    pub id: i32,
    /// Product name (stored lower-cased for phones).
    pub name: String,
    /// Product description.
    pub description: String,
    /// Product image URL.
    pub image: String,
    /// Product price.
    pub price: Decimal,
}

/// Errors from the catalog store boundary.
///
/// These never escape to the HTTP caller as faults; the dispatcher converts
/// them into error envelopes.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The query executed but matched no rows.
    #[error("no data found in the catalog")]
    NoResults,
}

/// Read-only catalog lookup operations.
///
/// Implemented by [`CatalogRepository`] over `PostgreSQL` and by in-memory
/// fakes in tests. Every method returns at least one row or
/// [`CatalogError::NoResults`]; an empty success is never produced.
#[allow(async_fn_in_trait)]
pub trait Catalog {
    /// Fetch all air conditioner products.
    async fn all_air_conditioners(&self) -> Result<Vec<Product>, CatalogError>;

    /// Fetch all television products.
    async fn all_televisions(&self) -> Result<Vec<Product>, CatalogError>;

    /// Fetch all phone products.
    async fn all_phones(&self) -> Result<Vec<Product>, CatalogError>;

    /// Fetch phones of one brand (case-insensitive).
    async fn phones_by_brand(&self, brand: &str) -> Result<Vec<Product>, CatalogError>;

    /// Fetch a specific phone model of one brand (case-insensitive).
    async fn phone_model(&self, model_name: &str, brand: &str)
    -> Result<Vec<Product>, CatalogError>;
}

/// Caller-facing response envelope.
///
/// Exactly one of the three shapes is ever produced:
///
/// - `{"msg": "success", "data": [Product, ...]}`
/// - `{"error": "<message>"}`
/// - `{"tool": "<free-text reply>"}`
///
/// Zero matching rows are reported as an error envelope, never as a success
/// with an empty `data` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Envelope {
    /// Query executed and matched at least one row.
    Success {
        /// Always the literal `"success"`.
        msg: String,
        /// The matching products.
        data: Vec<Product>,
    },
    /// Query failed, matched nothing, or the tool call was rejected.
    Error {
        /// Human-readable failure message.
        error: String,
    },
    /// Conversational reply from the model, passed through untouched.
    Reply {
        /// The model's free-text response.
        tool: String,
    },
}

impl Envelope {
    /// Build a success envelope.
    #[must_use]
    pub fn success(data: Vec<Product>) -> Self {
        Self::Success {
            msg: "success".to_string(),
            data,
        }
    }

    /// Build an error envelope.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }

    /// Build a conversational reply envelope.
    pub fn reply(text: impl Into<String>) -> Self {
        Self::Reply { tool: text.into() }
    }
}

impl From<Result<Vec<Product>, CatalogError>> for Envelope {
    fn from(result: Result<Vec<Product>, CatalogError>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(e) => Self::error(e.to_string()),
        }
    }
}
