//! Catalog Router - natural-language query routing for the product catalog.
//!
//! Accepts a free-text user query, asks Gemini whether it maps to one of the
//! five fixed catalog-lookup operations, and either runs the matching query
//! against `PostgreSQL` or passes the model's conversational reply through.
//!
//! # Request Lifecycle
//!
//! ```text
//! POST /query -> IntentResolver (Gemini) -> Dispatcher -> CatalogRepository
//!                                        \-> free-text reply passthrough
//! ```
//!
//! Every outcome, including failures, is reported to the caller as a single
//! JSON envelope: `{"msg": "success", "data": [...]}`, `{"error": "..."}` or
//! `{"tool": "..."}`.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod gemini;
pub mod router;
pub mod routes;
pub mod state;
