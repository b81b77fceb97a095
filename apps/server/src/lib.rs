//! Catalog search service
//!
//! Paginated, AND/OR-combinable searches over the catalog's entities
//! (solutions, revisions, users, roles, catalogs, peers, tasks, artifacts,
//! publish requests) with:
//! - Per-entity field allowlists and typed comparisons
//! - ALL-of / ANY-of tag set membership
//! - Two-phase count-and-fetch paging
//! - Duplicate-coalescing paging for full object graphs

#![allow(
    clippy::too_many_arguments,      // Facet builders pass many optional facets
)]

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
