//! Dynamic predicate search over entity schemas.

pub mod engine;
pub(crate) mod escape;
pub mod facets;
pub mod filter;
pub mod membership;
pub mod params;
pub mod predicate;
pub mod query_builder;
pub mod schema;
pub mod sort;
