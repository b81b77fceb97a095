//! Database layer - search engine and record stores

pub mod memory;
pub mod search;
pub mod store;
pub mod traits;

pub use memory::MemoryRecordStore;
pub use search::engine::SearchEngine;
pub use store::PostgresRecordStore;
pub use traits::{RecordStore, SearchQuery, Window};
