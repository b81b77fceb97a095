use crate::db::search::params::{PageRequest, SortParam};
use serde::{Deserialize, Serialize};

/// Page envelope returned by every search.
///
/// `items.len() <= page_size` and `total_elements >= items.len()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_elements: i64,
    pub page_number: usize,
    pub page_size: usize,
    pub sort: Vec<SortParam>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_elements: i64, request: &PageRequest) -> Self {
        debug_assert!(items.len() <= request.size);
        debug_assert!(total_elements >= items.len() as i64);
        Self {
            items,
            total_elements,
            page_number: request.page,
            page_size: request.size,
            sort: request.sort.clone(),
        }
    }

    pub fn empty(total_elements: i64, request: &PageRequest) -> Self {
        Self::new(Vec::new(), total_elements, request)
    }

    pub fn total_pages(&self) -> i64 {
        if self.page_size == 0 {
            return 0;
        }
        let size = self.page_size as i64;
        (self.total_elements + size - 1) / size
    }
}
