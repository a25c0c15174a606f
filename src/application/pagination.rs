use crate::domain::entities::report::Report;
use crate::domain::error::DomainError;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct Page {
    /// Zero-based page index.
    pub index: usize,
    pub size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub items: Vec<Arc<Report>>,
}

impl Page {
    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    pub fn has_next(&self) -> bool {
        self.index + 1 < self.total_pages
    }
}

/// Slice `view` into pages of `size`. An index past the end gives an empty page.
pub fn paginate(view: &[Arc<Report>], index: usize, size: usize) -> Result<Page, DomainError> {
    if size == 0 {
        return Err(DomainError::InvalidInput("page size must be at least 1".into()));
    }
    let total_items = view.len();
    let total_pages = total_items.div_ceil(size);
    let start = index.saturating_mul(size).min(total_items);
    let end = start.saturating_add(size).min(total_items);

    Ok(Page {
        index,
        size,
        total_items,
        total_pages,
        items: view[start..end].to_vec(),
    })
}
