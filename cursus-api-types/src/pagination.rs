//! Pagination and sorting inputs shared by all list endpoints

use serde::{Deserialize, Serialize};

/// Fixed page size used by every list endpoint unless the caller overrides it
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Hard ceiling on the per-page item count
pub const MAX_PAGE_SIZE: u32 = 100;

/// Pagination input (1-based page number)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaginationInput {
    /// Page number (1-based)
    pub page: Option<u32>,
    /// Items per page
    pub limit: Option<u32>,
}

impl PaginationInput {
    /// Effective page, defaulting to the first
    pub fn get_page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Effective page size, clamped to the allowed maximum
    pub fn get_limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    /// Row offset: `(page - 1) * limit`
    pub fn get_offset(&self) -> u64 {
        u64::from(self.get_page() - 1) * u64::from(self.get_limit())
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Sort input for list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortInput {
    /// Field to sort by
    pub field: String,
    /// Sort direction, ascending when absent
    pub direction: Option<SortDirection>,
}

impl SortInput {
    pub fn get_direction(&self) -> SortDirection {
        self.direction.unwrap_or(SortDirection::Asc)
    }
}

/// Combined list input: pagination + sorting. Entity-specific filters
/// travel as typed filter structs next to the repository traits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListInput {
    pub pagination: Option<PaginationInput>,
    pub sort: Option<SortInput>,
}

impl ListInput {
    /// Effective pagination, defaulting to page 1 / 25 items
    pub fn get_pagination(&self) -> PaginationInput {
        self.pagination.clone().unwrap_or_default()
    }
}

/// Pagination metadata returned with every list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// Page that was returned (1-based)
    pub page: u32,
    /// Page size that was applied
    pub limit: u32,
    /// Total matching rows before pagination
    pub total: u64,
    /// Number of pages at this page size
    pub total_pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
    /// Row offset of the first returned item
    pub offset: u64,
}

impl PaginationMeta {
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            ((total + u64::from(limit) - 1) / u64::from(limit)) as u32
        };
        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_previous: page > 1,
            offset: u64::from(page.saturating_sub(1)) * u64::from(limit),
        }
    }
}

/// A page of items plus its pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> ListResponse<T> {
    pub fn new(items: Vec<T>, page: u32, limit: u32, total: u64) -> Self {
        Self {
            items,
            meta: PaginationMeta::new(page, limit, total),
        }
    }

    /// Map the item type, keeping the metadata
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> ListResponse<U> {
        ListResponse {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_arithmetic() {
        let input = PaginationInput {
            page: Some(3),
            limit: None,
        };
        assert_eq!(input.get_limit(), DEFAULT_PAGE_SIZE);
        assert_eq!(input.get_offset(), 50);
    }

    #[test]
    fn test_limit_is_clamped() {
        let input = PaginationInput {
            page: Some(1),
            limit: Some(500),
        };
        assert_eq!(input.get_limit(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_page_defaults_to_first() {
        let input = PaginationInput {
            page: Some(0),
            limit: Some(25),
        };
        assert_eq!(input.get_page(), 1);
        assert_eq!(input.get_offset(), 0);
    }

    #[test]
    fn test_pagination_meta() {
        let meta = PaginationMeta::new(2, 25, 51);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next);
        assert!(meta.has_previous);
        assert_eq!(meta.offset, 25);

        let empty = PaginationMeta::new(1, 25, 0);
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_next);
        assert!(!empty.has_previous);
    }
}
