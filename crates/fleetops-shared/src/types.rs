//! Common types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

pub type EntityId = Uuid;

pub fn new_id() -> EntityId {
    Uuid::new_v4()
}

/// Page selection for list operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    /// Builds a pagination from raw query values, clamping into valid range.
    pub fn clamped(page: Option<u32>, per_page: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.per_page)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Pagination metadata attached to list responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub current_page: u32,
    pub per_page: u32,
    pub total: u64,
    pub last_page: u32,
    pub from: Option<u64>,
    pub to: Option<u64>,
}

impl PageMeta {
    pub fn new(pagination: &Pagination, total: u64) -> Self {
        let per_page = u64::from(pagination.per_page.max(1));
        let last_page = total.div_ceil(per_page).max(1) as u32;
        let from = (u64::from(pagination.page.max(1)) - 1) * per_page + 1;
        let to = (from + per_page - 1).min(total);
        let in_range = total > 0 && from <= total;
        Self {
            current_page: pagination.page,
            per_page: pagination.per_page,
            total,
            last_page,
            from: in_range.then_some(from),
            to: in_range.then_some(to),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_page_and_per_page() {
        let p = Pagination::clamped(Some(0), Some(1000));
        assert_eq!(p.page, 1);
        assert_eq!(p.per_page, MAX_PAGE_SIZE);

        let p = Pagination::clamped(None, None);
        assert_eq!(p.page, 1);
        assert_eq!(p.per_page, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn meta_last_page_is_ceiling_of_total_over_per_page() {
        let p = Pagination {
            page: 1,
            per_page: 15,
        };
        assert_eq!(PageMeta::new(&p, 45).last_page, 3);
        assert_eq!(PageMeta::new(&p, 46).last_page, 4);
        assert_eq!(PageMeta::new(&p, 1).last_page, 1);
    }

    #[test]
    fn meta_from_to_cover_the_current_window() {
        let p = Pagination {
            page: 2,
            per_page: 10,
        };
        let meta = PageMeta::new(&p, 25);
        assert_eq!(meta.from, Some(11));
        assert_eq!(meta.to, Some(20));

        let last = PageMeta::new(
            &Pagination {
                page: 3,
                per_page: 10,
            },
            25,
        );
        assert_eq!(last.from, Some(21));
        assert_eq!(last.to, Some(25));
    }

    #[test]
    fn meta_for_empty_result_set() {
        let meta = PageMeta::new(&Pagination::default(), 0);
        assert_eq!(meta.total, 0);
        assert_eq!(meta.last_page, 1);
        assert_eq!(meta.from, None);
        assert_eq!(meta.to, None);
    }

    #[test]
    fn offset_follows_page() {
        let p = Pagination {
            page: 3,
            per_page: 20,
        };
        assert_eq!(p.offset(), 40);
        assert_eq!(p.limit(), 20);
    }
}
