//! Request DTOs shared across handlers

use serde::Deserialize;

use fleetops_core::repositories::ListQuery;
use fleetops_shared::types::Pagination;

/// Standard list query parameters: `page`, `per_page`, `search`.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
}

impl From<PageQuery> for ListQuery {
    fn from(query: PageQuery) -> Self {
        ListQuery::new(
            Pagination::clamped(query.page, query.per_page),
            query.search,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_search_becomes_none() {
        let query: ListQuery = PageQuery {
            page: Some(2),
            per_page: Some(10),
            search: Some("   ".into()),
        }
        .into();
        assert_eq!(query.pagination.page, 2);
        assert!(query.search.is_none());
    }
}
