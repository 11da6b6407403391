//! Pagination
//!
//! List endpoints accept [`PageQuery`] and answer with [`Page`].

use serde::{Deserialize, Serialize};

/// Default page size when `limit` is omitted
pub const DEFAULT_PAGE_LIMIT: i64 = 10;
/// Largest accepted page size
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Common list query parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<i64>,
    pub search: Option<String>,
    pub order_by: Option<String>,
    pub sort: Option<SortOrder>,
}

impl PageQuery {
    /// 1-based page, clamped to at least 1
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Page size, clamped to `1..=MAX_PAGE_LIMIT`
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .clamp(1, MAX_PAGE_LIMIT)
    }

    /// Rows to skip; saturates instead of overflowing on huge pages
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.limit())
    }

    /// Trimmed search term, `None` when blank
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Page metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: i64,
    pub total_data: i64,
    pub total_page: i64,
    pub total_per_page: i64,
}

/// One page of items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, query: &PageQuery, total_data: i64) -> Self {
        let limit = query.limit();
        let total_page = if total_data == 0 {
            0
        } else {
            (total_data + limit - 1) / limit
        };
        let total_per_page = items.len() as i64;
        Self {
            items,
            meta: PageMeta {
                page: query.page(),
                total_data,
                total_page,
                total_per_page,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_clamps() {
        let query = PageQuery {
            page: Some(0),
            limit: Some(500),
            ..Default::default()
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), MAX_PAGE_LIMIT);
        assert_eq!(query.offset(), 0);

        let query = PageQuery {
            page: Some(3),
            ..Default::default()
        };
        assert_eq!(query.limit(), DEFAULT_PAGE_LIMIT);
        assert_eq!(query.offset(), 20);
    }

    #[test]
    fn test_huge_page_saturates_offset() {
        let query = PageQuery {
            page: Some(i64::MAX),
            limit: Some(100),
            ..Default::default()
        };
        assert_eq!(query.page(), i64::MAX);
        assert_eq!(query.offset(), i64::MAX);
    }

    #[test]
    fn test_blank_search_is_none() {
        let query = PageQuery {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(query.search_term(), None);
    }

    #[test]
    fn test_page_meta() {
        let query = PageQuery {
            page: Some(2),
            limit: Some(10),
            ..Default::default()
        };
        let page = Page::new(vec![1, 2, 3], &query, 13);
        assert_eq!(
            page.meta,
            PageMeta {
                page: 2,
                total_data: 13,
                total_page: 2,
                total_per_page: 3,
            }
        );

        let empty: Page<i32> = Page::new(vec![], &PageQuery::default(), 0);
        assert_eq!(empty.meta.total_page, 0);
    }
}
