use serde::Serialize;

use crate::domain::search::{CurrentSection, PaginationMeta, TotalSection};

/// Position of the requested page within a result set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    /// 0-based index of the page actually served.
    pub current: u64,
    /// Documents to skip before the served page.
    pub skip: u64,
    /// Documents per page.
    pub limit: u64,
    /// Pages in the entire result.
    pub page_count: u64,
    /// Documents in the entire result.
    pub total: u64,
}

impl PageWindow {
    /// Computes the window for a 1-based `page` over `total` documents.
    ///
    /// Pages below one select the first page and pages past the end select
    /// the last one. An empty result always serves the first page.
    pub fn new(total: u64, page: i64, limit: u64) -> Self {
        let limit = limit.max(1);
        let page_count = total.div_ceil(limit);

        let page = page.saturating_sub(1);

        let current = if page < 0 || page_count == 0 {
            0
        } else if page as u64 >= page_count {
            page_count - 1
        } else {
            page as u64
        };

        Self {
            current,
            skip: current.saturating_mul(limit),
            limit,
            page_count,
            total,
        }
    }

    /// Builds the pagination meta block for a page holding `count` documents.
    pub fn meta(&self, count: usize) -> PaginationMeta {
        PaginationMeta {
            current: CurrentSection {
                count,
                page: self.current + 1,
                limit: self.limit,
            },
            total: TotalSection {
                count: self.total,
                pages: self.page_count,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn middle_page_skips_previous_pages() {
        let window = PageWindow::new(8, 2, 3);

        assert_eq!(window.current, 1);
        assert_eq!(window.skip, 3);
        assert_eq!(window.page_count, 3);
    }

    #[test]
    fn last_partial_page() {
        let window = PageWindow::new(8, 3, 3);
        let meta = window.meta(2);

        assert_eq!(window.skip, 6);
        assert_eq!(
            meta.current,
            CurrentSection {
                count: 2,
                page: 3,
                limit: 3
            }
        );
        assert_eq!(meta.total, TotalSection { count: 8, pages: 3 });
    }

    #[test]
    fn non_positive_pages_select_the_first_page() {
        for page in [0, -1, -100, i64::MIN] {
            let window = PageWindow::new(8, page, 3);
            assert_eq!(window.skip, 0);
            assert_eq!(window.meta(3).current.page, 1);
        }
    }

    #[test]
    fn pages_past_the_end_clamp_to_the_last_page() {
        for page in [4, 5, 1000, i64::MAX] {
            let window = PageWindow::new(8, page, 3);
            assert_eq!(window.meta(2).current.page, 3);
            assert_eq!(window.skip, 6);
        }
    }

    #[test]
    fn empty_result_serves_the_first_page() {
        let window = PageWindow::new(0, 3, 3);

        assert_eq!(window.page_count, 0);
        assert_eq!(window.skip, 0);
        assert_eq!(window.meta(0).current.page, 1);
        assert_eq!(window.meta(0).total, TotalSection { count: 0, pages: 0 });
    }

    #[test]
    fn exact_multiple_has_no_trailing_page() {
        let window = PageWindow::new(9, 10, 3);

        assert_eq!(window.page_count, 3);
        assert_eq!(window.current, 2);
        assert_eq!(window.skip, 6);
    }
}
