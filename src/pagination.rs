/// Page selection applied to list queries (1-based page numbers).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Number of rows to skip before the requested page.
    pub fn offset(&self) -> i64 {
        ((self.page.max(1) - 1) * self.per_page) as i64
    }

    /// Maximum number of rows on the requested page.
    pub fn limit(&self) -> i64 {
        self.per_page as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_has_no_offset() {
        let page = Pagination {
            page: 1,
            per_page: 20,
        };
        assert_eq!(page.offset(), 0);
        assert_eq!(page.limit(), 20);
    }

    #[test]
    fn zero_page_is_treated_as_first() {
        let page = Pagination {
            page: 0,
            per_page: 10,
        };
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn later_pages_skip_previous_rows() {
        let page = Pagination {
            page: 3,
            per_page: 10,
        };
        assert_eq!(page.offset(), 20);
    }
}
