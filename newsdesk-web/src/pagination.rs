//! Pagination state for search results
//!
//! The `page` parameter of a request names the page being fetched. After
//! the fetch it is advanced by one (unless already on the last page) and
//! kept as the "next page"; the page actually shown is derived from it.

use thiserror::Error;

/// Page number parse failure
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("Invalid page number: {0:?}")]
    InvalidPage(String),
}

/// Parse the raw `page` query parameter
///
/// Absent or empty means page 1. Anything else must be a positive integer.
///
/// # Examples
/// ```
/// use newsdesk_web::pagination::parse_page;
///
/// assert_eq!(parse_page(None), Ok(1));
/// assert_eq!(parse_page(Some("")), Ok(1));
/// assert_eq!(parse_page(Some("7")), Ok(7));
/// assert!(parse_page(Some("abc")).is_err());
/// ```
pub fn parse_page(raw: Option<&str>) -> Result<u32, PageError> {
    let raw = match raw {
        None | Some("") => return Ok(1),
        Some(raw) => raw,
    };

    match raw.parse::<u32>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(PageError::InvalidPage(raw.to_string())),
    }
}

/// Number of pages needed for `total_results` at `page_size` per page
///
/// A zero page size yields zero pages instead of dividing by zero.
pub fn total_pages(total_results: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total_results.div_ceil(u64::from(page_size))
}

/// Navigation state for one rendered result page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    /// Page offered by the "next" link
    pub next_page: u32,
    pub total_pages: u64,
}

impl PaginationState {
    /// Derive navigation state after fetching `requested_page`
    ///
    /// # Examples
    /// ```
    /// use newsdesk_web::pagination::PaginationState;
    ///
    /// // 95 results at 10 per page = 10 pages
    /// let p = PaginationState::new(3, 95, 10);
    /// assert_eq!(p.total_pages, 10);
    /// assert_eq!(p.next_page, 4);
    /// assert_eq!(p.current_page(), 3);
    ///
    /// // No advancing past the last page
    /// let p = PaginationState::new(10, 95, 10);
    /// assert!(p.is_last_page());
    /// assert_eq!(p.next_page, 10);
    /// ```
    pub fn new(requested_page: u32, total_results: u64, page_size: u32) -> Self {
        let mut state = Self {
            next_page: requested_page,
            total_pages: total_pages(total_results, page_size),
        };

        if !state.is_last_page() {
            state.next_page = state.next_page.saturating_add(1);
        }

        state
    }

    pub fn is_last_page(&self) -> bool {
        u64::from(self.next_page) >= self.total_pages
    }

    /// Page shown in the current response
    pub fn current_page(&self) -> u32 {
        if self.next_page == 1 {
            return self.next_page;
        }
        self.next_page - 1
    }

    /// 0 when on the first page
    pub fn previous_page(&self) -> u32 {
        self.current_page() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_matches_ceiling() {
        for page_size in 1..=25u32 {
            for total in 0..=300u64 {
                let expected = (total as f64 / page_size as f64).ceil() as u64;
                assert_eq!(
                    total_pages(total, page_size),
                    expected,
                    "total={} page_size={}",
                    total,
                    page_size
                );
            }
        }
    }

    #[test]
    fn test_total_pages_zero_page_size() {
        assert_eq!(total_pages(95, 0), 0);
    }

    #[test]
    fn test_total_pages_exact_boundary() {
        assert_eq!(total_pages(100, 10), 10);
        assert_eq!(total_pages(101, 10), 11);
        assert_eq!(total_pages(0, 10), 0);
    }

    #[test]
    fn test_first_page_advances() {
        let p = PaginationState::new(1, 95, 10);
        assert_eq!(p.next_page, 2);
        assert!(!p.is_last_page());
        assert_eq!(p.current_page(), 1);
        assert_eq!(p.previous_page(), 0);
    }

    #[test]
    fn test_last_page_does_not_advance() {
        let p = PaginationState::new(10, 95, 10);
        assert_eq!(p.total_pages, 10);
        assert!(p.is_last_page());
        assert_eq!(p.next_page, 10);
    }

    #[test]
    fn test_single_page_of_results() {
        let p = PaginationState::new(1, 7, 10);
        assert_eq!(p.total_pages, 1);
        assert!(p.is_last_page());
        assert_eq!(p.next_page, 1);
        assert_eq!(p.current_page(), 1);
        assert_eq!(p.previous_page(), 0);
    }

    #[test]
    fn test_no_results() {
        let p = PaginationState::new(1, 0, 10);
        assert_eq!(p.total_pages, 0);
        assert!(p.is_last_page());
        assert_eq!(p.current_page(), 1);
    }

    #[test]
    fn test_page_beyond_total_is_last() {
        let p = PaginationState::new(50, 95, 10);
        assert!(p.is_last_page());
        assert_eq!(p.next_page, 50);
    }

    #[test]
    fn test_is_last_page_iff_next_reaches_total() {
        for total in 0..=120u64 {
            for requested in 1..=15u32 {
                let p = PaginationState::new(requested, total, 10);
                assert_eq!(p.is_last_page(), u64::from(p.next_page) >= p.total_pages);
            }
        }
    }

    #[test]
    fn test_next_page_saturates_at_max() {
        // More upstream pages than a u32 can count
        let p = PaginationState::new(u32::MAX, u64::MAX, 1);
        assert!(!p.is_last_page());
        assert_eq!(p.next_page, u32::MAX);
        assert_eq!(p.current_page(), u32::MAX - 1);
    }

    #[test]
    fn test_current_page_derivation() {
        let first = PaginationState { next_page: 1, total_pages: 5 };
        assert_eq!(first.current_page(), 1);

        for n in 2..=20u32 {
            let p = PaginationState { next_page: n, total_pages: 30 };
            assert_eq!(p.current_page(), n - 1);
            assert_eq!(p.previous_page(), p.current_page() - 1);
        }
    }

    #[test]
    fn test_parse_page_defaults() {
        assert_eq!(parse_page(None), Ok(1));
        assert_eq!(parse_page(Some("")), Ok(1));
    }

    #[test]
    fn test_parse_page_rejects_invalid() {
        assert_eq!(
            parse_page(Some("abc")),
            Err(PageError::InvalidPage("abc".to_string()))
        );
        assert!(parse_page(Some("0")).is_err());
        assert!(parse_page(Some("-2")).is_err());
        assert!(parse_page(Some("1.5")).is_err());
    }
}
