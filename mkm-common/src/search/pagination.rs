//! Pagination arithmetic shared by search and catalog listings

/// Page window over a match set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number used (1-indexed, at least 1)
    pub page: usize,
    /// Total number of pages: `ceil(total / page_size)`
    pub pages: usize,
    /// First index of the slice
    pub offset: usize,
    /// One past the last index of the slice
    pub end: usize,
}

/// Window for `requested_page` over `total` items
///
/// Pages past the end produce an empty window (`offset == end == total`); they are
/// not clamped to the last page. A page below 1 is read as page 1 and a zero page
/// size as 1.
///
/// # Examples
/// ```
/// use mkm_common::search::paginate;
///
/// // 45 matches, 20 per page = 3 pages (20 + 20 + 5)
/// let p = paginate(45, 3, 20);
/// assert_eq!(p.pages, 3);
/// assert_eq!((p.offset, p.end), (40, 45));
/// ```
pub fn paginate(total: usize, requested_page: usize, page_size: usize) -> Pagination {
    let page_size = page_size.max(1);
    let page = requested_page.max(1);
    let pages = total.div_ceil(page_size);
    let offset = (page - 1).saturating_mul(page_size).min(total);
    let end = offset.saturating_add(page_size).min(total);

    Pagination {
        page,
        pages,
        offset,
        end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_normal() {
        let p = paginate(250, 2, 100);
        assert_eq!(p.page, 2);
        assert_eq!(p.pages, 3);
        assert_eq!(p.offset, 100);
        assert_eq!(p.end, 200);
    }

    #[test]
    fn test_pagination_last_page() {
        let p = paginate(250, 3, 100);
        assert_eq!(p.offset, 200);
        assert_eq!(p.end, 250);
    }

    #[test]
    fn test_pagination_past_end_is_empty() {
        let p = paginate(150, 99, 100);
        assert_eq!(p.pages, 2);
        assert_eq!(p.offset, 150);
        assert_eq!(p.end, 150);
    }

    #[test]
    fn test_pagination_out_of_bounds_low() {
        let p = paginate(150, 0, 100);
        assert_eq!(p.page, 1);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn test_pagination_empty() {
        let p = paginate(0, 1, 20);
        assert_eq!(p.pages, 0);
        assert_eq!((p.offset, p.end), (0, 0));
    }

    #[test]
    fn test_pagination_exact_page_boundary() {
        let p = paginate(200, 2, 100);
        assert_eq!(p.pages, 2);
        assert_eq!(p.end, 200);
    }

    #[test]
    fn test_pagination_zero_page_size() {
        let p = paginate(3, 1, 0);
        assert_eq!(p.pages, 3);
        assert_eq!((p.offset, p.end), (0, 1));
    }

    #[test]
    fn test_pagination_huge_page_does_not_overflow() {
        let p = paginate(10, usize::MAX, usize::MAX);
        assert_eq!((p.offset, p.end), (10, 10));
    }
}
