/// One page of results together with pagination metadata.
///
/// Pages are zero-indexed. `total` counts items across all pages.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, page: u64, per_page: u64) -> Self {
        let total_pages = if per_page > 0 {
            total.div_ceil(per_page)
        } else {
            0
        };

        Self {
            items,
            total,
            page,
            per_page,
            total_pages,
        }
    }

    /// Converts every item while keeping the pagination metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_total_pages() {
        assert_eq!(Page::new(vec![1, 2], 21, 0, 10).total_pages, 3);
        assert_eq!(Page::new(vec![1], 20, 1, 10).total_pages, 2);
        assert_eq!(Page::<i32>::new(vec![], 0, 0, 10).total_pages, 0);
    }

    #[test]
    fn map_keeps_metadata() {
        let page = Page::new(vec![1, 2, 3], 13, 1, 3).map(|n| n * 10);

        assert_eq!(page.items, vec![10, 20, 30]);
        assert_eq!(page.total, 13);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 5);
    }
}
