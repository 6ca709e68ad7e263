//! Fixed-size page slicing with 1-based page numbers.
//!
//! The paginator does not clamp: keeping the page number inside
//! `[1, total_pages]` is the job of [`FilterState`](crate::FilterState).
//! A page outside that range is simply empty.

use std::num::NonZeroUsize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub number: usize,
    pub total_pages: usize,
}

impl<T> Page<'_, T> {
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    /// Previous/Next controls are only shown when there is more than one page.
    #[must_use]
    pub fn shows_controls(&self) -> bool {
        self.total_pages > 1
    }

    /// e.g. `"Page 2 of 3"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.number, self.total_pages)
    }
}

/// `ceil(len / page_size)`; zero for an empty list.
#[must_use]
pub fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get())
}

/// Slices `items[(page - 1) * size .. page * size]`, clipped to the list.
#[must_use]
pub fn paginate<T>(items: &[T], page_size: NonZeroUsize, page_number: usize) -> Page<'_, T> {
    let size = page_size.get();
    let start = page_number
        .checked_sub(1)
        .and_then(|index| index.checked_mul(size))
        .filter(|&start| start < items.len());

    let slice = match start {
        Some(start) => &items[start..items.len().min(start.saturating_add(size))],
        None => &items[..0],
    };

    Page {
        items: slice,
        number: page_number,
        total_pages: total_pages(items.len(), page_size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn forty_five_items_make_three_pages() {
        let items: Vec<u32> = (0..45).collect();
        let page = paginate(&items, size(20), 3);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items, &items[40..45]);
        assert!(page.has_previous());
        assert!(!page.has_next());
        assert_eq!(page.label(), "Page 3 of 3");
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let items: Vec<u32> = (0..45).collect();
        let page = paginate(&items, size(20), 4);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn page_zero_is_empty() {
        let items = [1, 2, 3];
        assert!(paginate(&items, size(2), 0).items.is_empty());
    }

    #[test]
    fn empty_list_has_zero_pages() {
        let items: [u8; 0] = [];
        let page = paginate(&items, size(20), 1);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
        assert!(!page.shows_controls());
    }

    #[test]
    fn huge_page_number_does_not_overflow() {
        let items = [1, 2, 3];
        assert!(paginate(&items, size(2), usize::MAX).items.is_empty());
    }

    #[test]
    fn pages_partition_the_list() {
        for len in 0..60usize {
            for page_size in 1..12usize {
                let items: Vec<usize> = (0..len).collect();
                let pages = total_pages(len, size(page_size));
                assert_eq!(pages, len.div_ceil(page_size));

                let rejoined: Vec<usize> = (1..=pages)
                    .flat_map(|n| paginate(&items, size(page_size), n).items.to_vec())
                    .collect();
                assert_eq!(rejoined, items, "len={len} size={page_size}");
            }
        }
    }
}
