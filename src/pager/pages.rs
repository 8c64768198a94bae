use super::DomainError;
use std::ops::Deref;

/// Number of pages needed for `item_count` items, the last one possibly short.
pub fn pages_count(item_count: usize, page_length: usize) -> Result<usize, DomainError> {
    if page_length == 0 {
        return Err(DomainError::ZeroPageLength);
    }
    Ok(item_count.div_ceil(page_length))
}

/// What [`PageIndexList::recompute`] did to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    /// Same number of pages, nothing touched.
    Unchanged,
    /// Pages `from..` were appended.
    Extended { from: usize },
    /// The collection shrank, the list was built again.
    Rebuilt,
}

/// The page numbers `1..=N` of a paged collection.
///
/// The list is only rebuilt when the number of pages goes down. When it grows
/// the missing numbers are appended, and when it stays the same the list is
/// left alone so renderers can skip it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageIndexList {
    pages: Vec<usize>,
}

impl PageIndexList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recompute(
        &mut self,
        item_count: usize,
        page_length: usize,
    ) -> Result<Recompute, DomainError> {
        let count = pages_count(item_count, page_length)?;
        let current = self.pages.len();

        let outcome = if count == current {
            Recompute::Unchanged
        } else if count < current {
            self.pages = (1..=count).collect();
            Recompute::Rebuilt
        } else {
            self.pages.extend(current + 1..=count);
            Recompute::Extended { from: current + 1 }
        };

        log::trace!("Pages list {current} -> {count}: {outcome:?}");

        Ok(outcome)
    }

    /// An empty list means there is nothing to paginate.
    pub fn is_paginable(&self) -> bool {
        !self.pages.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.pages
    }
}

impl Deref for PageIndexList {
    type Target = [usize];

    fn deref(&self) -> &Self::Target {
        &self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn list(item_count: usize, page_length: usize) -> PageIndexList {
        let mut pages = PageIndexList::new();
        pages.recompute(item_count, page_length).unwrap();
        pages
    }

    #[test]
    fn builds_from_empty() {
        assert_eq!(list(25, 10).as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn same_count_is_left_alone() {
        let mut pages = list(25, 10);
        let before = pages.as_ptr();

        assert_eq!(pages.recompute(25, 10), Ok(Recompute::Unchanged));
        assert_eq!(pages.recompute(30, 10), Ok(Recompute::Unchanged));
        assert_eq!(pages.as_slice(), &[1, 2, 3]);
        assert_eq!(pages.as_ptr(), before);
    }

    #[test]
    fn shrinking_rebuilds() {
        let mut pages = list(25, 10);
        assert_eq!(pages.recompute(5, 10), Ok(Recompute::Rebuilt));
        assert_eq!(pages.as_slice(), &[1]);
    }

    #[test]
    fn growing_appends() {
        let mut pages = list(25, 10);
        assert_eq!(pages.recompute(51, 10), Ok(Recompute::Extended { from: 4 }));
        assert_eq!(pages.as_slice(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn no_items_means_not_paginable() {
        let mut pages = list(25, 10);
        assert_eq!(pages.recompute(0, 10), Ok(Recompute::Rebuilt));
        assert!(pages.is_empty());
        assert!(!pages.is_paginable());
    }

    #[rstest]
    #[case(0, 10, 0)]
    #[case(1, 10, 1)]
    #[case(10, 10, 1)]
    #[case(11, 10, 2)]
    fn counts_pages(#[case] items: usize, #[case] length: usize, #[case] expected: usize) {
        assert_eq!(pages_count(items, length), Ok(expected));
    }

    #[test]
    fn zero_page_length_is_rejected() {
        assert_eq!(
            PageIndexList::new().recompute(3, 0),
            Err(DomainError::ZeroPageLength)
        );
    }
}
