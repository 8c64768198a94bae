//! Navigation policies over a bounded collection.
//!
//! [`RandomAccess`] moves between fixed pages and can jump to any of them.
//! [`SequentialAccess`] moves by single item or by a page worth of items,
//! without aligning to page boundaries. Both wrap around at the ends.

use super::{circular, DomainError, PageIndexList};
use std::ops::Range;

/// Notification of a move: the new 1-based page, or the new 0-based item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Moved {
    Page(usize),
    Item(usize),
}

pub trait Navigate {
    /// Supply the current size of the collection and of a page.
    fn bind(&mut self, items_count: usize, page_length: usize) -> Result<(), DomainError>;

    fn prev(&mut self) -> Result<Moved, DomainError>;

    fn next(&mut self) -> Result<Moved, DomainError>;

    /// Whether the items make up more than one page.
    fn is_paginable(&self) -> bool;

    fn position(&self) -> Moved;
}

fn stride(page_length: usize) -> isize {
    isize::try_from(page_length).unwrap_or(isize::MAX)
}

#[derive(Debug, Clone)]
pub struct RandomAccess {
    current_page: usize,
    items_count: usize,
    page_length: usize,
    pages: PageIndexList,
}

impl Default for RandomAccess {
    fn default() -> Self {
        Self {
            current_page: 1,
            items_count: 0,
            page_length: 0,
            pages: PageIndexList::default(),
        }
    }
}

impl RandomAccess {
    pub fn new() -> Self {
        Self::default()
    }

    fn index(&self) -> usize {
        self.current_page.saturating_sub(1)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn pages(&self) -> &PageIndexList {
        &self.pages
    }

    /// Jump to `page`, wrapping when it lies beyond the last one.
    pub fn go_to(&mut self, page: usize) -> Result<Moved, DomainError> {
        let index = stride(page).saturating_sub(1);
        self.current_page = circular::set_position(index, self.pages.len())? + 1;
        Ok(self.moved())
    }

    /// Indexes of the items on the current page.
    pub fn items(&self) -> Range<usize> {
        let start = self.index().saturating_mul(self.page_length);
        let end = start.saturating_add(self.page_length).min(self.items_count);
        start.min(end)..end
    }

    fn moved(&self) -> Moved {
        log::debug!("Page changed to {}", self.current_page);
        Moved::Page(self.current_page)
    }
}

impl Navigate for RandomAccess {
    fn bind(&mut self, items_count: usize, page_length: usize) -> Result<(), DomainError> {
        self.pages.recompute(items_count, page_length)?;
        self.items_count = items_count;
        self.page_length = page_length;

        if self.pages.is_empty() {
            self.current_page = 1;
        } else if self.current_page > self.pages.len() {
            self.go_to(self.current_page)?;
        }
        Ok(())
    }

    fn prev(&mut self) -> Result<Moved, DomainError> {
        // current_page is 1-based, the arithmetic is not
        self.current_page = circular::move_back_by_one(self.index(), self.pages.len())? + 1;
        Ok(self.moved())
    }

    fn next(&mut self) -> Result<Moved, DomainError> {
        self.current_page = circular::move_forward_by_one(self.index(), self.pages.len())? + 1;
        Ok(self.moved())
    }

    fn is_paginable(&self) -> bool {
        self.items_count > self.page_length
    }

    fn position(&self) -> Moved {
        Moved::Page(self.current_page)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SequentialAccess {
    current_item: usize,
    page_length: usize,
    items_count: usize,
}

impl SequentialAccess {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_item(&self) -> usize {
        self.current_item
    }

    pub fn set_item(&mut self, item: usize) -> Result<Moved, DomainError> {
        self.current_item = circular::set_position(stride(item), self.items_count)?;
        Ok(self.moved())
    }

    /// Move back by a whole page length.
    pub fn rewind(&mut self) -> Result<Moved, DomainError> {
        self.current_item = circular::move_back_by_many(
            stride(self.page_length),
            self.current_item,
            self.items_count,
        )?;
        Ok(self.moved())
    }

    /// Move forward by a whole page length.
    pub fn fast_forward(&mut self) -> Result<Moved, DomainError> {
        self.current_item = circular::move_forward_by_many(
            stride(self.page_length),
            self.current_item,
            self.items_count,
        )?;
        Ok(self.moved())
    }

    /// Indexes of the items shown from the current one on, wrapping at the end.
    pub fn items(&self) -> impl Iterator<Item = usize> + '_ {
        let shown = self.page_length.min(self.items_count);
        (0..shown).filter_map(move |offset| {
            circular::move_forward_by_many(stride(offset), self.current_item, self.items_count)
                .ok()
        })
    }

    fn moved(&self) -> Moved {
        log::debug!("Item changed to {}", self.current_item);
        Moved::Item(self.current_item)
    }
}

impl Navigate for SequentialAccess {
    fn bind(&mut self, items_count: usize, page_length: usize) -> Result<(), DomainError> {
        if page_length == 0 {
            return Err(DomainError::ZeroPageLength);
        }
        self.items_count = items_count;
        self.page_length = page_length;

        if items_count == 0 {
            self.current_item = 0;
        } else if self.current_item >= items_count {
            self.set_item(self.current_item)?;
        }
        Ok(())
    }

    fn prev(&mut self) -> Result<Moved, DomainError> {
        self.current_item = circular::move_back_by_one(self.current_item, self.items_count)?;
        Ok(self.moved())
    }

    fn next(&mut self) -> Result<Moved, DomainError> {
        self.current_item = circular::move_forward_by_one(self.current_item, self.items_count)?;
        Ok(self.moved())
    }

    fn is_paginable(&self) -> bool {
        self.items_count > self.page_length
    }

    fn position(&self) -> Moved {
        Moved::Item(self.current_item)
    }
}

/// One of the two navigation policies, chosen by the caller.
#[derive(Debug, Clone)]
pub enum Navigator {
    RandomAccess(RandomAccess),
    SequentialAccess(SequentialAccess),
}

impl Navigator {
    pub fn random_access() -> Self {
        Self::RandomAccess(RandomAccess::new())
    }

    pub fn sequential_access() -> Self {
        Self::SequentialAccess(SequentialAccess::new())
    }

    fn inner(&self) -> &dyn Navigate {
        match self {
            Self::RandomAccess(nav) => nav,
            Self::SequentialAccess(nav) => nav,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Navigate {
        match self {
            Self::RandomAccess(nav) => nav,
            Self::SequentialAccess(nav) => nav,
        }
    }
}

impl Navigate for Navigator {
    fn bind(&mut self, items_count: usize, page_length: usize) -> Result<(), DomainError> {
        self.inner_mut().bind(items_count, page_length)
    }

    fn prev(&mut self) -> Result<Moved, DomainError> {
        self.inner_mut().prev()
    }

    fn next(&mut self) -> Result<Moved, DomainError> {
        self.inner_mut().next()
    }

    fn is_paginable(&self) -> bool {
        self.inner().is_paginable()
    }

    fn position(&self) -> Moved {
        self.inner().position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn random(items: usize, length: usize) -> RandomAccess {
        let mut nav = RandomAccess::new();
        nav.bind(items, length).unwrap();
        nav
    }

    fn sequential(items: usize, length: usize) -> SequentialAccess {
        let mut nav = SequentialAccess::new();
        nav.bind(items, length).unwrap();
        nav
    }

    #[test]
    fn random_access_wraps_both_ways() {
        let mut nav = random(25, 10);
        assert_eq!(nav.prev(), Ok(Moved::Page(3)));
        assert_eq!(nav.next(), Ok(Moved::Page(1)));
        assert_eq!(nav.next(), Ok(Moved::Page(2)));
    }

    #[test]
    fn random_access_jumps() {
        let mut nav = random(25, 10);
        assert_eq!(nav.go_to(3), Ok(Moved::Page(3)));
        assert_eq!(nav.items(), 20..25);
        assert_eq!(nav.go_to(4), Ok(Moved::Page(1)));
        assert_eq!(nav.items(), 0..10);
    }

    #[test]
    fn random_access_rebind_wraps_current_page() {
        let mut nav = random(50, 10);
        nav.go_to(5).unwrap();
        nav.bind(25, 10).unwrap();
        assert_eq!(nav.current_page(), 2);
        assert_eq!(nav.pages().as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn default_random_access_starts_on_first_page() {
        let mut nav = RandomAccess::default();
        assert_eq!(nav.items(), 0..0);

        nav.bind(25, 10).unwrap();
        assert_eq!(nav.position(), Moved::Page(1));
        assert_eq!(nav.items(), 0..10);
        assert_eq!(nav.prev(), Ok(Moved::Page(3)));
        assert_eq!(nav.next(), Ok(Moved::Page(1)));
    }

    #[test]
    fn random_access_without_items_refuses_to_move() {
        let mut nav = random(0, 10);
        assert_eq!(nav.next(), Err(DomainError::ZeroUpperBound));
        assert_eq!(nav.current_page(), 1);
    }

    #[test]
    fn sequential_moves_by_item_and_stride() {
        let mut nav = sequential(25, 10);
        assert_eq!(nav.prev(), Ok(Moved::Item(24)));
        assert_eq!(nav.next(), Ok(Moved::Item(0)));
        assert_eq!(nav.fast_forward(), Ok(Moved::Item(10)));
        assert_eq!(nav.fast_forward(), Ok(Moved::Item(20)));
        assert_eq!(nav.fast_forward(), Ok(Moved::Item(5)));
        assert_eq!(nav.rewind(), Ok(Moved::Item(20)));
    }

    #[test]
    fn sequential_window_wraps() {
        let mut nav = sequential(12, 5);
        nav.set_item(10).unwrap();
        assert_eq!(nav.items().collect::<Vec<_>>(), vec![10, 11, 0, 1, 2]);
    }

    #[rstest]
    #[case(10, 10, false)]
    #[case(3, 10, false)]
    #[case(0, 10, false)]
    #[case(11, 10, true)]
    fn paginable(#[case] items: usize, #[case] length: usize, #[case] expected: bool) {
        for mut nav in [Navigator::random_access(), Navigator::sequential_access()] {
            nav.bind(items, length).unwrap();
            assert_eq!(nav.is_paginable(), expected, "{nav:?}");
        }
    }

    #[test]
    fn navigator_delegates() {
        let mut nav = Navigator::sequential_access();
        nav.bind(3, 1).unwrap();
        assert_eq!(nav.next(), Ok(Moved::Item(1)));
        assert_eq!(nav.position(), Moved::Item(1));
    }
}
