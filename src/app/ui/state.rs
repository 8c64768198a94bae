use crate::pager::circular;
use ratatui::widgets::TableState;

/// Circular row selection.
pub trait Paging {
    fn next(&mut self, total: usize);
    fn prev(&mut self, total: usize);
}

impl Paging for TableState {
    fn next(&mut self, total: usize) {
        let i = match self.selected() {
            Some(i) => circular::move_forward_by_one(i, total).ok(),
            None => (total > 0).then_some(0),
        };
        self.select(i);
    }

    fn prev(&mut self, total: usize) {
        let i = match self.selected() {
            Some(i) => circular::move_back_by_one(i, total).ok(),
            None => total.checked_sub(1),
        };
        self.select(i);
    }
}
