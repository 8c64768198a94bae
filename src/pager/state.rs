use super::{DomainError, PageCallbacks, PagerConfig};

/// Which controls of a pager may currently be used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub prev: bool,
    pub page: bool,
    pub next: bool,
}

impl Controls {
    pub const DISABLED: Self = Self {
        prev: false,
        page: false,
        next: false,
    };
}

/// Where the current page sits relative to the known bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Invalid,
    First,
    Interior,
    Last,
    Only,
}

/// Current page of a paged view, and what may be done from there.
///
/// The page may be out of range (or missing entirely, when it could not be
/// parsed); this is a regular state, reported through the callbacks. When no
/// maximum is known, the page right after the current one is taken as the
/// upper bound, so an unknown ceiling never invalidates a page nor blocks
/// moving forward.
#[derive(Debug)]
pub struct PageState {
    page: Option<i64>,
    page_length: usize,
    max: Option<i64>,
    changed: bool,
    controls: Controls,
    callbacks: PageCallbacks,
}

impl PageState {
    /// Create a new state. All controls start disabled until the first
    /// boundary is known.
    pub fn new(config: PagerConfig, callbacks: PageCallbacks) -> Result<Self, DomainError> {
        config.validate()?;

        Ok(Self {
            page: Some(config.page),
            page_length: config.page_length,
            max: config.max.filter(|max| *max >= 1),
            changed: false,
            controls: Controls::DISABLED,
            callbacks,
        })
    }

    pub fn page_number(&self) -> Option<i64> {
        self.page
    }

    pub fn page_length(&self) -> usize {
        self.page_length
    }

    pub fn set_page_length(&mut self, page_length: usize) -> Result<(), DomainError> {
        if page_length == 0 {
            return Err(DomainError::ZeroPageLength);
        }
        self.page_length = page_length;
        Ok(())
    }

    pub fn max(&self) -> Option<i64> {
        self.max
    }

    pub fn changed(&self) -> bool {
        self.changed
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    /// The declared maximum, or the page after the current one if there is none.
    pub fn effective_max(&self) -> Option<i64> {
        self.page
            .map(|page| self.max.unwrap_or_else(|| page.saturating_add(1)))
    }

    pub fn is_valid(&self) -> bool {
        match (self.page, self.effective_max()) {
            (Some(page), Some(max)) => page >= 1 && page <= max,
            _ => false,
        }
    }

    pub fn position(&self) -> Position {
        if !self.is_valid() {
            return Position::Invalid;
        }

        match (self.page, self.max) {
            (Some(1), Some(1)) => Position::Only,
            (Some(1), _) => Position::First,
            (Some(page), Some(max)) if page == max => Position::Last,
            _ => Position::Interior,
        }
    }

    /// Check the current page, update the controls and notify the callbacks.
    ///
    /// Returns whether the page was accepted.
    pub fn validate(&mut self) -> bool {
        self.controls = self.derive_controls();

        if self.is_valid() {
            self.changed = true;
            if let Some(page) = self.page {
                self.callbacks.valid(page);
            }
            true
        } else {
            log::warn!("Rejected page: {:?} (max: {:?})", self.page, self.max);
            self.callbacks.invalid(self.page);
            false
        }
    }

    /// Assign the page number, `None` standing for input which is not a number.
    pub fn set_page(&mut self, page: Option<i64>) -> bool {
        self.page = page;
        self.validate()
    }

    pub fn set_max(&mut self, max: Option<i64>) -> bool {
        self.max = max.filter(|max| *max >= 1);
        self.validate()
    }

    /// Step forward by one page, never beyond the declared maximum.
    ///
    /// Does nothing while the "next" control is disabled.
    pub fn next_page(&mut self) -> bool {
        if !self.controls.next {
            return false;
        }

        if let Some(page) = self.page {
            let next = page.saturating_add(1);
            if self.max.map_or(true, |max| next <= max) {
                self.page = Some(next);
            }
        }
        self.validate()
    }

    /// Step back by one page, never below the first one.
    ///
    /// Does nothing while the "prev" control is disabled.
    pub fn prev_page(&mut self) -> bool {
        if !self.controls.prev {
            return false;
        }

        if let Some(page) = self.page {
            let prev = page.saturating_sub(1);
            if prev >= 1 {
                self.page = Some(prev);
            }
        }
        self.validate()
    }

    /// Run `action` only if the current page is valid.
    pub fn run_if_valid<R>(&mut self, action: impl FnOnce(&mut Self) -> R) -> Option<R> {
        if self.validate() {
            Some(action(self))
        } else {
            None
        }
    }

    /// Read and clear the "changed" flag.
    pub fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }

    pub fn reset_changed(&mut self) {
        self.changed = false;
    }

    /// First page of a collection whose end is not known yet.
    pub fn to_first(&mut self) {
        self.page = Some(1);
        self.max = None;
        self.controls = Controls {
            prev: false,
            page: true,
            next: true,
        };
    }

    /// The current page becomes the last one.
    pub fn to_last(&mut self) {
        self.max = self.page.filter(|page| *page >= 1);
        self.controls = Controls {
            prev: true,
            page: true,
            next: false,
        };
    }

    /// The collection fits in a single page: nothing to navigate.
    pub fn to_only(&mut self) {
        self.page = Some(1);
        self.max = Some(1);
        self.controls = Controls::DISABLED;
    }

    /// Any other page, optionally moving to `page` first. The maximum is kept.
    pub fn to_other(&mut self, page: Option<i64>) {
        if let Some(page) = page {
            self.page = Some(page);
        }
        self.controls = Controls {
            page: true,
            ..self.derive_controls()
        };
    }

    fn derive_controls(&self) -> Controls {
        let (Some(page), Some(max)) = (self.page, self.effective_max()) else {
            return Controls {
                page: self.controls.page,
                ..Controls::DISABLED
            };
        };

        if self.is_valid() {
            Controls {
                prev: page != 1,
                page: self.controls.page,
                next: page != max,
            }
        } else {
            Controls {
                prev: page > 1,
                page: self.controls.page,
                next: page < max,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::{Arc, Mutex};

    fn state() -> PageState {
        PageState::new(PagerConfig::default(), PageCallbacks::new()).unwrap()
    }

    #[test]
    fn starts_on_first_page_with_everything_disabled() {
        let state = state();
        assert_eq!(state.page_number(), Some(1));
        assert_eq!(state.max(), None);
        assert!(!state.changed());
        assert_eq!(state.controls(), Controls::DISABLED);
    }

    #[test]
    fn only_disables_everything() {
        let mut state = state();
        state.to_first();
        state.to_only();
        assert_eq!(state.controls(), Controls::DISABLED);
        assert_eq!(state.position(), Position::Only);
    }

    #[test]
    fn first_then_last() {
        let mut state = state();
        state.to_first();
        state.to_last();

        let controls = state.controls();
        assert!(controls.prev);
        assert!(!controls.next);
        assert_eq!(state.max(), state.page_number());
    }

    #[test]
    fn page_zero_is_invalid() {
        let mut state = state();
        assert!(!state.set_page(Some(0)));

        let controls = state.controls();
        assert!(!controls.prev);
        assert_eq!(state.effective_max(), Some(1));
        assert!(controls.next);
        assert_eq!(state.position(), Position::Invalid);
        assert!(!state.changed());
    }

    #[test]
    fn missing_page_disables_movement() {
        let mut state = state();
        assert!(!state.set_page(None));
        assert!(!state.controls().prev);
        assert!(!state.controls().next);
    }

    #[test]
    fn beyond_max_is_invalid_but_allows_going_back() {
        let mut state = state();
        state.set_max(Some(3));
        assert!(!state.set_page(Some(5)));
        assert!(state.controls().prev);
        assert!(!state.controls().next);
    }

    #[test]
    fn valid_page_sets_changed() {
        let mut state = state();
        assert!(state.set_page(Some(4)));
        assert!(state.changed());
        assert!(state.take_changed());
        assert!(!state.changed());
    }

    #[rstest]
    #[case(Some(1), None, Position::First)]
    #[case(Some(1), Some(4), Position::First)]
    #[case(Some(1), Some(1), Position::Only)]
    #[case(Some(2), Some(4), Position::Interior)]
    #[case(Some(7), None, Position::Interior)]
    #[case(Some(4), Some(4), Position::Last)]
    #[case(Some(5), Some(4), Position::Invalid)]
    #[case(Some(-2), None, Position::Invalid)]
    fn positions(#[case] page: Option<i64>, #[case] max: Option<i64>, #[case] expected: Position) {
        let mut state = state();
        state.set_max(max);
        state.set_page(page);
        assert_eq!(state.position(), expected);
    }

    #[test]
    fn callbacks_are_notified() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let valid = seen.clone();
        let invalid = seen.clone();

        let callbacks = PageCallbacks::new()
            .on_valid_page(move |page| valid.lock().unwrap().push(Ok(page)))
            .on_invalid_page(move |page| invalid.lock().unwrap().push(Err(page)));
        let mut state = PageState::new(PagerConfig::default(), callbacks).unwrap();

        state.set_page(Some(2));
        state.set_page(Some(0));
        state.set_page(None);

        assert_eq!(*seen.lock().unwrap(), vec![Ok(2), Err(Some(0)), Err(None)]);
    }

    #[test]
    fn stepping_respects_controls_and_max() {
        let mut state = state();
        assert!(!state.next_page(), "controls start disabled");

        state.to_first();
        state.set_max(Some(2));
        assert!(state.next_page());
        assert_eq!(state.page_number(), Some(2));
        assert!(!state.controls().next);
        assert!(!state.next_page());
        assert_eq!(state.page_number(), Some(2));

        assert!(state.prev_page());
        assert_eq!(state.page_number(), Some(1));
        assert!(!state.controls().prev);
    }

    #[test]
    fn other_keeps_max() {
        let mut state = state();
        state.set_max(Some(5));
        state.to_other(Some(3));
        assert_eq!(state.max(), Some(5));
        assert_eq!(
            state.controls(),
            Controls {
                prev: true,
                page: true,
                next: true
            }
        );

        state.to_other(Some(5));
        assert!(!state.controls().next);
    }

    #[test]
    fn run_if_valid_guards_action() {
        let mut state = state();
        state.set_page(Some(0));
        assert_eq!(state.run_if_valid(|_| "ran"), None);

        state.set_page(Some(3));
        assert_eq!(state.run_if_valid(|s| s.page_number()), Some(Some(3)));
    }

    #[test]
    fn zero_page_length_is_rejected() {
        let mut state = state();
        assert_eq!(state.set_page_length(0), Err(DomainError::ZeroPageLength));
        assert_eq!(state.page_length(), 10);
    }
}
