use super::DomainError;
use serde::Deserialize;
use std::fmt;

pub const DEFAULT_PAGE_LENGTH: usize = 10;

/// Initial settings of a [`PageState`](super::PageState).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PagerConfig {
    pub page_length: usize,
    pub page: i64,
    pub max: Option<i64>,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            page_length: DEFAULT_PAGE_LENGTH,
            page: 1,
            max: None,
        }
    }
}

impl PagerConfig {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.page_length == 0 {
            return Err(DomainError::ZeroPageLength);
        }
        Ok(())
    }
}

type ValidCallback = Box<dyn FnMut(i64) + Send>;
type InvalidCallback = Box<dyn FnMut(Option<i64>) + Send>;

/// Listeners for page validity, both optional.
///
/// `on_valid_page` receives the accepted page, `on_invalid_page` the rejected
/// one (`None` when no page number could be read).
#[derive(Default)]
pub struct PageCallbacks {
    on_valid_page: Option<ValidCallback>,
    on_invalid_page: Option<InvalidCallback>,
}

impl PageCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_valid_page<F>(mut self, f: F) -> Self
    where
        F: FnMut(i64) + Send + 'static,
    {
        self.on_valid_page = Some(Box::new(f));
        self
    }

    pub fn on_invalid_page<F>(mut self, f: F) -> Self
    where
        F: FnMut(Option<i64>) + Send + 'static,
    {
        self.on_invalid_page = Some(Box::new(f));
        self
    }

    pub(crate) fn valid(&mut self, page: i64) {
        if let Some(f) = &mut self.on_valid_page {
            f(page);
        }
    }

    pub(crate) fn invalid(&mut self, page: Option<i64>) {
        if let Some(f) = &mut self.on_invalid_page {
            f(page);
        }
    }
}

impl fmt::Debug for PageCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageCallbacks")
            .field("on_valid_page", &self.on_valid_page.is_some())
            .field("on_invalid_page", &self.on_invalid_page.is_some())
            .finish()
    }
}
