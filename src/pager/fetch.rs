//! Glue between a [`PageState`] and an asynchronous data source.
//!
//! The controller never learns how many items there are in total. It only
//! sees whether the page it received was full, which suggests more pages
//! follow, or short, which marks the last one. A last page which happens to
//! be exactly full is therefore taken for an interior one, until the next
//! request comes back short or empty.

use super::PageState;
use serde_json::Value;
use std::fmt;

/// Parameters sent along with a data request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: i64,
    pub page_length: usize,
}

impl PageRequest {
    pub fn params(&self) -> [(&'static str, String); 2] {
        [
            ("page", self.page.to_string()),
            ("pageLength", self.page_length.to_string()),
        ]
    }

    /// Append the paging parameters to a URL-encoded parameter string.
    pub fn encode_with(&self, base: &str) -> String {
        let mut encoded = String::from(base);
        for (name, value) in self.params() {
            if !encoded.is_empty() {
                encoded.push('&');
            }
            encoded.push_str(name);
            encoded.push('=');
            encoded.push_str(&value);
        }
        encoded
    }

    /// Index of the first item of the requested page.
    pub fn offset(&self) -> usize {
        let page = usize::try_from(self.page.saturating_sub(1)).unwrap_or_default();
        page.saturating_mul(self.page_length)
    }
}

impl fmt::Display for PageRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode_with(""))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Not a keyed or indexed collection, counts as a single item.
    Scalar,
    Collection,
}

/// Shape and size of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchResult {
    pub shape: Shape,
    pub size: usize,
}

impl FetchResult {
    pub fn scalar() -> Self {
        Self {
            shape: Shape::Scalar,
            size: 1,
        }
    }

    pub fn collection(size: usize) -> Self {
        Self {
            shape: Shape::Collection,
            size,
        }
    }

    /// Classify a JSON response. Arrays count their elements, objects their
    /// keys. `null` is an empty collection, anything else a scalar.
    pub fn classify(data: &Value) -> Self {
        match data {
            Value::Array(items) => Self::collection(items.len()),
            Value::Object(entries) => Self::collection(entries.len()),
            Value::Null => Self::collection(0),
            Value::Bool(_) | Value::Number(_) | Value::String(_) => Self::scalar(),
        }
    }
}

/// The boundary state a response led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    First,
    Last,
    Only,
    Other(i64),
}

/// Identifies an issued request. Only the latest one may be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Boundary(Boundary),
    /// The result belongs to a request which was superseded or abandoned.
    Stale,
}

#[derive(Debug, Default)]
pub struct PagedFetchController {
    issued: u64,
    pending: Option<(Ticket, PageRequest)>,
}

impl PagedFetchController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode the state into a request, consuming its "changed" flag.
    ///
    /// An unconfirmed page starts over from the first one. Issuing a request
    /// supersedes any which is still pending.
    pub fn build_request(&mut self, state: &mut PageState) -> (Ticket, PageRequest) {
        let page = match (state.take_changed(), state.page_number()) {
            (true, Some(page)) => page,
            _ => 1,
        };
        let request = PageRequest {
            page,
            page_length: state.page_length(),
        };

        self.issued += 1;
        let ticket = Ticket(self.issued);

        if let Some((previous, _)) = self.pending.replace((ticket, request)) {
            log::debug!("Request {previous:?} superseded by {ticket:?}");
        }
        log::debug!("Issuing {ticket:?}: {request}");

        (ticket, request)
    }

    /// Update the state from the response to `ticket`.
    pub fn apply_result(
        &mut self,
        state: &mut PageState,
        ticket: Ticket,
        result: FetchResult,
    ) -> Applied {
        let request = match self.pending {
            Some((pending, request)) if pending == ticket => request,
            _ => {
                log::warn!("Ignoring result of stale request {ticket:?}");
                return Applied::Stale;
            }
        };
        self.pending = None;

        let boundary = Self::infer(&request, result);
        match boundary {
            Boundary::First => state.to_first(),
            Boundary::Last => state.to_last(),
            Boundary::Only => state.to_only(),
            Boundary::Other(page) => state.to_other(Some(page)),
        }
        log::info!("Page {} of length {}: {boundary:?}", request.page, request.page_length);

        Applied::Boundary(boundary)
    }

    /// Forget about `ticket`, e.g. because the transport failed. The state is
    /// left as it was.
    pub fn abandon(&mut self, ticket: Ticket) {
        if matches!(self.pending, Some((pending, _)) if pending == ticket) {
            self.pending = None;
        }
    }

    pub fn in_flight(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&PageRequest> {
        self.pending.as_ref().map(|(_, request)| request)
    }

    fn infer(request: &PageRequest, result: FetchResult) -> Boundary {
        let first = request.page == 1;
        let short = result.size < request.page_length;

        match (result.shape, first, short) {
            (Shape::Scalar, true, _) => Boundary::Only,
            (Shape::Scalar, false, _) => Boundary::Last,
            (Shape::Collection, true, true) => Boundary::Only,
            (Shape::Collection, true, false) => Boundary::First,
            (Shape::Collection, false, true) => Boundary::Last,
            (Shape::Collection, false, false) => Boundary::Other(request.page),
        }
    }
}
