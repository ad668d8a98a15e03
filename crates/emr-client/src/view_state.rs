//! View State
//!
//! Explicit per-view states that pages hold in signals instead of loose
//! loading/error flags.

use crate::error::ApiResult;
use crate::models::Paginated;
use crate::services::{PageRequest, DEFAULT_PAGE_SIZE};

/// Lifecycle of one fetched resource
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Idle
    }
}

impl<T> ViewState<T> {
    /// Loaded value, or `Failed` with the error's notice text
    pub fn from_result(result: ApiResult<T>, fallback: &str) -> Self {
        match result {
            Ok(value) => ViewState::Loaded(value),
            Err(e) => ViewState::Failed(e.user_message(fallback)),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            ViewState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ViewState<U> {
        match self {
            ViewState::Idle => ViewState::Idle,
            ViewState::Loading => ViewState::Loading,
            ViewState::Loaded(value) => ViewState::Loaded(f(value)),
            ViewState::Failed(message) => ViewState::Failed(message),
        }
    }
}

/// Whether a form is waiting on the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Submission {
    #[default]
    Idle,
    Submitting,
}

impl Submission {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Submission::Submitting)
    }
}

/// Which inline form is open on the encounter detail view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    None,
    Note,
    Diagnosis,
    Vitals,
}

impl Panel {
    /// Clicking the open panel's button closes it
    pub fn toggle(self, target: Panel) -> Panel {
        if self == target {
            Panel::None
        } else {
            target
        }
    }
}

/// Paging position of a list view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pager {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size,
            total: 0,
            total_pages: 0,
        }
    }

    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }

    /// Take totals from a response, keeping the requested page
    pub fn with_totals<T>(self, page: &Paginated<T>) -> Self {
        Self {
            total: page.total,
            total_pages: page.total_pages,
            ..self
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn next(self) -> Self {
        if self.has_next() {
            Self { page: self.page + 1, ..self }
        } else {
            self
        }
    }

    pub fn previous(self) -> Self {
        if self.has_previous() {
            Self { page: self.page - 1, ..self }
        } else {
            self
        }
    }

    /// Back to page one, used whenever a filter changes
    pub fn reset(self) -> Self {
        Self { page: 1, ..self }
    }

    /// 1-based index of the first and last row on this page
    pub fn range(&self) -> (u64, u64) {
        let first = u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size) + 1;
        let last = (u64::from(self.page) * u64::from(self.page_size)).min(self.total);
        (first.min(self.total.max(1)), last)
    }

    /// "Menampilkan 21 sampai 40 dari 57 hasil"
    pub fn summary(&self) -> String {
        let (first, last) = self.range();
        format!("Menampilkan {} sampai {} dari {} hasil", first, last, self.total)
    }
}
