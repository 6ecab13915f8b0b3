use std::fmt;

use crate::view_model::{AppViewModel, PageView};
use crate::{InterviewRecord, ResearchTarget};

pub type ActivationId = u64;

/// Three-state lifecycle of one page activation.
///
/// Starts in `Loading`; `Loaded` and `Failed` are terminal for the activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    Loading,
    Loaded(InterviewRecord),
    Failed(LoadError),
}

impl FetchState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, FetchState::Loading)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    Network,
    HttpStatus(u16),
    Decode,
    Timeout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadError {
    pub kind: LoadErrorKind,
    pub message: String,
}

impl LoadError {
    pub fn new(kind: LoadErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LoadErrorKind::Network => write!(f, "network error: {}", self.message),
            LoadErrorKind::HttpStatus(code) => write!(f, "http status {code}: {}", self.message),
            LoadErrorKind::Decode => write!(f, "unexpected response: {}", self.message),
            LoadErrorKind::Timeout => write!(f, "request timed out: {}", self.message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Activation {
    pub(crate) id: ActivationId,
    pub(crate) target: ResearchTarget,
    pub(crate) fetch: FetchState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    page: Option<Activation>,
    last_activation: ActivationId,
    retry_enabled: bool,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            page: None,
            last_activation: 0,
            retry_enabled: true,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State whose failed pages offer (or withhold) a manual retry.
    pub fn with_retry(retry_enabled: bool) -> Self {
        Self {
            retry_enabled,
            ..Self::default()
        }
    }

    pub fn retry_enabled(&self) -> bool {
        self.retry_enabled
    }

    pub fn view(&self) -> AppViewModel {
        let page = match &self.page {
            None => PageView::Inactive,
            Some(activation) => match &activation.fetch {
                FetchState::Loading => PageView::Loading {
                    target: activation.target.clone(),
                },
                FetchState::Loaded(record) => PageView::Loaded {
                    record: record.clone(),
                },
                FetchState::Failed(error) => PageView::Failed {
                    target: activation.target.clone(),
                    error: error.clone(),
                    can_retry: self.retry_enabled,
                },
            },
        };
        AppViewModel {
            activation: self.page.as_ref().map(|activation| activation.id),
            page,
        }
    }

    pub fn active(&self) -> Option<ActivationId> {
        self.page.as_ref().map(|activation| activation.id)
    }

    pub fn fetch_state(&self) -> Option<&FetchState> {
        self.page.as_ref().map(|activation| &activation.fetch)
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn page(&self) -> Option<&Activation> {
        self.page.as_ref()
    }

    /// Mounts a fresh activation in `Loading` and returns its id.
    pub(crate) fn activate(&mut self, target: ResearchTarget) -> ActivationId {
        self.last_activation += 1;
        let id = self.last_activation;
        self.page = Some(Activation {
            id,
            target,
            fetch: FetchState::Loading,
        });
        self.mark_dirty();
        id
    }

    pub(crate) fn deactivate(&mut self) -> Option<Activation> {
        let previous = self.page.take();
        if previous.is_some() {
            self.mark_dirty();
        }
        previous
    }

    /// Applies a settled result. Returns `false` when the result is stale.
    pub(crate) fn settle(
        &mut self,
        activation: ActivationId,
        result: Result<InterviewRecord, LoadError>,
    ) -> bool {
        let Some(page) = self.page.as_mut() else {
            return false;
        };
        if page.id != activation || page.fetch.is_terminal() {
            return false;
        }
        page.fetch = match result {
            Ok(record) => FetchState::Loaded(record),
            Err(error) => FetchState::Failed(error),
        };
        self.mark_dirty();
        true
    }
}
