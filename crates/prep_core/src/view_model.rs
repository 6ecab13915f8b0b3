use crate::{ActivationId, InterviewRecord, LoadError, ResearchTarget};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub activation: Option<ActivationId>,
    pub page: PageView,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PageView {
    #[default]
    Inactive,
    /// Progress indicator; payload-dependent views stay disabled.
    Loading { target: ResearchTarget },
    Loaded { record: InterviewRecord },
    Failed {
        target: ResearchTarget,
        error: LoadError,
        can_retry: bool,
    },
}

impl PageView {
    pub fn record(&self) -> Option<&InterviewRecord> {
        match self {
            PageView::Loaded { record } => Some(record),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, PageView::Loading { .. })
    }
}
