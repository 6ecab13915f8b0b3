//! Interview prep core: data model, fetch lifecycle state machine and view-model helpers.
mod dashboard;
mod effect;
mod msg;
mod record;
mod state;
mod update;
mod view_model;

pub use dashboard::{
    DashboardFilter, DashboardView, InterviewStatus, InterviewSummary, StatusFilter,
};
pub use effect::Effect;
pub use msg::Msg;
pub use record::{
    CompanySummary, CompetitiveAnalysis, HealthStatus, InterviewCategory, InterviewInfo,
    InterviewPreparation, InterviewRecord, ResearchData, ResearchTarget,
};
pub use state::{ActivationId, AppState, FetchState, LoadError, LoadErrorKind};
pub use update::update;
pub use view_model::{AppViewModel, PageView};
