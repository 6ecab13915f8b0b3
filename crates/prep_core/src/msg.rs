use crate::{ActivationId, InterviewRecord, LoadError, ResearchTarget};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A research page was mounted for the given target.
    PageActivated(ResearchTarget),
    /// The research page was navigated away from.
    PageDeactivated,
    /// The single in-flight request for an activation settled.
    FetchSettled {
        activation: ActivationId,
        result: Result<InterviewRecord, LoadError>,
    },
    /// User asked to try again from the error panel.
    RetryClicked,
}
