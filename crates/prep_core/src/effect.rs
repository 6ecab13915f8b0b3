use crate::{ActivationId, ResearchTarget};

/// Side effects requested by `update`; executed by the host, never by the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchResearch {
        activation: ActivationId,
        target: ResearchTarget,
    },
    CancelFetch { activation: ActivationId },
}
