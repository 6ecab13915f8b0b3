use crate::{AppState, Effect, FetchState, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::PageActivated(target) => {
            let mut effects = Vec::with_capacity(2);
            if let Some(previous) = state.deactivate() {
                if !previous.fetch.is_terminal() {
                    effects.push(Effect::CancelFetch {
                        activation: previous.id,
                    });
                }
            }
            let activation = state.activate(target.clone());
            effects.push(Effect::FetchResearch { activation, target });
            effects
        }
        Msg::PageDeactivated => match state.deactivate() {
            Some(previous) if !previous.fetch.is_terminal() => vec![Effect::CancelFetch {
                activation: previous.id,
            }],
            _ => Vec::new(),
        },
        Msg::FetchSettled { activation, result } => {
            // Stale and duplicate results are dropped without a re-render.
            state.settle(activation, result);
            Vec::new()
        }
        Msg::RetryClicked => {
            let retry_target = match state.page() {
                Some(page)
                    if state.retry_enabled() && matches!(page.fetch, FetchState::Failed(_)) =>
                {
                    Some(page.target.clone())
                }
                _ => None,
            };
            match retry_target {
                Some(target) => {
                    state.deactivate();
                    let activation = state.activate(target.clone());
                    vec![Effect::FetchResearch { activation, target }]
                }
                None => Vec::new(),
            }
        }
    };

    (state, effects)
}
