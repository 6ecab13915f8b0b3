use std::time::Duration;

use prep_core::{Effect, Msg};
use prep_engine::{EngineEvent, EngineHandle};
use prep_logging::{prep_debug, prep_info};

/// Executes core effects against the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchResearch { activation, target } => {
                    prep_info!("FetchResearch activation={} target={}", activation, target);
                    self.engine.fetch(activation, target);
                }
                Effect::CancelFetch { activation } => {
                    prep_info!("CancelFetch activation={}", activation);
                    self.engine.cancel(activation);
                }
            }
        }
    }

    pub fn next_msg(&self, wait: Duration) -> Option<Msg> {
        self.engine.recv_timeout(wait).and_then(to_msg)
    }
}

fn to_msg(event: EngineEvent) -> Option<Msg> {
    match event {
        EngineEvent::FetchCompleted { activation, result } => Some(Msg::FetchSettled {
            activation,
            result: result.map_err(|err| err.to_load_error()),
        }),
        EngineEvent::HealthChecked(result) => {
            prep_debug!("ignoring health result on page channel: {:?}", result);
            None
        }
    }
}
