use std::collections::HashMap;
use std::io;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use prep_core::{ActivationId, InterviewRecord, ResearchTarget};
use prep_logging::{prep_debug, prep_info, prep_warn};
use tokio_util::sync::CancellationToken;

use crate::client::ResearchSource;
use crate::{EngineEvent, FailureKind, FetchError};

#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Upper bound on how long one activation may stay unsettled.
    pub settle_timeout: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            settle_timeout: Duration::from_secs(45),
        }
    }
}

enum EngineCommand {
    Fetch {
        activation: ActivationId,
        target: ResearchTarget,
    },
    Cancel {
        activation: ActivationId,
    },
    Health,
}

type InFlight = Arc<Mutex<HashMap<ActivationId, CancellationToken>>>;

/// Runs fetches on a dedicated runtime thread and reports back over a channel.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(source: Arc<dyn ResearchSource>, settings: EngineSettings) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("prep-engine".into())
            .spawn(move || {
                let in_flight: InFlight = Arc::default();
                while let Ok(command) = cmd_rx.recv() {
                    handle_command(
                        &runtime,
                        &source,
                        &settings,
                        &in_flight,
                        command,
                        &event_tx,
                    );
                }
                prep_debug!("engine command channel closed");
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn fetch(&self, activation: ActivationId, target: ResearchTarget) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::Fetch { activation, target });
    }

    /// Cancels an in-flight fetch; no event is emitted for it afterwards.
    pub fn cancel(&self, activation: ActivationId) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { activation });
    }

    pub fn check_health(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Health);
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

fn handle_command(
    runtime: &tokio::runtime::Runtime,
    source: &Arc<dyn ResearchSource>,
    settings: &EngineSettings,
    in_flight: &InFlight,
    command: EngineCommand,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Fetch { activation, target } => {
            let token = CancellationToken::new();
            if let Ok(mut map) = in_flight.lock() {
                map.insert(activation, token.clone());
            }
            prep_info!("fetching {} for activation {}", target, activation);

            let source = source.clone();
            let settle_timeout = settings.settle_timeout;
            let in_flight = in_flight.clone();
            let event_tx = event_tx.clone();
            runtime.spawn(async move {
                let outcome = tokio::select! {
                    _ = token.cancelled() => None,
                    result = settle(source.as_ref(), &target, settle_timeout) => Some(result),
                };
                if let Ok(mut map) = in_flight.lock() {
                    map.remove(&activation);
                }
                match outcome {
                    // A cancel that lost the race still suppresses the event.
                    Some(result) if !token.is_cancelled() => {
                        if let Err(err) = &result {
                            prep_warn!("activation {} failed: {}", activation, err);
                        }
                        let _ = event_tx.send(EngineEvent::FetchCompleted { activation, result });
                    }
                    _ => prep_debug!("activation {} cancelled", activation),
                }
            });
        }
        EngineCommand::Cancel { activation } => {
            let token = in_flight
                .lock()
                .ok()
                .and_then(|mut map| map.remove(&activation));
            if let Some(token) = token {
                token.cancel();
            }
        }
        EngineCommand::Health => {
            let source = source.clone();
            let settle_timeout = settings.settle_timeout;
            let event_tx = event_tx.clone();
            runtime.spawn(async move {
                let result = match tokio::time::timeout(settle_timeout, source.health()).await {
                    Ok(result) => result,
                    Err(_) => Err(timed_out(settle_timeout)),
                };
                let _ = event_tx.send(EngineEvent::HealthChecked(result));
            });
        }
    }
}

async fn settle(
    source: &dyn ResearchSource,
    target: &ResearchTarget,
    settle_timeout: Duration,
) -> Result<InterviewRecord, FetchError> {
    match tokio::time::timeout(settle_timeout, source.fetch_research(target)).await {
        Ok(result) => result,
        Err(_) => Err(timed_out(settle_timeout)),
    }
}

fn timed_out(after: Duration) -> FetchError {
    FetchError::new(
        FailureKind::Timeout,
        format!("no response within {} ms", after.as_millis()),
    )
}
