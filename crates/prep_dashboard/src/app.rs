use std::io::{BufRead, Write};
use std::time::{Duration, Instant};

use anyhow::Context;
use prep_core::{
    update, AppState, DashboardFilter, DashboardView, Effect, FetchState, InterviewSummary,
    LoadError, LoadErrorKind, Msg, ResearchTarget,
};
use prep_engine::{EngineEvent, EngineHandle};
use prep_logging::{prep_info, prep_warn};

use crate::effects::EffectRunner;
use crate::ui::{render, terminal};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
/// Slack on top of the engine's own settle timeout before the page gives up.
const WATCHDOG_GRACE: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    Loaded,
    Failed,
}

/// Hosts one research page: dispatches messages, runs effects, renders when dirty.
pub struct ResearchPage<W, R> {
    state: AppState,
    runner: EffectRunner,
    out: W,
    input: R,
    max_wait: Duration,
}

impl<W: Write, R: BufRead> ResearchPage<W, R> {
    pub fn new(
        engine: EngineHandle,
        settle_timeout: Duration,
        out: W,
        input: R,
        prompt_retry: bool,
    ) -> Self {
        Self {
            state: AppState::with_retry(prompt_retry),
            runner: EffectRunner::new(engine),
            out,
            input,
            max_wait: settle_timeout + WATCHDOG_GRACE,
        }
    }

    pub fn run(mut self, target: ResearchTarget) -> anyhow::Result<(PageOutcome, W)> {
        self.dispatch(Msg::PageActivated(target))?;
        let mut loading_since = Instant::now();

        let outcome = loop {
            match self.state.fetch_state() {
                Some(FetchState::Loading) => {
                    if let Some(msg) = self.runner.next_msg(POLL_INTERVAL) {
                        self.dispatch(msg)?;
                    } else if loading_since.elapsed() > self.max_wait {
                        self.give_up()?;
                    }
                }
                Some(FetchState::Loaded(_)) => break PageOutcome::Loaded,
                Some(FetchState::Failed(_)) => {
                    if self.state.retry_enabled() && self.ask_retry()? {
                        self.dispatch(Msg::RetryClicked)?;
                        loading_since = Instant::now();
                    } else {
                        break PageOutcome::Failed;
                    }
                }
                None => break PageOutcome::Failed,
            }
        };

        self.dispatch(Msg::PageDeactivated)?;
        Ok((outcome, self.out))
    }

    fn dispatch(&mut self, msg: Msg) -> anyhow::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        self.runner.run(effects);
        let was_dirty = state.consume_dirty();
        let view = state.view();
        self.state = state;

        if was_dirty {
            terminal::draw(&mut self.out, &render::render_page(&view))
                .context("failed to draw page")?;
        }
        Ok(())
    }

    /// Settles a page whose worker never reported back.
    fn give_up(&mut self) -> anyhow::Result<()> {
        let Some(activation) = self.state.active() else {
            return Ok(());
        };
        prep_warn!("activation {} exceeded {:?}, giving up", activation, self.max_wait);
        self.runner.run(vec![Effect::CancelFetch { activation }]);
        self.dispatch(Msg::FetchSettled {
            activation,
            result: Err(LoadError::new(
                LoadErrorKind::Timeout,
                format!("no result after {} s", self.max_wait.as_secs()),
            )),
        })
    }

    fn ask_retry(&mut self) -> anyhow::Result<bool> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read retry answer")?;
        Ok(read > 0 && line.trim().eq_ignore_ascii_case("r"))
    }
}

pub fn run_dashboard(
    out: &mut impl Write,
    entries: &[InterviewSummary],
    filter: &DashboardFilter,
) -> anyhow::Result<()> {
    let view = DashboardView::build(entries, filter);
    prep_info!(
        "dashboard: {} of {} interviews visible",
        view.rows.len(),
        entries.len()
    );
    terminal::draw(out, &render::render_dashboard(&view, filter))
        .context("failed to draw dashboard")
}

/// Returns whether the service reported itself healthy. `wait` is the engine's own
/// health timeout; the loop waits a grace period longer so the engine's answer wins.
pub fn run_health(
    engine: &EngineHandle,
    out: &mut impl Write,
    wait: Duration,
) -> anyhow::Result<bool> {
    engine.check_health();
    let deadline = Instant::now() + wait + WATCHDOG_GRACE;
    while Instant::now() < deadline {
        match engine.recv_timeout(POLL_INTERVAL) {
            Some(EngineEvent::HealthChecked(Ok(health))) => {
                writeln!(out, "service status: {}", health.status)?;
                return Ok(true);
            }
            Some(EngineEvent::HealthChecked(Err(err))) => {
                writeln!(out, "service unavailable: {err}")?;
                return Ok(false);
            }
            Some(EngineEvent::FetchCompleted { .. }) | None => {}
        }
    }
    writeln!(
        out,
        "service unavailable: no answer within {} s",
        (wait + WATCHDOG_GRACE).as_secs()
    )?;
    Ok(false)
}
