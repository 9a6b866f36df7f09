//! One sorting strategy bound to its own run control.
//!
//! A [`Sorter`] runs at most one sort at a time. The run boundaries are the
//! same for every strategy:
//!
//! - empty input produces no steps
//! - a single element produces exactly one terminal step
//! - anything longer runs the strategy, then marks every element sorted and
//!   appends exactly one terminal `Sorted` step

use std::sync::Arc;

use sk_common::{AlgorithmKind, Element, EngineConfig, SortError, SortResult, Step};
use tracing::{debug, info, warn};

use crate::control::{RunControl, RunToken};
use crate::recorder::{StepRecorder, StepSink};
use crate::traits::SortAlgorithm;

/// Per-run options.
#[derive(Default)]
pub struct RunOptions {
    /// Advisory delay for each step; the config default when `None`.
    pub delay_ms: Option<u64>,
    /// Receives every step as it is appended.
    pub events: Option<Box<dyn StepSink>>,
}

impl RunOptions {
    pub fn with_delay(delay_ms: u64) -> Self {
        Self {
            delay_ms: Some(delay_ms),
            events: None,
        }
    }

    pub fn events(mut self, sink: impl StepSink + 'static) -> Self {
        self.events = Some(Box::new(sink));
        self
    }
}

pub struct Sorter {
    algorithm: Box<dyn SortAlgorithm>,
    control: RunControl,
    config: EngineConfig,
}

impl Sorter {
    pub fn new(algorithm: Box<dyn SortAlgorithm>, config: EngineConfig) -> Self {
        Self {
            control: RunControl::new(config.pause_poll_interval()),
            algorithm,
            config,
        }
    }

    pub fn kind(&self) -> AlgorithmKind {
        self.algorithm.kind()
    }

    pub fn name(&self) -> &'static str {
        self.algorithm.name()
    }

    pub fn control(&self) -> &RunControl {
        &self.control
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Claim this sorter for one run.
    ///
    /// Fails with [`SortError::SortInProgress`] while another run holds the
    /// claim. The claim is released when the returned [`SortRun`] is dropped.
    pub fn begin(self: &Arc<Self>) -> SortResult<SortRun> {
        let Some(token) = self.control.try_begin_run() else {
            warn!(algorithm = %self.kind(), "Sort rejected: already running");
            return Err(SortError::SortInProgress);
        };
        Ok(SortRun {
            sorter: Arc::clone(self),
            token,
        })
    }

    /// Sort `values`, returning the full step sequence.
    pub fn sort(self: &Arc<Self>, values: &[i64], delay_ms: u64) -> SortResult<Vec<Step>> {
        self.sort_with(values, RunOptions::with_delay(delay_ms))
    }

    pub fn sort_with(self: &Arc<Self>, values: &[i64], options: RunOptions) -> SortResult<Vec<Step>> {
        self.begin()?.execute(values, options)
    }

    pub fn pause(&self) {
        self.control.set_paused(true);
    }

    pub fn resume(&self) {
        self.control.set_paused(false);
    }

    pub fn stop(&self) {
        self.control.set_stopped(true);
    }

    pub fn reset(&self) {
        self.control.reset();
    }

    pub fn is_running(&self) -> bool {
        self.control.is_running()
    }

    pub fn is_paused(&self) -> bool {
        self.control.is_paused()
    }

    pub fn is_stopped(&self) -> bool {
        self.control.is_stopped()
    }
}

/// An in-flight claim on a [`Sorter`].
pub struct SortRun {
    sorter: Arc<Sorter>,
    token: RunToken,
}

impl SortRun {
    pub fn kind(&self) -> AlgorithmKind {
        self.sorter.kind()
    }

    pub fn token(&self) -> RunToken {
        self.token
    }

    /// Run the sort to completion, consuming the claim.
    pub fn execute(self, values: &[i64], options: RunOptions) -> SortResult<Vec<Step>> {
        let sorter = &self.sorter;
        let kind = sorter.kind();
        let delay = options.delay_ms.unwrap_or(sorter.config.default_delay_ms);
        info!(algorithm = %kind, len = values.len(), delay, "Sort started");

        let mut rec = StepRecorder::new(Element::from_values(values), &sorter.control, delay)
            .with_run(self.token)
            .with_pacing(sorter.config.pace_steps)
            .with_events(options.events)
            .with_max_counting_span(sorter.config.max_counting_span);

        let outcome = match values.len() {
            0 => Ok(()),
            1 => rec.finish("Single element is already sorted"),
            _ => sorter
                .algorithm
                .record(&mut rec)
                .and_then(|()| rec.finish(format!("{} complete", kind.display_name()))),
        };

        let recorded = rec.step_count();
        match outcome {
            Ok(()) if sorter.control.is_halted(self.token) => {
                info!(algorithm = %kind, recorded, "Sort stopped after its last step");
                Err(SortError::SortStopped { recorded })
            }
            Ok(()) => {
                debug_assert!(values.is_empty() || rec.steps().last().is_some_and(Step::is_terminal));
                info!(algorithm = %kind, steps = recorded, "Sort completed");
                Ok(rec.into_steps())
            }
            Err(SortError::SortStopped { recorded }) => {
                info!(algorithm = %kind, recorded, "Sort stopped");
                Err(SortError::SortStopped { recorded })
            }
            Err(e) => {
                warn!(algorithm = %kind, error = %e, "Sort failed");
                Err(e)
            }
        }
    }
}

impl Drop for SortRun {
    fn drop(&mut self) {
        self.sorter.control.end_run(self.token);
        debug!(algorithm = %self.sorter.kind(), "Sort claim released");
    }
}
