//! The execution coordinator: one sort system-wide at a time.
//!
//! `idle --execute--> executing --(success | stop)--> idle`, with `pause` and
//! `resume` toggling the active sorter's pause flag and `reset` forcing idle
//! from any state.

use std::sync::Arc;

use parking_lot::Mutex;
use sk_algorithms::{AlgorithmRegistry, RunOptions, RunToken, SortRun, Sorter, StepSink};
use sk_common::{AlgorithmKind, EngineConfig, RunStats, SortError, SortResult, Step};
use tracing::{debug, info, warn};

use crate::store::{MemoryStepStore, StepStore};

/// Coordinator phase as seen by a controller.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExecutorPhase {
    Idle,
    Executing,
    Paused,
}

/// A completed run.
#[derive(Clone, Debug)]
pub struct SortOutcome {
    pub algorithm: AlgorithmKind,
    pub steps: Vec<Step>,
    pub stats: RunStats,
    /// Set when the run succeeded but handing it to the store failed.
    pub save_error: Option<SortError>,
}

impl SortOutcome {
    /// Values of the final snapshot, empty for an empty input.
    pub fn final_values(&self) -> Vec<i64> {
        self.steps.last().map(Step::values).unwrap_or_default()
    }
}

/// Cloneable handle to the shared coordinator.
#[derive(Clone)]
pub struct SortingExecutor {
    inner: Arc<ExecutorInner>,
}

struct ExecutorInner {
    registry: AlgorithmRegistry,
    store: Arc<dyn StepStore>,
    active: Mutex<Option<ActiveRun>>,
}

/// The sorter holding the coordinator gate and the claim it was granted.
struct ActiveRun {
    sorter: Arc<Sorter>,
    token: RunToken,
}

/// A run that holds both the coordinator gate and the sorter's own claim.
pub(crate) struct ClaimedRun {
    gate: ActiveGuard,
    run: SortRun,
}

/// Clears the coordinator's active run on drop, if it is still this claim.
struct ActiveGuard {
    executor: SortingExecutor,
    sorter: Arc<Sorter>,
    token: RunToken,
}

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.executor.release(&self.sorter, self.token);
    }
}

impl SortingExecutor {
    pub fn new(config: EngineConfig, store: Arc<dyn StepStore>) -> Self {
        Self::with_registry(AlgorithmRegistry::new(config), store)
    }

    /// Coordinate runs over an existing registry.
    pub fn with_registry(registry: AlgorithmRegistry, store: Arc<dyn StepStore>) -> Self {
        Self {
            inner: Arc::new(ExecutorInner {
                registry,
                store,
                active: Mutex::new(None),
            }),
        }
    }

    pub fn registry(&self) -> &AlgorithmRegistry {
        &self.inner.registry
    }

    pub fn store(&self) -> &Arc<dyn StepStore> {
        &self.inner.store
    }

    pub fn config(&self) -> &EngineConfig {
        self.inner.registry.config()
    }

    /// Run `kind` over `values` on the calling thread.
    pub fn execute(
        &self,
        kind: AlgorithmKind,
        values: &[i64],
        delay_ms: u64,
    ) -> SortResult<SortOutcome> {
        self.claim(kind)?
            .run(values, RunOptions::with_delay(delay_ms))
    }

    /// Same as [`execute`](Self::execute), looking the algorithm up by id.
    pub fn execute_by_id(&self, id: &str, values: &[i64], delay_ms: u64) -> SortResult<SortOutcome> {
        let kind: AlgorithmKind = id.parse()?;
        self.execute(kind, values, delay_ms)
    }

    /// Run with a sink that receives every step as it is appended.
    pub fn execute_streaming(
        &self,
        kind: AlgorithmKind,
        values: &[i64],
        delay_ms: u64,
        sink: impl StepSink + 'static,
    ) -> SortResult<SortOutcome> {
        self.claim(kind)?
            .run(values, RunOptions::with_delay(delay_ms).events(sink))
    }

    pub fn stop(&self) {
        match self.inner.active.lock().as_ref() {
            Some(active) => {
                debug!(algorithm = %active.sorter.kind(), "Stop requested");
                active.sorter.stop();
            }
            None => debug!("Stop requested with no active run"),
        }
    }

    pub fn pause(&self) {
        if let Some(active) = self.inner.active.lock().as_ref() {
            debug!(algorithm = %active.sorter.kind(), "Pause requested");
            active.sorter.pause();
        }
    }

    pub fn resume(&self) {
        if let Some(active) = self.inner.active.lock().as_ref() {
            debug!(algorithm = %active.sorter.kind(), "Resume requested");
            active.sorter.resume();
        }
    }

    /// Force idle: forget the active run and reset every cached sorter.
    ///
    /// Resetting a sorter orphans its in-flight claim: that run fails its next
    /// checkpoint and its release no longer touches later claims.
    pub fn reset(&self) {
        let mut active = self.inner.active.lock();
        let previous = active.take();
        self.inner.registry.reset_all();
        drop(active);
        info!(
            orphaned = ?previous.map(|run| run.sorter.kind()),
            "Executor reset"
        );
    }

    pub fn phase(&self) -> ExecutorPhase {
        match self.inner.active.lock().as_ref() {
            None => ExecutorPhase::Idle,
            Some(active) if active.sorter.is_paused() => ExecutorPhase::Paused,
            Some(_) => ExecutorPhase::Executing,
        }
    }

    pub fn is_executing(&self) -> bool {
        self.inner.active.lock().is_some()
    }

    pub fn active_algorithm(&self) -> Option<AlgorithmKind> {
        self.inner.active.lock().as_ref().map(|active| active.sorter.kind())
    }

    /// Take the coordinator gate and the sorter's claim for `kind`.
    pub(crate) fn claim(&self, kind: AlgorithmKind) -> SortResult<ClaimedRun> {
        let mut active = self.inner.active.lock();
        if let Some(current) = active.as_ref() {
            warn!(
                requested = %kind,
                active = %current.sorter.kind(),
                "Sort rejected: another sort is executing"
            );
            return Err(SortError::SortInProgress);
        }

        let sorter = self.inner.registry.get(kind);
        let run = sorter.begin()?;
        let token = run.token();
        *active = Some(ActiveRun {
            sorter: Arc::clone(&sorter),
            token,
        });
        Ok(ClaimedRun {
            gate: ActiveGuard {
                executor: self.clone(),
                sorter,
                token,
            },
            run,
        })
    }

    fn release(&self, sorter: &Arc<Sorter>, token: RunToken) {
        let mut active = self.inner.active.lock();
        if active
            .as_ref()
            .is_some_and(|current| current.token == token && Arc::ptr_eq(&current.sorter, sorter))
        {
            *active = None;
        }
    }

    fn persist(&self, steps: &[Step]) -> Option<SortError> {
        if !self.config().persist_steps {
            return None;
        }
        match self.inner.store.save(steps) {
            Ok(()) => None,
            Err(e) => {
                warn!(error = %e, "Failed to save steps; keeping the in-memory result");
                Some(e.into())
            }
        }
    }
}

impl Default for SortingExecutor {
    fn default() -> Self {
        Self::new(EngineConfig::default(), Arc::new(MemoryStepStore::new()))
    }
}

impl ClaimedRun {
    pub(crate) fn kind(&self) -> AlgorithmKind {
        self.run.kind()
    }

    /// Execute the claimed run, then release the gate and persist on success.
    pub(crate) fn run(self, values: &[i64], options: RunOptions) -> SortResult<SortOutcome> {
        let ClaimedRun { gate, run } = self;
        let kind = run.kind();
        let executor = gate.executor.clone();

        let result = run.execute(values, options);
        drop(gate);

        let steps = result?;
        let stats = RunStats::from_steps(&steps);
        let save_error = executor.persist(&steps);
        info!(
            algorithm = %kind,
            steps = stats.steps,
            comparisons = stats.comparisons,
            swaps = stats.swaps,
            "Execution finished"
        );
        Ok(SortOutcome {
            algorithm: kind,
            steps,
            stats,
            save_error,
        })
    }
}
