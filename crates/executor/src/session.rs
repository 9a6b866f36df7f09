//! Background runs with a live event stream.
//!
//! [`SortingExecutor::spawn`] claims the run on the caller's thread (so a busy
//! executor is reported immediately), then sorts on a named worker thread.
//! The returned [`SortHandle`] streams [`SortEvent`]s and forwards
//! pause/resume/stop to the executor.

use std::thread::JoinHandle;

use crossbeam::channel::{self, Receiver, Sender};
use sk_algorithms::{RunOptions, StepSink};
use sk_common::{AlgorithmKind, RunStats, SortError, SortResult, Step};
use tracing::{info, warn};

use crate::executor::{SortOutcome, SortingExecutor};

/// Progress of a background run, in order: `Started`, zero or more `Step`s,
/// then exactly one of `Completed`, `Stopped` or `Failed`.
#[derive(Clone, Debug)]
pub enum SortEvent {
    Started {
        algorithm: AlgorithmKind,
        len: usize,
    },
    Step(Step),
    Completed {
        stats: RunStats,
    },
    Stopped {
        recorded: usize,
    },
    Failed {
        error: SortError,
    },
}

impl SortEvent {
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            Self::Completed { .. } | Self::Stopped { .. } | Self::Failed { .. }
        )
    }
}

struct EventSink(Sender<SortEvent>);

impl StepSink for EventSink {
    fn accept(&self, step: &Step) {
        let _ = self.0.send(SortEvent::Step(step.clone()));
    }
}

/// Handle for watching and steering a background run.
pub struct SortHandle {
    algorithm: AlgorithmKind,
    events_rx: Receiver<SortEvent>,
    executor: SortingExecutor,
    worker: JoinHandle<SortResult<SortOutcome>>,
}

impl SortHandle {
    pub fn algorithm(&self) -> AlgorithmKind {
        self.algorithm
    }

    /// Next event without blocking.
    pub fn try_recv_event(&self) -> Option<SortEvent> {
        self.events_rx.try_recv().ok()
    }

    /// Next event, blocking. `None` once the worker is gone and the stream is drained.
    pub fn recv_event(&self) -> Option<SortEvent> {
        self.events_rx.recv().ok()
    }

    pub fn drain_events(&self) -> Vec<SortEvent> {
        self.events_rx.try_iter().collect()
    }

    pub fn pause(&self) {
        self.executor.pause();
    }

    pub fn resume(&self) {
        self.executor.resume();
    }

    pub fn stop(&self) {
        self.executor.stop();
        info!(algorithm = %self.algorithm, "Background sort stop requested");
    }

    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// Block until the run ends and return its result.
    pub fn wait(self) -> SortResult<SortOutcome> {
        match self.worker.join() {
            Ok(result) => result,
            Err(_) => Err(SortError::Worker {
                reason: format!("sort thread for {} panicked", self.algorithm),
            }),
        }
    }
}

impl SortingExecutor {
    /// Run `kind` over `values` on a background thread.
    pub fn spawn(
        &self,
        kind: AlgorithmKind,
        values: Vec<i64>,
        delay_ms: u64,
    ) -> SortResult<SortHandle> {
        let claimed = self.claim(kind)?;
        let (events_tx, events_rx) = channel::unbounded::<SortEvent>();

        let worker = std::thread::Builder::new()
            .name(format!("sort-{}", claimed.kind()))
            .spawn(move || {
                let _ = events_tx.send(SortEvent::Started {
                    algorithm: kind,
                    len: values.len(),
                });
                let options = RunOptions::with_delay(delay_ms).events(EventSink(events_tx.clone()));
                let result = claimed.run(&values, options);

                let last = match &result {
                    Ok(outcome) => SortEvent::Completed {
                        stats: outcome.stats,
                    },
                    Err(SortError::SortStopped { recorded }) => SortEvent::Stopped {
                        recorded: *recorded,
                    },
                    Err(error) => {
                        warn!(algorithm = %kind, error = %error, "Background sort failed");
                        SortEvent::Failed {
                            error: error.clone(),
                        }
                    }
                };
                let _ = events_tx.send(last);
                result
            })
            .map_err(|e| SortError::Worker {
                reason: format!("failed to spawn sort thread: {e}"),
            })?;

        info!(algorithm = %kind, "Background sort spawned");
        Ok(SortHandle {
            algorithm: kind,
            events_rx,
            executor: self.clone(),
            worker,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::ExecutorPhase;

    #[test]
    fn events_arrive_in_order() {
        let executor = SortingExecutor::default();
        let handle = executor
            .spawn(AlgorithmKind::MergeSort, vec![5, 3, 8, 1], 100)
            .unwrap();

        let mut events = Vec::new();
        while let Some(event) = handle.recv_event() {
            let finished = event.is_finished();
            events.push(event);
            if finished {
                break;
            }
        }
        let outcome = handle.wait().unwrap();

        assert!(matches!(
            events.first(),
            Some(SortEvent::Started { len: 4, .. })
        ));
        assert!(matches!(events.last(), Some(SortEvent::Completed { .. })));
        let streamed: Vec<&Step> = events
            .iter()
            .filter_map(|e| match e {
                SortEvent::Step(step) => Some(step),
                _ => None,
            })
            .collect();
        assert_eq!(streamed.len(), outcome.steps.len());
        assert_eq!(outcome.final_values(), vec![1, 3, 5, 8]);
        assert_eq!(executor.phase(), ExecutorPhase::Idle);
    }

    #[test]
    fn failure_is_reported_as_event() {
        let config = sk_common::EngineConfig {
            max_counting_span: 10,
            ..sk_common::EngineConfig::default()
        };
        let executor =
            SortingExecutor::new(config, std::sync::Arc::new(crate::store::MemoryStepStore::new()));
        let handle = executor
            .spawn(AlgorithmKind::CountingSort, vec![0, 500], 100)
            .unwrap();
        let err = handle.wait().unwrap_err();
        assert_eq!(err.kind(), sk_common::SortErrorKind::ValueSpanTooLarge);
    }
}
