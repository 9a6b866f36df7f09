//! Running counters derived from a recorded step sequence.

use serde::{Deserialize, Serialize};

use crate::step::{Step, StepType};

/// Operation counts for one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub comparisons: usize,
    pub swaps: usize,
    pub moves: usize,
    pub highlights: usize,
    /// Total number of steps seen.
    pub steps: usize,
    /// A terminal `Sorted` step has been seen.
    pub completed: bool,
}

impl RunStats {
    /// Count every step of a finished (or partial) run.
    pub fn from_steps(steps: &[Step]) -> Self {
        let mut stats = Self::default();
        for step in steps {
            stats.record(step);
        }
        stats
    }

    /// Fold one more step into the counters, in replay order.
    pub fn record(&mut self, step: &Step) {
        self.steps += 1;
        match step.step_type {
            StepType::Compare => self.comparisons += 1,
            StepType::Swap => self.swaps += 1,
            StepType::Move => self.moves += 1,
            StepType::Highlight => self.highlights += 1,
            StepType::Sorted => self.completed = true,
            StepType::Partition | StepType::Merge | StepType::Heapify => {}
        }
    }
}
