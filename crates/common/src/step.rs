//! Recorded operations: the replayable output of a sort run.

use serde::{Deserialize, Serialize};

use crate::element::Element;

/// Advisory delay for ordinary steps when the caller gives none (ms).
pub const DEFAULT_STEP_DELAY_MS: u64 = 500;
/// Advisory delay for the terminal `Sorted` step when the caller gives none (ms).
pub const DEFAULT_TERMINAL_DELAY_MS: u64 = 1000;

/// Kind of a recorded step.
///
/// `Partition`, `Merge` and `Heapify` are reserved tags; no algorithm emits them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepType {
    Compare,
    Swap,
    Move,
    Highlight,
    Sorted,
    Partition,
    Merge,
    Heapify,
}

/// One recorded event with a full snapshot of the array at that instant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    #[serde(rename = "type")]
    pub step_type: StepType,
    /// Positions the step concerns, in order. May be empty.
    pub indices: Vec<usize>,
    /// Human-readable narration. Illustrative only.
    pub description: String,
    /// Independent copy of the working array.
    pub array: Vec<Element>,
    /// Suggested animation pacing in milliseconds.
    pub delay: u64,
}

impl Step {
    pub fn new(
        step_type: StepType,
        indices: Vec<usize>,
        description: impl Into<String>,
        array: Vec<Element>,
        delay: u64,
    ) -> Self {
        Self {
            step_type,
            indices,
            description: description.into(),
            array,
            delay,
        }
    }

    pub fn compare(array: &[Element], indices: Vec<usize>, description: impl Into<String>) -> Self {
        Self::new(
            StepType::Compare,
            indices,
            description,
            array.to_vec(),
            DEFAULT_STEP_DELAY_MS,
        )
    }

    pub fn swap(array: &[Element], indices: Vec<usize>, description: impl Into<String>) -> Self {
        Self::new(
            StepType::Swap,
            indices,
            description,
            array.to_vec(),
            DEFAULT_STEP_DELAY_MS,
        )
    }

    pub fn moved(array: &[Element], indices: Vec<usize>, description: impl Into<String>) -> Self {
        Self::new(
            StepType::Move,
            indices,
            description,
            array.to_vec(),
            DEFAULT_STEP_DELAY_MS,
        )
    }

    pub fn highlight(array: &[Element], indices: Vec<usize>, description: impl Into<String>) -> Self {
        Self::new(
            StepType::Highlight,
            indices,
            description,
            array.to_vec(),
            DEFAULT_STEP_DELAY_MS,
        )
    }

    /// Terminal step; carries no indices.
    pub fn sorted(array: &[Element], description: impl Into<String>) -> Self {
        Self::new(
            StepType::Sorted,
            Vec::new(),
            description,
            array.to_vec(),
            DEFAULT_TERMINAL_DELAY_MS,
        )
    }

    /// Replace the advisory delay.
    pub fn with_delay(mut self, delay: u64) -> Self {
        self.delay = delay;
        self
    }

    /// Whether this is the terminal step of a run.
    pub fn is_terminal(&self) -> bool {
        self.step_type == StepType::Sorted
    }

    /// The snapshot's values, in slot order.
    pub fn values(&self) -> Vec<i64> {
        self.array.iter().map(|e| e.value).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_type_and_default_delay() {
        let array = Element::from_values(&[2, 1]);
        let step = Step::compare(&array, vec![0, 1], "compare 2 and 1");
        assert_eq!(step.step_type, StepType::Compare);
        assert_eq!(step.indices, vec![0, 1]);
        assert_eq!(step.delay, DEFAULT_STEP_DELAY_MS);

        let done = Step::sorted(&array, "done");
        assert!(done.is_terminal());
        assert!(done.indices.is_empty());
        assert_eq!(done.delay, DEFAULT_TERMINAL_DELAY_MS);
    }

    #[test]
    fn snapshot_is_independent_copy() {
        let mut array = Element::from_values(&[3, 1, 2]);
        let step = Step::highlight(&array, vec![], "start");
        array.swap(0, 1);
        array[0].value = 100;
        assert_eq!(step.values(), vec![3, 1, 2]);
    }

    #[test]
    fn with_delay_overrides() {
        let array = Element::from_values(&[1]);
        let step = Step::moved(&array, vec![0], "move").with_delay(120);
        assert_eq!(step.delay, 120);
        assert_eq!(step.step_type, StepType::Move);
    }

    #[test]
    fn step_type_serializes_under_type_key() {
        let array = Element::from_values(&[1]);
        let json = serde_json::to_string(&Step::swap(&array, vec![0], "s")).unwrap();
        assert!(json.contains("\"type\":\"swap\""));
    }
}
