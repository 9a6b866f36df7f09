//! Array slot model: one element of the array being sorted.

use serde::{Deserialize, Serialize};

/// Transient visual state of an element during one operation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementState {
    #[default]
    Normal,
    Comparing,
    Swapping,
    Sorted,
    /// Partition pivot (quick sort).
    Pivot,
    /// Current minimum candidate (selection sort).
    Min,
    Max,
}

/// One slot of the array being sorted.
///
/// `id` is the element's index in the input the run was started with and
/// travels with the element through every swap and move, so two snapshots can
/// be diffed by identity. Equality compares `(value, position, state)` only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Element {
    pub id: usize,
    pub value: i64,
    pub position: usize,
    pub state: ElementState,
    /// Monotonic within a run: once set it is never cleared.
    pub is_sorted: bool,
}

impl Element {
    /// Create an element in the `Normal` state at `position`, using the
    /// position as its identity.
    pub fn new(value: i64, position: usize) -> Self {
        Self {
            id: position,
            value,
            position,
            state: ElementState::Normal,
            is_sorted: false,
        }
    }

    /// Wrap a sequence of values as elements at positions `0..n`.
    pub fn from_values(values: &[i64]) -> Vec<Self> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| Self::new(v, i))
            .collect()
    }

    /// Set the state to `Sorted` and latch `is_sorted`.
    pub fn mark_sorted(&mut self) {
        self.state = ElementState::Sorted;
        self.is_sorted = true;
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.position == other.position && self.state == other.state
    }
}

impl Eq for Element {}
