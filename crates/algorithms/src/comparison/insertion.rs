use sk_common::{AlgorithmKind, ElementState, SortResult};

use crate::recorder::StepRecorder;
use crate::traits::SortAlgorithm;

/// Grow a sorted prefix by shifting each new key left into place.
pub struct InsertionSort;

impl SortAlgorithm for InsertionSort {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::InsertionSort
    }

    fn record(&self, rec: &mut StepRecorder<'_>) -> SortResult<()> {
        let n = rec.len();
        rec.highlight(Vec::new(), "Starting insertion sort")?;
        rec.mark_sorted(0);
        rec.highlight(vec![0], "The first element forms a sorted prefix")?;

        for i in 1..n {
            let key = rec.value(i);
            // The key joins the prefix now so no slot it passes loses its flag.
            rec.mark_sorted(i);
            rec.set_state(i, ElementState::Comparing);
            rec.highlight(vec![i], format!("Inserting {key}"))?;

            insert_key(rec, 0, i, 1)?;

            for k in 0..=i {
                rec.set_state(k, ElementState::Sorted);
            }
            rec.highlight(
                (0..=i).collect(),
                format!("First {} elements are sorted", i + 1),
            )?;
        }
        Ok(())
    }
}

/// Shift the key at `index` down by `gap` while the slot below holds a larger
/// value, never going below `floor`. Returns the key's final slot.
///
/// Equal values are never shifted past each other.
pub(crate) fn insert_key(
    rec: &mut StepRecorder<'_>,
    floor: usize,
    index: usize,
    gap: usize,
) -> SortResult<usize> {
    let key = rec.value(index);
    let mut j = index;

    while j >= floor + gap {
        let below = j - gap;
        let other = rec.value(below);
        rec.set_state(below, ElementState::Comparing);
        rec.set_state(j, ElementState::Comparing);
        rec.compare(vec![below, j], format!("Comparing {other} with {key}"))?;

        if other > key {
            rec.shift(below, j, format!("Shifting {other} up to position {j}"))?;
            j = below;
        } else {
            rec.set_state(below, ElementState::Normal);
            rec.set_state(j, ElementState::Normal);
            break;
        }
    }

    rec.set_state(j, ElementState::Normal);
    rec.highlight(vec![j], format!("{key} placed at position {j}"))?;
    Ok(j)
}
