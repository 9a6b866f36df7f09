use sk_common::{AlgorithmKind, ElementState, SortResult};

use crate::recorder::StepRecorder;
use crate::traits::SortAlgorithm;

/// Quick sort with the Lomuto partition (last element as pivot).
pub struct QuickSort;

impl SortAlgorithm for QuickSort {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::QuickSort
    }

    fn record(&self, rec: &mut StepRecorder<'_>) -> SortResult<()> {
        rec.highlight(Vec::new(), "Starting quick sort")?;
        let last = rec.len() - 1;
        sort_range(rec, 0, last)
    }
}

fn sort_range(rec: &mut StepRecorder<'_>, low: usize, high: usize) -> SortResult<()> {
    if low == high {
        if !rec.element(low).is_sorted {
            rec.mark_sorted(low);
            let value = rec.value(low);
            rec.highlight(vec![low], format!("{value} is in its final position"))?;
        }
        return Ok(());
    }

    let pivot = rec.value(high);
    rec.set_state(high, ElementState::Pivot);
    rec.highlight(vec![high], format!("Choosing pivot {pivot}"))?;

    let p = partition(rec, low, high)?;
    if p > low {
        if p - 1 > low {
            rec.highlight((low..p).collect(), format!("Sorting left part [{low}..{}]", p - 1))?;
        }
        sort_range(rec, low, p - 1)?;
    }
    if p < high {
        if p + 1 < high {
            rec.highlight(
                (p + 1..=high).collect(),
                format!("Sorting right part [{}..{high}]", p + 1),
            )?;
        }
        sort_range(rec, p + 1, high)?;
    }
    Ok(())
}

/// Partition `[low, high]` around the value at `high`; returns its final slot.
fn partition(rec: &mut StepRecorder<'_>, low: usize, high: usize) -> SortResult<usize> {
    let pivot = rec.value(high);
    rec.highlight(
        (low..=high).collect(),
        format!("Partitioning [{low}..{high}] around {pivot}"),
    )?;

    let mut store = low;
    for j in low..high {
        let value = rec.value(j);
        rec.set_state(j, ElementState::Comparing);
        rec.set_state(high, ElementState::Pivot);
        rec.compare(vec![j, high], format!("Comparing {value} with pivot {pivot}"))?;

        if value <= pivot {
            if store != j {
                let other = rec.value(store);
                rec.swap(store, j, format!("Swapping {value} and {other}"))?;
            }
            rec.set_state(store, ElementState::Normal);
            rec.set_state(j, ElementState::Normal);
            store += 1;
        } else {
            rec.set_state(j, ElementState::Normal);
        }
    }

    if store != high {
        let other = rec.value(store);
        rec.swap(store, high, format!("Moving pivot {pivot} past {other}"))?;
    }
    rec.mark_sorted(store);
    rec.highlight(vec![store], format!("Pivot {pivot} is in its final position"))?;
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::RunControl;
    use sk_common::Element;

    #[test]
    fn singleton_ranges_are_marked_sorted() {
        let control = RunControl::default();
        control.try_begin_run();
        let mut rec = StepRecorder::new(Element::from_values(&[3, 1, 2]), &control, 500);
        QuickSort.record(&mut rec).unwrap();

        let values: Vec<i64> = rec.elements().iter().map(|e| e.value).collect();
        assert_eq!(values, vec![1, 2, 3]);
        assert!(rec.elements().iter().all(|e| e.is_sorted));
    }

    #[test]
    fn handles_all_equal_values() {
        let control = RunControl::default();
        control.try_begin_run();
        let mut rec = StepRecorder::new(Element::from_values(&[4, 4, 4, 4]), &control, 500);
        QuickSort.record(&mut rec).unwrap();
        assert!(rec.elements().iter().all(|e| e.value == 4 && e.is_sorted));
    }
}
