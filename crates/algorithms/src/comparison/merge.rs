use sk_common::{AlgorithmKind, Element, ElementState, SortResult};

use crate::recorder::StepRecorder;
use crate::traits::SortAlgorithm;

/// Top-down merge sort. Ties take from the left run, so the sort is stable.
pub struct MergeSort;

impl SortAlgorithm for MergeSort {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::MergeSort
    }

    fn record(&self, rec: &mut StepRecorder<'_>) -> SortResult<()> {
        rec.highlight(Vec::new(), "Starting merge sort")?;
        let last = rec.len() - 1;
        split(rec, 0, last)
    }
}

fn split(rec: &mut StepRecorder<'_>, left: usize, right: usize) -> SortResult<()> {
    if left == right {
        rec.mark_sorted(left);
        let value = rec.value(left);
        rec.highlight(vec![left], format!("{value} is a single-element run"))?;
        return Ok(());
    }

    let mid = left + (right - left) / 2;
    rec.highlight(
        (left..=right).collect(),
        format!("Splitting [{left}..{right}] at {mid}"),
    )?;
    split(rec, left, mid)?;
    split(rec, mid + 1, right)?;
    merge(rec, left, mid, right)
}

fn merge(rec: &mut StepRecorder<'_>, left: usize, mid: usize, right: usize) -> SortResult<()> {
    let left_run: Vec<Element> = rec.elements()[left..=mid].to_vec();
    let right_run: Vec<Element> = rec.elements()[mid + 1..=right].to_vec();
    rec.highlight(
        (left..=right).collect(),
        format!("Merging [{left}..{mid}] with [{}..{right}]", mid + 1),
    )?;

    let (mut i, mut j, mut k) = (0, 0, left);
    while i < left_run.len() && j < right_run.len() {
        let (a, b) = (&left_run[i], &right_run[j]);
        // The right candidate still sits in its slot. The left one may only
        // live in the buffer once earlier writes covered its slot.
        let slots = set_state_by_id(rec, left, right, &[a.id, b.id], ElementState::Comparing);
        rec.compare(slots, format!("Comparing {} and {}", a.value, b.value))?;
        set_state_by_id(rec, left, right, &[a.id, b.id], ElementState::Normal);

        let chosen = if a.value <= b.value {
            i += 1;
            left_run[i - 1].clone()
        } else {
            j += 1;
            right_run[j - 1].clone()
        };
        let value = chosen.value;
        rec.place(k, chosen, format!("Placing {value} at position {k}"))?;
        k += 1;
    }

    for element in left_run[i..].iter().chain(&right_run[j..]) {
        let value = element.value;
        rec.place(k, element.clone(), format!("Copying remaining {value} to position {k}"))?;
        k += 1;
    }

    for index in left..=right {
        rec.mark_sorted(index);
    }
    rec.highlight(
        (left..=right).collect(),
        format!("Merged [{left}..{right}]"),
    )
}

fn set_state_by_id(
    rec: &mut StepRecorder<'_>,
    left: usize,
    right: usize,
    ids: &[usize],
    state: ElementState,
) -> Vec<usize> {
    let slots: Vec<usize> = (left..=right)
        .filter(|&index| ids.contains(&rec.element(index).id))
        .collect();
    for &index in &slots {
        rec.set_state(index, state);
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::RunControl;
    use sk_common::StepType;

    #[test]
    fn merges_with_left_bias_on_ties() {
        let control = RunControl::default();
        control.try_begin_run();
        let mut rec = StepRecorder::new(Element::from_values(&[2, 1, 2, 1]), &control, 500);
        MergeSort.record(&mut rec).unwrap();

        let ids: Vec<usize> = rec.elements().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3, 0, 2]);
        assert!(rec
            .steps()
            .iter()
            .any(|s| s.step_type == StepType::Move));
    }

    #[test]
    fn every_snapshot_keeps_full_length() {
        let control = RunControl::default();
        control.try_begin_run();
        let mut rec = StepRecorder::new(Element::from_values(&[5, 9, 1, 7, 3]), &control, 500);
        MergeSort.record(&mut rec).unwrap();
        assert!(rec.steps().iter().all(|s| s.array.len() == 5));
    }

    #[test]
    fn compare_indices_point_at_the_compared_elements() {
        let control = RunControl::default();
        control.try_begin_run();
        let mut rec =
            StepRecorder::new(Element::from_values(&[6, 2, 8, 1, 9, 3, 7]), &control, 500);
        MergeSort.record(&mut rec).unwrap();

        let compares: Vec<_> = rec
            .steps()
            .iter()
            .filter(|s| s.step_type == StepType::Compare)
            .collect();
        assert!(!compares.is_empty());
        for step in compares {
            assert!(!step.indices.is_empty());
            for &index in &step.indices {
                assert_eq!(step.array[index].state, ElementState::Comparing);
            }
        }
    }
}
