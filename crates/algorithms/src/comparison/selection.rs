use sk_common::{AlgorithmKind, ElementState, SortResult};

use crate::recorder::StepRecorder;
use crate::traits::SortAlgorithm;

/// Repeatedly select the minimum of the unsorted suffix and swap it into place.
pub struct SelectionSort;

impl SortAlgorithm for SelectionSort {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::SelectionSort
    }

    fn record(&self, rec: &mut StepRecorder<'_>) -> SortResult<()> {
        let n = rec.len();
        rec.highlight(Vec::new(), "Starting selection sort")?;

        for i in 0..n - 1 {
            let mut min = i;
            rec.set_state(i, ElementState::Min);
            let start = rec.value(i);
            rec.highlight(
                vec![i],
                format!("Pass {}: {start} is the current minimum", i + 1),
            )?;

            for j in i + 1..n {
                let (candidate, current) = (rec.value(j), rec.value(min));
                rec.set_state(j, ElementState::Comparing);
                rec.set_state(min, ElementState::Comparing);
                rec.compare(
                    vec![j, min],
                    format!("Comparing {candidate} with minimum {current}"),
                )?;

                if candidate < current {
                    rec.set_state(min, ElementState::Normal);
                    min = j;
                    rec.set_state(min, ElementState::Min);
                    rec.highlight(vec![min], format!("New minimum {candidate}"))?;
                } else {
                    rec.set_state(j, ElementState::Normal);
                    rec.set_state(min, ElementState::Min);
                }
            }

            if min != i {
                let (a, b) = (rec.value(i), rec.value(min));
                rec.swap(i, min, format!("Swapping {a} and {b}"))?;
            }
            rec.mark_sorted(i);
            let value = rec.value(i);
            rec.highlight(vec![i], format!("{value} is in its final position"))?;
        }
        rec.mark_sorted(n - 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::RunControl;
    use sk_common::{Element, StepType};

    #[test]
    fn swaps_at_most_n_minus_one_times() {
        let control = RunControl::default();
        control.try_begin_run();
        let mut rec = StepRecorder::new(Element::from_values(&[4, 3, 2, 1, 0]), &control, 500);
        SelectionSort.record(&mut rec).unwrap();

        let values: Vec<i64> = rec.elements().iter().map(|e| e.value).collect();
        assert_eq!(values, vec![0, 1, 2, 3, 4]);
        let swaps = rec
            .steps()
            .iter()
            .filter(|s| s.step_type == StepType::Swap)
            .count();
        assert!(swaps <= 4);
    }
}
