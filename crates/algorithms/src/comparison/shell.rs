use sk_common::{AlgorithmKind, ElementState, SortResult};

use crate::comparison::insertion::insert_key;
use crate::recorder::StepRecorder;
use crate::traits::SortAlgorithm;

/// Gapped insertion sort with gaps n/2, n/4, ..., 1.
pub struct ShellSort;

impl SortAlgorithm for ShellSort {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::ShellSort
    }

    fn record(&self, rec: &mut StepRecorder<'_>) -> SortResult<()> {
        let n = rec.len();
        rec.highlight(Vec::new(), "Starting shell sort")?;

        let mut gap = n / 2;
        while gap > 0 {
            rec.highlight(Vec::new(), format!("Insertion sort with gap {gap}"))?;

            for i in gap..n {
                let key = rec.value(i);
                rec.set_state(i, ElementState::Comparing);
                rec.highlight(vec![i], format!("Inserting {key} with gap {gap}"))?;
                insert_key(rec, 0, i, gap)?;
            }

            gap /= 2;
        }

        rec.mark_all_sorted();
        rec.highlight((0..n).collect(), "Gap 1 pass complete")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::RunControl;
    use sk_common::Element;

    #[test]
    fn first_gap_is_half_length() {
        let control = RunControl::default();
        control.try_begin_run();
        let mut rec =
            StepRecorder::new(Element::from_values(&[9, 8, 7, 6, 5, 4, 3, 2]), &control, 500);
        ShellSort.record(&mut rec).unwrap();

        let values: Vec<i64> = rec.elements().iter().map(|e| e.value).collect();
        assert_eq!(values, vec![2, 3, 4, 5, 6, 7, 8, 9]);
        assert!(rec
            .steps()
            .iter()
            .any(|s| s.description == "Insertion sort with gap 4"));
    }
}
