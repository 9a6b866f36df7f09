use sk_common::{AlgorithmKind, ElementState, SortResult};

use crate::recorder::StepRecorder;
use crate::traits::SortAlgorithm;

/// Adjacent compare-and-swap passes with early exit on a swap-free pass.
pub struct BubbleSort;

impl SortAlgorithm for BubbleSort {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::BubbleSort
    }

    fn record(&self, rec: &mut StepRecorder<'_>) -> SortResult<()> {
        let n = rec.len();
        rec.highlight(Vec::new(), "Starting bubble sort")?;

        for pass in 0..n {
            rec.highlight(vec![pass], format!("Pass {}", pass + 1))?;
            let mut swapped = false;

            for j in 0..n - pass - 1 {
                let (left, right) = (rec.value(j), rec.value(j + 1));
                rec.set_state(j, ElementState::Comparing);
                rec.set_state(j + 1, ElementState::Comparing);
                rec.compare(vec![j, j + 1], format!("Comparing {left} and {right}"))?;

                if left > right {
                    rec.swap(j, j + 1, format!("Swapping {left} and {right}"))?;
                    swapped = true;
                } else {
                    rec.set_state(j, ElementState::Normal);
                    rec.set_state(j + 1, ElementState::Normal);
                }
            }

            let settled = n - pass - 1;
            rec.mark_sorted(settled);
            let value = rec.value(settled);
            rec.highlight(
                vec![settled],
                format!("{value} is in its final position"),
            )?;

            if !swapped {
                for k in 0..settled {
                    rec.mark_sorted(k);
                }
                rec.highlight(
                    (0..settled).collect(),
                    "No swaps in this pass, the array is sorted",
                )?;
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::RunControl;
    use sk_common::{Element, StepType};

    fn run(values: &[i64]) -> (Vec<i64>, Vec<sk_common::Step>) {
        let control = RunControl::default();
        control.try_begin_run();
        let mut rec = StepRecorder::new(Element::from_values(values), &control, 500);
        BubbleSort.record(&mut rec).unwrap();
        let values = rec.elements().iter().map(|e| e.value).collect();
        (values, rec.into_steps())
    }

    #[test]
    fn sorts_reverse_input() {
        let (values, steps) = run(&[5, 4, 3, 2, 1]);
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
        let swaps = steps.iter().filter(|s| s.step_type == StepType::Swap).count();
        assert_eq!(swaps, 10);
    }

    #[test]
    fn sorted_input_exits_after_one_pass() {
        let (_, steps) = run(&[1, 2, 3, 4]);
        let compares = steps.iter().filter(|s| s.step_type == StepType::Compare).count();
        assert_eq!(compares, 3);
        assert!(steps.iter().all(|s| s.step_type != StepType::Swap));
    }
}
