use sk_common::{AlgorithmKind, Element, ElementState, SortResult};

use crate::distribution::key;
use crate::recorder::StepRecorder;
use crate::traits::SortAlgorithm;

const RADIX: u64 = 10;

/// LSD radix sort, base 10.
///
/// Non-negative input is keyed by value; input containing negatives is keyed
/// by `value - min`.
pub struct RadixSort;

impl SortAlgorithm for RadixSort {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::RadixSort
    }

    fn record(&self, rec: &mut StepRecorder<'_>) -> SortResult<()> {
        let n = rec.len();
        let Some((min, max)) = rec.bounds() else {
            return Ok(());
        };
        let base = min.min(0);
        let max_key = key(max, base);

        rec.highlight(Vec::new(), "Starting radix sort")?;
        rec.highlight(
            Vec::new(),
            format!("Largest key is {max_key}: sorting digit by digit"),
        )?;

        let mut exp: u64 = 1;
        let mut digit = 1;
        while max_key / exp > 0 {
            rec.highlight(
                Vec::new(),
                format!("Sorting by digit {digit} (place value {exp})"),
            )?;
            sort_by_digit(rec, base, exp)?;

            digit += 1;
            match exp.checked_mul(RADIX) {
                Some(next) => exp = next,
                None => break,
            }
        }

        rec.mark_all_sorted();
        rec.highlight((0..n).collect(), "All digits processed")?;
        Ok(())
    }
}

/// One stable counting pass on the digit at place value `exp`.
fn sort_by_digit(rec: &mut StepRecorder<'_>, base: i64, exp: u64) -> SortResult<()> {
    let n = rec.len();
    let digit_of = |value: i64| ((key(value, base) / exp) % RADIX) as usize;

    let mut counts = [0usize; RADIX as usize];
    for i in 0..n {
        let value = rec.value(i);
        let digit = digit_of(value);
        rec.set_state(i, ElementState::Comparing);
        rec.compare(vec![i], format!("{value} has digit {digit}"))?;
        counts[digit] += 1;
        rec.set_state(i, ElementState::Normal);
        rec.highlight(vec![i], format!("Digit {digit} count is {}", counts[digit]))?;
    }

    for d in 1..counts.len() {
        counts[d] += counts[d - 1];
    }

    let mut output: Vec<Option<Element>> = vec![None; n];
    for i in (0..n).rev() {
        let value = rec.value(i);
        let digit = digit_of(value);
        let target = counts[digit] - 1;
        rec.set_state(i, ElementState::Comparing);
        rec.compare(vec![i], format!("{value} goes to position {target}"))?;

        let mut placed = rec.element(i).clone();
        placed.state = ElementState::Normal;
        output[target] = Some(placed);
        counts[digit] -= 1;

        rec.set_state(i, ElementState::Normal);
        rec.moved(vec![target], format!("Placed {value} at position {target}"))?;
    }

    // Every slot is filled exactly once above.
    rec.replace_all(output.into_iter().flatten().collect());
    rec.highlight((0..n).collect(), format!("Pass for place value {exp} complete"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::RunControl;

    fn sorted_values(values: &[i64]) -> Vec<i64> {
        let control = RunControl::default();
        control.try_begin_run();
        let mut rec = StepRecorder::new(Element::from_values(values), &control, 500);
        RadixSort.record(&mut rec).unwrap();
        rec.elements().iter().map(|e| e.value).collect()
    }

    #[test]
    fn sorts_multi_digit_values() {
        assert_eq!(
            sorted_values(&[170, 45, 75, 90, 802, 24, 2, 66]),
            vec![2, 24, 45, 66, 75, 90, 170, 802]
        );
    }

    #[test]
    fn sorts_negative_values() {
        assert_eq!(sorted_values(&[-5, 12, -100, 0, 7]), vec![-100, -5, 0, 7, 12]);
    }

    #[test]
    fn all_zero_input_needs_no_pass() {
        assert_eq!(sorted_values(&[0, 0, 0]), vec![0, 0, 0]);
    }
}
