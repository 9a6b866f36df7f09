use sk_common::{AlgorithmKind, Element, ElementState, SortError, SortResult};

use crate::distribution::key;
use crate::recorder::StepRecorder;
use crate::traits::SortAlgorithm;

/// Counting sort over the value range `[min, max]`.
///
/// Fails with [`SortError::ValueSpanTooLarge`] before recording anything when
/// `max - min + 1` exceeds the recorder's counting limit.
pub struct CountingSort;

impl SortAlgorithm for CountingSort {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::CountingSort
    }

    fn record(&self, rec: &mut StepRecorder<'_>) -> SortResult<()> {
        let n = rec.len();
        let Some((min, max)) = rec.bounds() else {
            return Ok(());
        };
        let limit = rec.max_counting_span();
        let span = match key(max, min).checked_add(1) {
            Some(span) if span <= limit => span as usize,
            _ => return Err(SortError::ValueSpanTooLarge { min, max, limit }),
        };

        rec.highlight(Vec::new(), "Starting counting sort")?;
        rec.highlight(
            Vec::new(),
            format!("Values range from {min} to {max}: {span} counters"),
        )?;

        let mut counts = vec![0usize; span];
        rec.highlight(Vec::new(), "Counting occurrences")?;
        for i in 0..n {
            let value = rec.value(i);
            let slot = key(value, min) as usize;
            rec.set_state(i, ElementState::Comparing);
            rec.compare(vec![i], format!("Counting {value}"))?;
            counts[slot] += 1;
            rec.set_state(i, ElementState::Normal);
            rec.highlight(
                vec![i],
                format!("{value} seen {} time(s)", counts[slot]),
            )?;
        }

        rec.highlight(Vec::new(), "Accumulating counts into end positions")?;
        for slot in 1..span {
            counts[slot] += counts[slot - 1];
        }

        rec.highlight(Vec::new(), "Placing elements into the output")?;
        let mut output: Vec<Option<Element>> = vec![None; n];
        for i in (0..n).rev() {
            let value = rec.value(i);
            let slot = key(value, min) as usize;
            let target = counts[slot] - 1;
            rec.set_state(i, ElementState::Comparing);
            rec.compare(vec![i], format!("{value} goes to position {target}"))?;

            let mut placed = rec.element(i).clone();
            placed.position = target;
            placed.mark_sorted();
            output[target] = Some(placed);
            counts[slot] -= 1;

            rec.set_state(i, ElementState::Normal);
            rec.moved(vec![target], format!("Placed {value} at position {target}"))?;
        }

        // Every slot is filled exactly once above.
        rec.replace_all(output.into_iter().flatten().collect());
        rec.highlight((0..n).collect(), "Copied output back into the array")?;
        Ok(())
    }
}
