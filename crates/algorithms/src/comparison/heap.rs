use sk_common::{AlgorithmKind, ElementState, SortResult};

use crate::recorder::StepRecorder;
use crate::traits::SortAlgorithm;

/// Build a max-heap, then repeatedly move the root to the end of the array.
pub struct HeapSort;

impl SortAlgorithm for HeapSort {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::HeapSort
    }

    fn record(&self, rec: &mut StepRecorder<'_>) -> SortResult<()> {
        let n = rec.len();
        rec.highlight(Vec::new(), "Starting heap sort")?;
        rec.highlight(Vec::new(), "Building a max heap")?;

        for root in (0..n / 2).rev() {
            sift_down(rec, n, root)?;
        }
        rec.highlight((0..n).collect(), "Max heap built")?;

        for end in (1..n).rev() {
            let (max, other) = (rec.value(0), rec.value(end));
            rec.swap(0, end, format!("Moving maximum {max} to position {end} ({other} to the root)"))?;
            rec.mark_sorted(end);
            rec.highlight(vec![end], format!("{max} is in its final position"))?;
            sift_down(rec, end, 0)?;
        }
        rec.mark_sorted(0);
        Ok(())
    }
}

/// Restore the heap property below `root` within the first `heap_len` slots.
fn sift_down(rec: &mut StepRecorder<'_>, heap_len: usize, root: usize) -> SortResult<()> {
    let mut node = root;
    loop {
        let (left, right) = (2 * node + 1, 2 * node + 2);
        let mut largest = node;
        rec.set_state(node, ElementState::Comparing);
        let value = rec.value(node);
        rec.highlight(vec![node], format!("Heapifying at {value}"))?;

        for child in [left, right] {
            if child >= heap_len {
                continue;
            }
            let (current, candidate) = (rec.value(largest), rec.value(child));
            rec.set_state(child, ElementState::Comparing);
            rec.compare(
                vec![largest, child],
                format!("Comparing {current} with child {candidate}"),
            )?;
            rec.set_state(child, ElementState::Normal);
            if candidate > current {
                largest = child;
                rec.highlight(vec![child], format!("{candidate} is the new largest"))?;
            }
        }

        if largest == node {
            rec.set_state(node, ElementState::Normal);
            return Ok(());
        }

        let (parent, child) = (rec.value(node), rec.value(largest));
        rec.swap(node, largest, format!("Swapping {parent} and {child}"))?;
        node = largest;
    }
}
