use sk_common::{AlgorithmKind, Element, ElementState, SortResult};

use crate::comparison::insertion::insert_key;
use crate::distribution::key;
use crate::recorder::StepRecorder;
use crate::traits::SortAlgorithm;

/// Bucket sort with one bucket per element.
///
/// Elements are distributed by their relative position in `[min, max]`,
/// gathered back bucket by bucket, then each bucket's segment is insertion
/// sorted in place. When all values are equal everything lands in bucket 0.
pub struct BucketSort;

impl SortAlgorithm for BucketSort {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::BucketSort
    }

    fn record(&self, rec: &mut StepRecorder<'_>) -> SortResult<()> {
        let n = rec.len();
        let Some((min, max)) = rec.bounds() else {
            return Ok(());
        };
        let bucket_count = n;

        rec.highlight(Vec::new(), "Starting bucket sort")?;
        rec.highlight(Vec::new(), format!("Values range from {min} to {max}"))?;
        rec.highlight(Vec::new(), format!("Creating {bucket_count} buckets"))?;

        let mut buckets: Vec<Vec<Element>> = vec![Vec::new(); bucket_count];
        rec.highlight(Vec::new(), "Distributing elements into buckets")?;
        for i in 0..n {
            let value = rec.value(i);
            let bucket = bucket_index(value, min, max, bucket_count);
            rec.set_state(i, ElementState::Comparing);
            rec.compare(vec![i], format!("{value} belongs in bucket {bucket}"))?;
            buckets[bucket].push(rec.element(i).clone());
            rec.set_state(i, ElementState::Normal);
            rec.moved(vec![i], format!("Put {value} into bucket {bucket}"))?;
        }

        rec.highlight(Vec::new(), "Gathering buckets back into the array")?;
        let mut segments = Vec::new();
        let mut next = 0;
        for (bucket, contents) in buckets.into_iter().enumerate() {
            if contents.is_empty() {
                continue;
            }
            let start = next;
            for element in contents {
                let value = element.value;
                rec.place(next, element, format!("Bucket {bucket}: {value} to position {next}"))?;
                next += 1;
            }
            segments.push((bucket, start, next));
        }

        for (bucket, start, end) in segments {
            rec.highlight(
                (start..end).collect(),
                format!("Sorting bucket {bucket} ({} elements)", end - start),
            )?;
            for i in start + 1..end {
                insert_key(rec, start, i, 1)?;
            }
            for index in start..end {
                rec.mark_sorted(index);
            }
            rec.highlight((start..end).collect(), format!("Bucket {bucket} sorted"))?;
        }

        rec.highlight((0..n).collect(), "All buckets concatenated")?;
        Ok(())
    }
}

/// Bucket for `value`: `floor((value - min) / (max - min) * (count - 1))`.
fn bucket_index(value: i64, min: i64, max: i64, count: usize) -> usize {
    if max == min || count <= 1 {
        return 0;
    }
    let ratio = key(value, min) as f64 / key(max, min) as f64;
    let index = (ratio * (count - 1) as f64).floor() as usize;
    index.min(count - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::RunControl;

    #[test]
    fn bucket_index_spreads_range() {
        assert_eq!(bucket_index(0, 0, 100, 5), 0);
        assert_eq!(bucket_index(100, 0, 100, 5), 4);
        assert_eq!(bucket_index(50, 0, 100, 5), 2);
        assert_eq!(bucket_index(-10, -10, 10, 3), 0);
    }

    #[test]
    fn equal_values_share_bucket_zero() {
        assert_eq!(bucket_index(7, 7, 7, 4), 0);

        let control = RunControl::default();
        control.try_begin_run();
        let mut rec = StepRecorder::new(Element::from_values(&[7, 7, 7]), &control, 500);
        BucketSort.record(&mut rec).unwrap();
        let ids: Vec<usize> = rec.elements().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn snapshots_are_full_length() {
        let control = RunControl::default();
        control.try_begin_run();
        let mut rec =
            StepRecorder::new(Element::from_values(&[29, 3, 71, 45, 3, 88]), &control, 500);
        BucketSort.record(&mut rec).unwrap();
        let values: Vec<i64> = rec.elements().iter().map(|e| e.value).collect();
        assert_eq!(values, vec![3, 3, 29, 45, 71, 88]);
        assert!(rec.steps().iter().all(|s| s.array.len() == 6));
    }
}
