//! Non-comparison (distribution) strategies.
//!
//! Values are signed; each strategy maps them to unsigned keys relative to a
//! base before indexing counters or buckets.

pub mod bucket;
pub mod counting;
pub mod radix;

pub use bucket::BucketSort;
pub use counting::CountingSort;
pub use radix::RadixSort;

/// Non-negative key of `value` relative to `base` (`value >= base`).
pub(crate) fn key(value: i64, base: i64) -> u64 {
    value.abs_diff(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_spans_full_i64_range() {
        assert_eq!(key(5, 5), 0);
        assert_eq!(key(3, -2), 5);
        assert_eq!(key(i64::MAX, i64::MIN), u64::MAX);
    }
}
