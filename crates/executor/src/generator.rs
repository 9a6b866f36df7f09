//! Test/demo input generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use sk_common::{SortError, SortResult};
use tracing::debug;

/// Value range used by [`ArrayKind::RandomDefault`].
pub const DEFAULT_RANDOM_MIN: i64 = 1;
pub const DEFAULT_RANDOM_MAX: i64 = 100;

/// Shape of a generated array.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayKind {
    /// Uniform values in `[min, max]`.
    Random { min: i64, max: i64 },
    /// Uniform values in `[1, 100]`.
    RandomDefault,
    /// `1..=size`.
    Sorted,
    /// `size..=1`.
    Reversed,
    /// `1..=size` with `size / 4` random pairwise swaps.
    PartiallySorted,
}

/// Generates input arrays from any random source.
pub struct ArrayGenerator<R = StdRng> {
    rng: R,
}

impl ArrayGenerator<StdRng> {
    /// Deterministic generator for reproducible runs.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> ArrayGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn generate(&mut self, kind: ArrayKind, size: usize) -> SortResult<Vec<i64>> {
        if size == 0 {
            return Err(SortError::InvalidArraySize { size });
        }

        let values = match kind {
            ArrayKind::Random { min, max } => {
                if min > max {
                    return Err(SortError::InvalidRange { min, max });
                }
                self.random(size, min, max)
            }
            ArrayKind::RandomDefault => self.random(size, DEFAULT_RANDOM_MIN, DEFAULT_RANDOM_MAX),
            ArrayKind::Sorted => ascending(size),
            ArrayKind::Reversed => {
                let mut values = ascending(size);
                values.reverse();
                values
            }
            ArrayKind::PartiallySorted => {
                let mut values = ascending(size);
                for _ in 0..size / 4 {
                    let a = self.rng.gen_range(0..size);
                    let b = self.rng.gen_range(0..size);
                    values.swap(a, b);
                }
                values
            }
        };

        debug!(?kind, size, "Generated array");
        Ok(values)
    }

    fn random(&mut self, size: usize, min: i64, max: i64) -> Vec<i64> {
        (0..size).map(|_| self.rng.gen_range(min..=max)).collect()
    }
}

impl Default for ArrayGenerator<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

fn ascending(size: usize) -> Vec<i64> {
    (1..=size as i64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_size_is_rejected() {
        let err = ArrayGenerator::from_seed(1)
            .generate(ArrayKind::Sorted, 0)
            .unwrap_err();
        assert_eq!(err, SortError::InvalidArraySize { size: 0 });
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = ArrayGenerator::from_seed(1)
            .generate(ArrayKind::Random { min: 10, max: 5 }, 4)
            .unwrap_err();
        assert_eq!(err, SortError::InvalidRange { min: 10, max: 5 });
        assert_eq!(err.to_string(), "Invalid range: min 10 is greater than max 5");
    }

    #[test]
    fn random_stays_in_range() {
        let mut generator = ArrayGenerator::from_seed(9);
        let values = generator
            .generate(ArrayKind::Random { min: -5, max: 5 }, 200)
            .unwrap();
        assert_eq!(values.len(), 200);
        assert!(values.iter().all(|v| (-5..=5).contains(v)));

        let defaults = generator.generate(ArrayKind::RandomDefault, 50).unwrap();
        assert!(defaults.iter().all(|v| (1..=100).contains(v)));
    }

    #[test]
    fn single_value_range() {
        let values = ArrayGenerator::from_seed(3)
            .generate(ArrayKind::Random { min: 7, max: 7 }, 5)
            .unwrap();
        assert_eq!(values, vec![7; 5]);
    }

    #[test]
    fn sorted_and_reversed() {
        let mut generator = ArrayGenerator::from_seed(0);
        assert_eq!(generator.generate(ArrayKind::Sorted, 4).unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(generator.generate(ArrayKind::Reversed, 4).unwrap(), vec![4, 3, 2, 1]);
    }

    #[test]
    fn partially_sorted_is_permutation() {
        let mut values = ArrayGenerator::from_seed(5)
            .generate(ArrayKind::PartiallySorted, 40)
            .unwrap();
        values.sort();
        assert_eq!(values, (1..=40).collect::<Vec<i64>>());
    }

    #[test]
    fn same_seed_same_output() {
        let a = ArrayGenerator::from_seed(11)
            .generate(ArrayKind::RandomDefault, 20)
            .unwrap();
        let b = ArrayGenerator::from_seed(11)
            .generate(ArrayKind::RandomDefault, 20)
            .unwrap();
        assert_eq!(a, b);
    }
}
