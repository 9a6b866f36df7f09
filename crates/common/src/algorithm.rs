//! Algorithm identifiers, grouping and complexity metadata.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SortError;

/// How an algorithm orders its input.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlgorithmCategory {
    /// Orders elements only through pairwise comparisons.
    Comparison,
    /// Distributes elements by key (counts, buckets, digits).
    NonComparison,
}

/// Asymptotic cost summary shown next to an algorithm.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Complexity {
    pub time_best: &'static str,
    pub time_average: &'static str,
    pub time_worst: &'static str,
    pub space: &'static str,
    /// Equal values keep their input order.
    pub stable: bool,
}

/// The ten supported algorithms.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmKind {
    BubbleSort,
    SelectionSort,
    InsertionSort,
    ShellSort,
    MergeSort,
    QuickSort,
    HeapSort,
    CountingSort,
    BucketSort,
    RadixSort,
}

impl AlgorithmKind {
    /// Every algorithm, in presentation order.
    pub const ALL: [AlgorithmKind; 10] = [
        Self::BubbleSort,
        Self::SelectionSort,
        Self::InsertionSort,
        Self::ShellSort,
        Self::MergeSort,
        Self::QuickSort,
        Self::HeapSort,
        Self::CountingSort,
        Self::BucketSort,
        Self::RadixSort,
    ];

    /// Stable identifier used in configuration and persisted data.
    pub fn id(self) -> &'static str {
        match self {
            Self::BubbleSort => "bubble_sort",
            Self::SelectionSort => "selection_sort",
            Self::InsertionSort => "insertion_sort",
            Self::ShellSort => "shell_sort",
            Self::MergeSort => "merge_sort",
            Self::QuickSort => "quick_sort",
            Self::HeapSort => "heap_sort",
            Self::CountingSort => "counting_sort",
            Self::BucketSort => "bucket_sort",
            Self::RadixSort => "radix_sort",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::BubbleSort => "Bubble Sort",
            Self::SelectionSort => "Selection Sort",
            Self::InsertionSort => "Insertion Sort",
            Self::ShellSort => "Shell Sort",
            Self::MergeSort => "Merge Sort",
            Self::QuickSort => "Quick Sort",
            Self::HeapSort => "Heap Sort",
            Self::CountingSort => "Counting Sort",
            Self::BucketSort => "Bucket Sort",
            Self::RadixSort => "Radix Sort",
        }
    }

    pub fn category(self) -> AlgorithmCategory {
        match self {
            Self::CountingSort | Self::BucketSort | Self::RadixSort => {
                AlgorithmCategory::NonComparison
            }
            _ => AlgorithmCategory::Comparison,
        }
    }

    /// Whether the final arrangement preserves the input order of equal values.
    pub fn is_stable(self) -> bool {
        self.complexity().stable
    }

    pub fn complexity(self) -> Complexity {
        let (time_best, time_average, time_worst, space, stable) = match self {
            Self::BubbleSort => ("O(n)", "O(n²)", "O(n²)", "O(1)", true),
            Self::SelectionSort => ("O(n²)", "O(n²)", "O(n²)", "O(1)", false),
            Self::InsertionSort => ("O(n)", "O(n²)", "O(n²)", "O(1)", true),
            Self::ShellSort => ("O(n log n)", "O(n^1.3)", "O(n²)", "O(1)", false),
            Self::MergeSort => ("O(n log n)", "O(n log n)", "O(n log n)", "O(n)", true),
            Self::QuickSort => ("O(n log n)", "O(n log n)", "O(n²)", "O(log n)", false),
            Self::HeapSort => ("O(n log n)", "O(n log n)", "O(n log n)", "O(1)", false),
            Self::CountingSort => ("O(n + k)", "O(n + k)", "O(n + k)", "O(k)", true),
            Self::BucketSort => ("O(n + k)", "O(n + k)", "O(n²)", "O(n + k)", true),
            Self::RadixSort => ("O(d(n + k))", "O(d(n + k))", "O(d(n + k))", "O(n + k)", true),
        };
        Complexity {
            time_best,
            time_average,
            time_worst,
            space,
            stable,
        }
    }

    /// The seven comparison-based algorithms.
    pub fn comparison_based() -> Vec<AlgorithmKind> {
        Self::ALL
            .into_iter()
            .filter(|k| k.category() == AlgorithmCategory::Comparison)
            .collect()
    }

    /// The three distribution (non-comparison) algorithms.
    pub fn non_comparison() -> Vec<AlgorithmKind> {
        Self::ALL
            .into_iter()
            .filter(|k| k.category() == AlgorithmCategory::NonComparison)
            .collect()
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for AlgorithmKind {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.id() == s)
            .ok_or_else(|| SortError::AlgorithmNotSupported { id: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_roundtrip_through_from_str() {
        for kind in AlgorithmKind::ALL {
            let parsed: AlgorithmKind = kind.id().parse().unwrap();
            assert_eq!(parsed, kind);
            assert_eq!(kind.to_string(), kind.id());
        }
    }

    #[test]
    fn unknown_id_is_not_supported() {
        let err = "bogo_sort".parse::<AlgorithmKind>().unwrap_err();
        assert!(matches!(err, SortError::AlgorithmNotSupported { ref id } if id == "bogo_sort"));
    }

    #[test]
    fn grouping_counts() {
        assert_eq!(AlgorithmKind::comparison_based().len(), 7);
        assert_eq!(
            AlgorithmKind::non_comparison(),
            vec![
                AlgorithmKind::CountingSort,
                AlgorithmKind::BucketSort,
                AlgorithmKind::RadixSort
            ]
        );
    }

    #[test]
    fn stability_classes() {
        let stable: Vec<_> = AlgorithmKind::ALL
            .into_iter()
            .filter(|k| k.is_stable())
            .collect();
        assert_eq!(
            stable,
            vec![
                AlgorithmKind::BubbleSort,
                AlgorithmKind::InsertionSort,
                AlgorithmKind::MergeSort,
                AlgorithmKind::CountingSort,
                AlgorithmKind::BucketSort,
                AlgorithmKind::RadixSort,
            ]
        );
    }

    #[test]
    fn serde_uses_id_strings() {
        let json = serde_json::to_string(&AlgorithmKind::QuickSort).unwrap();
        assert_eq!(json, "\"quick_sort\"");
    }
}
