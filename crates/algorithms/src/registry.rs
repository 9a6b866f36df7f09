//! Lazily populated cache of sorters, one per algorithm kind.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use sk_common::{AlgorithmKind, EngineConfig, SortResult};
use tracing::{debug, info};

use crate::comparison::{
    BubbleSort, HeapSort, InsertionSort, MergeSort, QuickSort, SelectionSort, ShellSort,
};
use crate::distribution::{BucketSort, CountingSort, RadixSort};
use crate::sorter::Sorter;
use crate::traits::SortAlgorithm;

/// Construct the built-in strategy for `kind`.
pub fn builtin(kind: AlgorithmKind) -> Box<dyn SortAlgorithm> {
    match kind {
        AlgorithmKind::BubbleSort => Box::new(BubbleSort),
        AlgorithmKind::SelectionSort => Box::new(SelectionSort),
        AlgorithmKind::InsertionSort => Box::new(InsertionSort),
        AlgorithmKind::MergeSort => Box::new(MergeSort),
        AlgorithmKind::QuickSort => Box::new(QuickSort),
        AlgorithmKind::HeapSort => Box::new(HeapSort),
        AlgorithmKind::ShellSort => Box::new(ShellSort),
        AlgorithmKind::CountingSort => Box::new(CountingSort),
        AlgorithmKind::BucketSort => Box::new(BucketSort),
        AlgorithmKind::RadixSort => Box::new(RadixSort),
    }
}

/// Maps algorithm identifiers to shared [`Sorter`] instances.
///
/// Repeated lookups of the same kind return the same instance until
/// [`clear_cache`](Self::clear_cache) is called.
pub struct AlgorithmRegistry {
    config: EngineConfig,
    sorters: Mutex<HashMap<AlgorithmKind, Arc<Sorter>>>,
}

impl AlgorithmRegistry {
    pub fn new(config: EngineConfig) -> Self {
        info!(
            available = AlgorithmKind::ALL.len(),
            "Algorithm registry created"
        );
        Self {
            config,
            sorters: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get the cached sorter for `kind`, creating it on first use.
    pub fn get(&self, kind: AlgorithmKind) -> Arc<Sorter> {
        let mut sorters = self.sorters.lock();
        let sorter = sorters.entry(kind).or_insert_with(|| {
            debug!(algorithm = %kind, "Instantiating sorter");
            Arc::new(Sorter::new(builtin(kind), self.config.clone()))
        });
        Arc::clone(sorter)
    }

    /// Look up by string identifier (e.g. `"quick_sort"`).
    pub fn get_by_id(&self, id: &str) -> SortResult<Arc<Sorter>> {
        let kind: AlgorithmKind = id.parse()?;
        Ok(self.get(kind))
    }

    /// Install `algorithm` under its kind, replacing any cached sorter.
    pub fn insert(&self, algorithm: Box<dyn SortAlgorithm>) -> Arc<Sorter> {
        let kind = algorithm.kind();
        let sorter = Arc::new(Sorter::new(algorithm, self.config.clone()));
        self.sorters.lock().insert(kind, Arc::clone(&sorter));
        debug!(algorithm = %kind, "Sorter installed");
        sorter
    }

    /// Every supported kind, whether cached or not.
    pub fn all(&self) -> Vec<AlgorithmKind> {
        AlgorithmKind::ALL.to_vec()
    }

    pub fn comparison_based(&self) -> Vec<AlgorithmKind> {
        AlgorithmKind::comparison_based()
    }

    pub fn non_comparison(&self) -> Vec<AlgorithmKind> {
        AlgorithmKind::non_comparison()
    }

    /// Kinds with a live cached sorter, in declaration order.
    pub fn cached_kinds(&self) -> Vec<AlgorithmKind> {
        let mut kinds: Vec<AlgorithmKind> = self.sorters.lock().keys().copied().collect();
        kinds.sort();
        kinds
    }

    pub fn len(&self) -> usize {
        self.sorters.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorters.lock().is_empty()
    }

    /// Drop every cached sorter. Later lookups create fresh instances.
    pub fn clear_cache(&self) {
        let mut sorters = self.sorters.lock();
        let dropped = sorters.len();
        sorters.clear();
        debug!(dropped, "Sorter cache cleared");
    }

    /// Reset the run control of every cached sorter.
    pub fn reset_all(&self) {
        for sorter in self.sorters.lock().values() {
            sorter.reset();
        }
    }
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
