//! The seam every sorting strategy implements.

use sk_common::{AlgorithmKind, SortResult};

use crate::recorder::StepRecorder;

/// A step-recording sorting strategy.
///
/// Implementations are stateless; all run state lives in the [`StepRecorder`]
/// and the owning sorter's run control. `record` is only called for inputs of
/// two or more elements and must leave the working array in ascending order.
/// It must not append the terminal `Sorted` step; the caller does that.
pub trait SortAlgorithm: Send + Sync {
    fn kind(&self) -> AlgorithmKind;

    /// Human-readable name (e.g. "Bubble Sort").
    fn name(&self) -> &'static str {
        self.kind().display_name()
    }

    /// Sort the recorder's working array, recording every operation.
    fn record(&self, rec: &mut StepRecorder<'_>) -> SortResult<()>;
}
