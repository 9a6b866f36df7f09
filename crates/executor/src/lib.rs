//! `sk-executor` — Orchestration around the sorting engine.
//!
//! Provides:
//! - **Coordinator**: `SortingExecutor` (one sort system-wide, pause/resume/stop/reset, phase)
//! - **Background runs**: `SortHandle` and the `SortEvent` stream
//! - **Persistence**: `StepStore` trait, `MemoryStepStore`, `JsonFileStepStore`
//! - **Inputs**: `ArrayGenerator` and `ArrayKind`

pub mod executor;
pub mod generator;
pub mod session;
pub mod store;

pub use executor::{ExecutorPhase, SortOutcome, SortingExecutor};
pub use generator::{ArrayGenerator, ArrayKind, DEFAULT_RANDOM_MAX, DEFAULT_RANDOM_MIN};
pub use session::{SortEvent, SortHandle};
pub use store::{
    JsonFileStepStore, MemoryStepStore, StepStore, StoreError, StoreResult, STEP_ARCHIVE_VERSION,
};
