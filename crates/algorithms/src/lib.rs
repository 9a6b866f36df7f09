//! `sk-algorithms` — Step-recording sorting strategies and their run control.
//!
//! Provides:
//! - **Strategies**: seven comparison sorts and three distribution sorts, each
//!   implementing [`SortAlgorithm`]
//! - **Recording**: [`StepRecorder`] (working array + step list, checkpointed appends)
//! - **Control**: [`RunControl`] (running/paused/stopped flags, blocking pause)
//! - **Execution**: [`Sorter`] (one strategy + one control, run boundaries)
//! - **Registry**: [`AlgorithmRegistry`] (lazily cached sorters by kind)

pub mod comparison;
pub mod control;
pub mod distribution;
pub mod recorder;
pub mod registry;
pub mod sorter;
pub mod traits;

pub use control::{Halted, RunControl, RunFlags, RunToken};
pub use recorder::{StepRecorder, StepSink};
pub use registry::{builtin, AlgorithmRegistry};
pub use sorter::{RunOptions, SortRun, Sorter};
pub use traits::SortAlgorithm;
