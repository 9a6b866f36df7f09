//! `sk-common` — Shared types, configuration and errors for the sorting step engine.
//!
//! This crate is the foundation that the algorithm and executor crates depend on.
//! It defines the core abstractions:
//!
//! - **Model**: `Element`, `ElementState`, `Step`, `StepType` (recorded replay data)
//! - **Algorithms**: `AlgorithmKind`, `AlgorithmCategory`, `Complexity` (identifiers and metadata)
//! - **Stats**: `RunStats` (comparison/swap/move counters derived from a step sequence)
//! - **Config**: `EngineConfig` (pacing, pause polling, persistence, allocation limits)
//! - **Errors**: `SortError`, `SortErrorKind` (thiserror-based)

pub mod algorithm;
pub mod config;
pub mod element;
pub mod error;
pub mod stats;
pub mod step;

// Re-export commonly used items at crate root
pub use algorithm::{AlgorithmCategory, AlgorithmKind, Complexity};
pub use config::{EngineConfig, MAX_DELAY_MS, MIN_DELAY_MS};
pub use element::{Element, ElementState};
pub use error::{SortError, SortErrorKind, SortResult};
pub use stats::RunStats;
pub use step::{Step, StepType, DEFAULT_STEP_DELAY_MS, DEFAULT_TERMINAL_DELAY_MS};
