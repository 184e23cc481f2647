//! Transform-chain assembly for the CHIME/FRB RFI mitigation pipelines.
//!
//! The streaming engine, the clipping/detrending kernels and the bonsai
//! dedispersion search all live in external libraries. This crate builds the
//! descriptions those libraries consume: which files to stream, which
//! transforms to run and in what order, and with which parameters.

pub mod acquisition;
pub mod chains;
pub mod engine;
pub mod params;
pub mod prelude;
pub mod telemetry;
pub mod transforms;

pub use prelude::{Axis, ConfigError, PipelineEngine, RunSummary};
