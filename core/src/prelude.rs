use crate::acquisition::StreamSpec;
use crate::transforms::TransformSpec;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Array axis a transform operates along.
///
/// Intensity chunks are laid out as `[nfreq, nt]`, so frequency is axis 0
/// and time is axis 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Freq,
    Time,
}

/// Rejected transform parameters.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("plot_type='{0}' is unrecognized (expected 'big' or 'web_viewer')")]
    UnknownPlotType(String),
    #[error(
        "if plot_type is unspecified, then either all or none of \
         (plot_downsample_nt, plot_nxpix, plot_nypix, plot_nzoom) must be specified; missing {missing:?}"
    )]
    PartialPlotParameters { missing: Vec<&'static str> },
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field}={value} is too large")]
    TooLarge { field: &'static str, value: usize },
    #[error("mask interval [{lo}, {hi}] is empty or inverted")]
    InvalidMaskInterval { lo: f64, hi: f64 },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Failure while handing a run to the execution engine.
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    #[error("run label must be non-empty")]
    EmptyLabel,
    #[error("writing run manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("serializing run manifest: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// What an engine reports back once a run has been handed off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub label: String,
    pub transform_count: usize,
    pub manifest_path: Option<PathBuf>,
}

/// Boundary to the external pipeline runner.
///
/// Implementors interpret the transform chain against the stream and write
/// viewer artifacts under paths derived from `label`.
pub trait PipelineEngine {
    fn run_for_viewer(
        &mut self,
        label: &str,
        stream: &StreamSpec,
        chain: &[TransformSpec],
    ) -> EngineResult<RunSummary>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_serializes_by_name() {
        assert_eq!(serde_json::to_string(&Axis::Freq).unwrap(), "\"freq\"");
        assert_eq!(serde_json::to_string(&Axis::Time).unwrap(), "\"time\"");
    }

    #[test]
    fn partial_plot_error_names_missing_fields() {
        let err = ConfigError::PartialPlotParameters {
            missing: vec!["plot_nzoom"],
        };
        assert!(err.to_string().contains("plot_nzoom"));
    }
}
