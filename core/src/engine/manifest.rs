//! Hand-off of a run to the external runner as a JSON manifest.

use crate::acquisition::StreamSpec;
use crate::prelude::{EngineError, EngineResult, PipelineEngine, RunSummary};
use crate::telemetry::LogManager;
use crate::transforms::{MaskSource, TransformSpec};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Everything the external runner needs for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    pub label: String,
    pub stream: StreamSpec,
    pub transforms: Vec<TransformSpec>,
}

/// Engine that writes `<output_dir>/<label>.json` for the runner and web viewer.
///
/// Without an output directory the chain is only logged.
pub struct ManifestEngine {
    output_dir: Option<PathBuf>,
    logger: LogManager,
}

impl ManifestEngine {
    pub fn new<P: Into<PathBuf>>(output_dir: P) -> Self {
        Self {
            output_dir: Some(output_dir.into()),
            logger: LogManager::new(),
        }
    }

    pub fn dry_run() -> Self {
        Self {
            output_dir: None,
            logger: LogManager::new(),
        }
    }

    pub fn manifest_path(&self, label: &str) -> Option<PathBuf> {
        self.output_dir
            .as_ref()
            .map(|dir| dir.join(format!("{label}.json")))
    }
}

fn warn_on_missing_masks(chain: &[TransformSpec]) {
    for transform in chain {
        if let TransformSpec::BadchannelMask {
            mask: MaskSource::Path(path),
            ..
        } = transform
        {
            if !path.exists() {
                warn!("mask file {} does not exist on this host", path.display());
            }
        }
    }
}

fn write_manifest(path: &Path, manifest: &RunManifest) -> EngineResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| EngineError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let json = serde_json::to_string_pretty(manifest)?;
    fs::write(path, json).map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl PipelineEngine for ManifestEngine {
    fn run_for_viewer(
        &mut self,
        label: &str,
        stream: &StreamSpec,
        chain: &[TransformSpec],
    ) -> EngineResult<RunSummary> {
        if label.trim().is_empty() {
            return Err(EngineError::EmptyLabel);
        }

        self.logger.record(&format!("{label}: stream {stream}"));
        self.logger.record_chain(label, chain);
        warn_on_missing_masks(chain);

        let manifest_path = self.manifest_path(label);
        if let Some(path) = &manifest_path {
            let manifest = RunManifest {
                label: label.to_string(),
                stream: stream.clone(),
                transforms: chain.to_vec(),
            };
            write_manifest(path, &manifest)?;
            self.logger
                .record(&format!("{label}: manifest written to {}", path.display()));
        }

        Ok(RunSummary {
            label: label.to_string(),
            transform_count: chain.len(),
            manifest_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquisition::stream_from_file_list;
    use crate::chains::transform_chain;
    use crate::params::{ParameterConfig, TransformParameters};

    fn chain() -> Vec<TransformSpec> {
        let params = TransformParameters::new(ParameterConfig {
            plot_type: Some("web_viewer".into()),
            mask_path: Some("rfi.dat".into()),
            ..Default::default()
        })
        .unwrap();
        transform_chain(&params)
    }

    #[test]
    fn manifest_is_written_under_label() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = ManifestEngine::new(dir.path().join("runs"));
        let stream = stream_from_file_list(["a.h5", "b.h5"], 1024).unwrap();
        let chain = chain();

        let summary = engine.run_for_viewer("s2", &stream, &chain).unwrap();
        let path = dir.path().join("runs").join("s2.json");
        assert_eq!(summary.manifest_path.as_deref(), Some(path.as_path()));
        assert_eq!(summary.transform_count, 38);

        let written: RunManifest =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.label, "s2");
        assert_eq!(written.stream, stream);
        assert_eq!(written.transforms, chain);
    }

    #[test]
    fn dry_run_writes_nothing() {
        let mut engine = ManifestEngine::dry_run();
        let stream = stream_from_file_list(["a.h5"], 1024).unwrap();
        let summary = engine.run_for_viewer("probe", &stream, &chain()).unwrap();
        assert_eq!(summary.manifest_path, None);
        assert_eq!(summary.transform_count, 38);
    }

    #[test]
    fn empty_label_is_rejected() {
        let mut engine = ManifestEngine::dry_run();
        let stream = stream_from_file_list(["a.h5"], 1024).unwrap();
        assert!(matches!(
            engine.run_for_viewer("  ", &stream, &[]),
            Err(EngineError::EmptyLabel)
        ));
    }
}
