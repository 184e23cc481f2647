use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use log::info;
use rficore::acquisition::StreamSpec;
use rficore::chains::{frb_injector, nfreq1k_3tree, nfreq1k_7tree, transform_chain};
use rficore::engine::RunManifest;
use rficore::params::TransformParameters;
use rficore::prelude::{PipelineEngine, RunSummary};
use rficore::transforms::{TransformSpec, TreeVariant};

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn label(&self) -> &str {
        &self.config.label
    }

    /// Resolves the acquisition and assembles the full chain without running it.
    pub fn prepare(&self) -> anyhow::Result<RunManifest> {
        let label = &self.config.label;
        let stream: StreamSpec = self
            .config
            .acquisition
            .resolve()
            .with_context(|| format!("selecting acquisition for {label}"))?;
        let params = TransformParameters::new(self.config.parameters.clone())
            .with_context(|| format!("building transform parameters for {label}"))?;

        let mut transforms: Vec<TransformSpec> = Vec::new();
        if let Some(injector) = &self.config.injector {
            transforms.push(frb_injector(
                injector.snr,
                injector.undispersed_arrival_time,
                injector.sample_rms,
                injector.dm,
            ));
        }
        transforms.extend(transform_chain(&params));
        if let Some(search) = &self.config.search {
            transforms.push(match search.tree {
                TreeVariant::Nfreq1k3tree => nfreq1k_3tree(&params, search.version),
                TreeVariant::Nfreq1k7tree => nfreq1k_7tree(&params, search.version),
            });
        }

        info!(
            "{}: {} transforms assembled from {}",
            label,
            transforms.len(),
            stream
        );

        Ok(RunManifest {
            label: label.clone(),
            stream,
            transforms,
        })
    }
}

/// Hands a prepared run to the engine.
pub fn launch(
    manifest: &RunManifest,
    engine: &mut dyn PipelineEngine,
) -> anyhow::Result<RunSummary> {
    engine
        .run_for_viewer(&manifest.label, &manifest.stream, &manifest.transforms)
        .with_context(|| format!("running {}", manifest.label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::config::{AcquisitionConfig, InjectorConfig, SearchConfig};
    use rficore::params::ParameterConfig;
    use rficore::engine::ManifestEngine;
    use rficore::prelude::EngineResult;
    use std::path::Path;

    #[derive(Default)]
    struct RecordingEngine {
        runs: Vec<(String, StreamSpec, Vec<TransformSpec>)>,
    }

    impl PipelineEngine for RecordingEngine {
        fn run_for_viewer(
            &mut self,
            label: &str,
            stream: &StreamSpec,
            chain: &[TransformSpec],
        ) -> EngineResult<RunSummary> {
            self.runs
                .push((label.to_string(), stream.clone(), chain.to_vec()));
            Ok(RunSummary {
                label: label.to_string(),
                transform_count: chain.len(),
                manifest_path: None,
            })
        }
    }

    fn workflow(parameters: ParameterConfig) -> WorkflowConfig {
        WorkflowConfig {
            label: "unit".into(),
            acquisition: AcquisitionConfig::Files {
                filenames: vec!["00000327.h5".into(), "00000344.h5".into()],
                nt_chunk: 1024,
            },
            parameters,
            injector: Some(InjectorConfig {
                snr: 100.0,
                undispersed_arrival_time: 531.17,
                sample_rms: 0.005,
                dm: 200.0,
            }),
            search: Some(SearchConfig {
                tree: TreeVariant::Nfreq1k3tree,
                version: 1,
            }),
        }
    }

    #[test]
    fn runner_executes_workflow() {
        let cfg = workflow(ParameterConfig {
            plot_type: Some("web_viewer".into()),
            mask_path: Some("rfi.dat".into()),
            ..Default::default()
        });
        let manifest = Runner::new(cfg).prepare().unwrap();
        let mut engine = RecordingEngine::default();
        let summary = launch(&manifest, &mut engine).unwrap();

        assert_eq!(summary.transform_count, 1 + 38 + 1);
        let (label, stream, chain) = &engine.runs[0];
        assert_eq!(label, "unit");
        assert!(matches!(stream, StreamSpec::FileList { filenames, .. } if filenames.len() == 2));
        assert_eq!(chain.first().map(TransformSpec::kind), Some("frb_injector"));
        assert_eq!(chain[1].kind(), "plotter");
        assert_eq!(chain.last().map(TransformSpec::kind), Some("dedispersion_search"));
    }

    #[test]
    fn configuration_error_fails_prepare() {
        let cfg = workflow(ParameterConfig {
            plot_nxpix: Some(256),
            ..Default::default()
        });
        let err = Runner::new(cfg).prepare().unwrap_err();
        assert!(format!("{err:#}").contains("building transform parameters for unit"));
    }

    #[test]
    fn acquisition_error_carries_context() {
        let mut cfg = workflow(ParameterConfig::default());
        cfg.acquisition = AcquisitionConfig::TimeRange {
            path: "/data".into(),
            t0: 5.0,
            t1: 1.0,
        };
        let err = Runner::new(cfg).prepare().unwrap_err();
        assert!(format!("{err:#}").contains("selecting acquisition for unit"));
    }

    #[test]
    fn shipped_workflow_prepares() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../workflows/storm_0b.yaml");
        let cfg = WorkflowConfig::load(&path).unwrap();
        let manifest = Runner::new(cfg).prepare().unwrap();

        assert_eq!(manifest.label, "storm_0b");
        assert!(matches!(
            &manifest.stream,
            StreamSpec::TimeRange { path, .. } if path.ends_with("frb_incoherent_0b")
        ));
        assert_eq!(manifest.transforms.len(), 2 + 2 * (5 * 6 + 3) + 1);
        assert_eq!(
            manifest.transforms.last().map(TransformSpec::kind),
            Some("dedispersion_search")
        );
    }

    #[test]
    fn engine_failure_carries_run_label() {
        let manifest = Runner::new(workflow(ParameterConfig::default()))
            .prepare()
            .unwrap();
        let mut engine = ManifestEngine::dry_run();
        let renamed = RunManifest {
            label: String::new(),
            ..manifest
        };
        let err = launch(&renamed, &mut engine).unwrap_err();
        assert!(format!("{err:#}").contains("run label must be non-empty"));
    }
}
