use anyhow::Context;
use rficore::acquisition::{
    catalog::incoherent_pathfinder, sample, stream_from_directory, stream_from_file_list,
    stream_from_time_range, Acquisition, AcquisitionResult, StreamSpec,
};
use rficore::params::ParameterConfig;
use rficore::transforms::TreeVariant;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_nt_chunk() -> usize {
    1024
}

/// How a run picks its input files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum AcquisitionConfig {
    Named {
        name: Acquisition,
    },
    Sample {
        pattern: String,
        start: usize,
        end: usize,
    },
    Files {
        filenames: Vec<PathBuf>,
        #[serde(default = "default_nt_chunk")]
        nt_chunk: usize,
    },
    Directory {
        path: PathBuf,
    },
    TimeRange {
        path: PathBuf,
        t0: f64,
        t1: f64,
    },
    Pathfinder {
        search_name: String,
        sample_index: usize,
    },
}

impl AcquisitionConfig {
    pub fn resolve(&self) -> AcquisitionResult<StreamSpec> {
        match self {
            AcquisitionConfig::Named { name } => name.stream(),
            AcquisitionConfig::Sample {
                pattern,
                start,
                end,
            } => sample(pattern, *start, *end),
            AcquisitionConfig::Files {
                filenames,
                nt_chunk,
            } => stream_from_file_list(filenames.iter().cloned(), *nt_chunk),
            AcquisitionConfig::Directory { path } => Ok(stream_from_directory(path.clone())),
            AcquisitionConfig::TimeRange { path, t0, t1 } => {
                stream_from_time_range(path.clone(), *t0, *t1)
            }
            AcquisitionConfig::Pathfinder {
                search_name,
                sample_index,
            } => incoherent_pathfinder(search_name, *sample_index),
        }
    }
}

/// Synthetic pulse injected ahead of the RFI chain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InjectorConfig {
    pub snr: f64,
    pub undispersed_arrival_time: f64,
    pub sample_rms: f64,
    pub dm: f64,
}

/// Dedispersion search appended after the RFI chain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    pub tree: TreeVariant,
    pub version: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkflowConfig {
    pub label: String,
    pub acquisition: AcquisitionConfig,
    #[serde(default)]
    pub parameters: ParameterConfig,
    #[serde(default)]
    pub injector: Option<InjectorConfig>,
    #[serde(default)]
    pub search: Option<SearchConfig>,
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }
}
