//! Named CHIME pathfinder acquisitions on the analysis nodes.

use crate::acquisition::stream::{
    stream_from_directory, stream_from_file_list, stream_from_time_range, StreamSpec,
};
use crate::acquisition::{AcquisitionError, AcquisitionResult};
use glob::glob;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

const FILE_NT_CHUNK: usize = 1024;
const INCOHERENT_16_09_19_DIR: &str = "/data/pathfinder/16-09-19-incoherent-without-noise-source";
const BASEBAND_26M_DIR: &str = "/data2/baseband_26m_b1937_16_04_22";
/// Root of the 17-02-08 incoherent-beam data avalanche.
pub const AVALANCHE_DIR: &str = "/data2/17-02-08-incoherent-data-avalanche";

/// Number of consecutive files in one pathfinder sample block.
pub const PATHFINDER_SAMPLE_NFILES: usize = 100;

const TOY_FILES: [&str; 2] = ["00000327.h5", "00000344.h5"];

const SMALL_FILES: [&str; 23] = [
    "00000327.h5",
    "00000344.h5",
    "00000360.h5",
    "00000376.h5",
    "00000393.h5",
    "00000409.h5",
    "00000426.h5",
    "00000442.h5",
    "00000458.h5",
    "00000475.h5",
    "00000491.h5",
    "00000508.h5",
    "00000524.h5",
    "00000540.h5",
    "00000557.h5",
    "00000573.h5",
    "00000589.h5",
    "00000606.h5",
    "00000622.h5",
    "00000639.h5",
    "00000655.h5",
    "00000671.h5",
    "00000688.h5",
];

/// Acquisitions that can be selected by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Acquisition {
    /// Two files from the 16-09-19 incoherent run; quick tests.
    #[serde(rename = "toy")]
    Toy,
    /// 23 files from the 16-09-19 incoherent run.
    #[serde(rename = "small")]
    Small,
    /// The full 16-09-19 incoherent run (~50 GB).
    #[serde(rename = "incoherent_16_09_19")]
    Incoherent160919,
    /// 1K-frequency sample of 26m baseband data on B1937+21.
    #[serde(rename = "baseband_26m_b1937_16_04_22_1k")]
    Baseband26mB1937Nfreq1k,
    /// 26m baseband data on B1937+21 with 16K upchannelization.
    #[serde(rename = "baseband_26m_b1937_16_04_22")]
    Baseband26mB1937Nfreq16k,
    /// A pulsar in an incoherent-beam acquisition.
    #[serde(rename = "ex_pulsar_search0")]
    ExPulsarSearch0,
    /// An RFI storm.
    #[serde(rename = "ex_storm_0b")]
    ExStorm0b,
    /// An intense RFI storm.
    #[serde(rename = "ex_storm_1c")]
    ExStorm1c,
    /// ~45 hours of incoherent-beam data.
    #[serde(rename = "incoherent_search0")]
    IncoherentSearch0,
    /// ~21 hours of incoherent-beam data.
    #[serde(rename = "incoherent_search1")]
    IncoherentSearch1,
    /// ~44 hours of incoherent-beam data.
    #[serde(rename = "incoherent_1c")]
    Incoherent1c,
    /// First 60 hours of the 1d run.
    #[serde(rename = "incoherent_1d")]
    Incoherent1d,
}

impl Acquisition {
    pub const ALL: [Acquisition; 12] = [
        Acquisition::Toy,
        Acquisition::Small,
        Acquisition::Incoherent160919,
        Acquisition::Baseband26mB1937Nfreq1k,
        Acquisition::Baseband26mB1937Nfreq16k,
        Acquisition::ExPulsarSearch0,
        Acquisition::ExStorm0b,
        Acquisition::ExStorm1c,
        Acquisition::IncoherentSearch0,
        Acquisition::IncoherentSearch1,
        Acquisition::Incoherent1c,
        Acquisition::Incoherent1d,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Acquisition::Toy => "toy",
            Acquisition::Small => "small",
            Acquisition::Incoherent160919 => "incoherent_16_09_19",
            Acquisition::Baseband26mB1937Nfreq1k => "baseband_26m_b1937_16_04_22_1k",
            Acquisition::Baseband26mB1937Nfreq16k => "baseband_26m_b1937_16_04_22",
            Acquisition::ExPulsarSearch0 => "ex_pulsar_search0",
            Acquisition::ExStorm0b => "ex_storm_0b",
            Acquisition::ExStorm1c => "ex_storm_1c",
            Acquisition::IncoherentSearch0 => "incoherent_search0",
            Acquisition::IncoherentSearch1 => "incoherent_search1",
            Acquisition::Incoherent1c => "incoherent_1c",
            Acquisition::Incoherent1d => "incoherent_1d",
        }
    }

    /// Resolves the acquisition to a stream.
    ///
    /// Only `incoherent_1d` touches the filesystem (it globs its directory);
    /// every other acquisition is a fixed description.
    pub fn stream(self) -> AcquisitionResult<StreamSpec> {
        let avalanche = Path::new(AVALANCHE_DIR);
        match self {
            Acquisition::Toy => in_dir(INCOHERENT_16_09_19_DIR, &TOY_FILES),
            Acquisition::Small => in_dir(INCOHERENT_16_09_19_DIR, &SMALL_FILES),
            Acquisition::Incoherent160919 => Ok(stream_from_directory(INCOHERENT_16_09_19_DIR)),
            Acquisition::Baseband26mB1937Nfreq1k => {
                Ok(stream_from_directory(Path::new(BASEBAND_26M_DIR).join("1k")))
            }
            Acquisition::Baseband26mB1937Nfreq16k => Ok(stream_from_directory(BASEBAND_26M_DIR)),
            Acquisition::ExPulsarSearch0 => stream_from_time_range(
                avalanche.join("frb_incoherent_search_0"),
                143897.510543,
                144112.258908,
            ),
            Acquisition::ExStorm0b => stream_from_time_range(
                avalanche.join("frb_incoherent_0b"),
                87586.4627610,
                88359.5568742,
            ),
            Acquisition::ExStorm1c => stream_from_time_range(
                avalanche.join("frb_incoherent_1c"),
                117974.363013,
                118103.212032,
            ),
            Acquisition::IncoherentSearch0 => {
                Ok(stream_from_directory(avalanche.join("frb_incoherent_search_0")))
            }
            Acquisition::IncoherentSearch1 => {
                Ok(stream_from_directory(avalanche.join("frb_incoherent_search_1")))
            }
            Acquisition::Incoherent1c => {
                Ok(stream_from_directory(avalanche.join("frb_incoherent_1c")))
            }
            Acquisition::Incoherent1d => sample(
                &format!("{AVALANCHE_DIR}/frb_incoherent_1d/*.h5"),
                0,
                10000,
            ),
        }
    }
}

impl FromStr for Acquisition {
    type Err = AcquisitionError;

    fn from_str(name: &str) -> AcquisitionResult<Self> {
        Acquisition::ALL
            .into_iter()
            .find(|acq| acq.name() == name)
            .ok_or_else(|| AcquisitionError::Unknown(name.to_string()))
    }
}

fn in_dir(dir: &str, basenames: &[&str]) -> AcquisitionResult<StreamSpec> {
    let dir = Path::new(dir);
    stream_from_file_list(basenames.iter().map(|name| dir.join(name)), FILE_NT_CHUNK)
}

fn sorted_matches(pattern: &str) -> AcquisitionResult<Vec<PathBuf>> {
    let entries = glob(pattern).map_err(|source| AcquisitionError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;
    let mut matches = entries.collect::<Result<Vec<_>, _>>()?;
    matches.sort();
    Ok(matches)
}

/// Streams the sorted glob matches of `pattern` in `[start, end)`.
///
/// Indices past the number of matches are clamped, as with slicing a list
/// that may be shorter than requested.
pub fn sample(pattern: &str, start: usize, end: usize) -> AcquisitionResult<StreamSpec> {
    let matches = sorted_matches(pattern)?;
    let end = end.min(matches.len());
    let start = start.min(end);
    debug!(
        "{}: {} matches, selecting [{}, {})",
        pattern,
        matches.len(),
        start,
        end
    );
    let selected = matches[start..end].to_vec();
    if selected.is_empty() {
        return Err(AcquisitionError::NoFiles(format!(
            "{pattern} [{start}, {end})"
        )));
    }
    stream_from_file_list(selected, FILE_NT_CHUNK)
}

/// Block `sample_index` of an incoherent-beam pathfinder search directory.
pub fn incoherent_pathfinder(
    search_name: &str,
    sample_index: usize,
) -> AcquisitionResult<StreamSpec> {
    incoherent_pathfinder_in(Path::new(AVALANCHE_DIR), search_name, sample_index)
}

pub fn incoherent_pathfinder_in(
    root: &Path,
    search_name: &str,
    sample_index: usize,
) -> AcquisitionResult<StreamSpec> {
    let pattern = root.join(search_name).join("*.h5");
    let pattern = pattern.to_string_lossy();
    let start = sample_index.checked_mul(PATHFINDER_SAMPLE_NFILES);
    match start.and_then(|start| Some((start, start.checked_add(PATHFINDER_SAMPLE_NFILES)?))) {
        Some((start, end)) => sample(&pattern, start, end),
        None => Err(AcquisitionError::NoFiles(format!(
            "{pattern} sample block {sample_index}"
        ))),
    }
}
