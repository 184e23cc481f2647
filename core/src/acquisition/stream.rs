use crate::acquisition::{AcquisitionError, AcquisitionResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Description of the stream the engine should open.
///
/// File lists are kept in the given order, which is the time order of the
/// acquisition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum StreamSpec {
    FileList {
        filenames: Vec<PathBuf>,
        nt_chunk: usize,
    },
    AcqDir {
        path: PathBuf,
    },
    TimeRange {
        path: PathBuf,
        t0: f64,
        t1: f64,
    },
}

/// Streams the given files in order; `nt_chunk` is a hint to the engine.
pub fn stream_from_file_list<I, P>(filenames: I, nt_chunk: usize) -> AcquisitionResult<StreamSpec>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    if nt_chunk == 0 {
        return Err(AcquisitionError::ZeroChunk);
    }
    let filenames: Vec<PathBuf> = filenames.into_iter().map(Into::into).collect();
    if filenames.is_empty() {
        return Err(AcquisitionError::NoFiles("an empty file list".into()));
    }
    Ok(StreamSpec::FileList {
        filenames,
        nt_chunk,
    })
}

/// Streams every file of an acquisition directory.
pub fn stream_from_directory<P: Into<PathBuf>>(path: P) -> StreamSpec {
    StreamSpec::AcqDir { path: path.into() }
}

/// Streams the part of an acquisition directory between `t0` and `t1` (seconds).
pub fn stream_from_time_range<P: Into<PathBuf>>(
    path: P,
    t0: f64,
    t1: f64,
) -> AcquisitionResult<StreamSpec> {
    if !(t0.is_finite() && t1.is_finite() && t0 < t1) {
        return Err(AcquisitionError::InvalidTimeRange { t0, t1 });
    }
    Ok(StreamSpec::TimeRange {
        path: path.into(),
        t0,
        t1,
    })
}

impl fmt::Display for StreamSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamSpec::FileList {
                filenames,
                nt_chunk,
            } => match (filenames.first(), filenames.last()) {
                (Some(first), Some(last)) => write!(
                    f,
                    "{} files ({} .. {}), nt_chunk={}",
                    filenames.len(),
                    first.display(),
                    last.display(),
                    nt_chunk
                ),
                _ => write!(f, "no files"),
            },
            StreamSpec::AcqDir { path } => write!(f, "acqdir {}", path.display()),
            StreamSpec::TimeRange { path, t0, t1 } => {
                write!(f, "{} [{t0}, {t1}]", path.display())
            }
        }
    }
}
