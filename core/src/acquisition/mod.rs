//! Acquisition selection: which intensity files a run streams, in time order.

pub mod catalog;
pub mod stream;

pub use catalog::{incoherent_pathfinder, sample, Acquisition};
pub use stream::{stream_from_directory, stream_from_file_list, stream_from_time_range, StreamSpec};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AcquisitionError {
    #[error("invalid glob pattern {pattern}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    #[error("reading glob match: {0}")]
    Glob(#[from] glob::GlobError),
    #[error("no acquisition files selected by {0}")]
    NoFiles(String),
    #[error("nt_chunk must be positive")]
    ZeroChunk,
    #[error("time range [{t0}, {t1}] is empty or inverted")]
    InvalidTimeRange { t0: f64, t1: f64 },
    #[error("unknown acquisition '{0}'")]
    Unknown(String),
}

pub type AcquisitionResult<T> = Result<T, AcquisitionError>;
