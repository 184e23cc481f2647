use crate::prelude::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Frequency interval `[lo, hi]` in MHz to be masked, serialized as a pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaskInterval(pub f64, pub f64);

impl MaskInterval {
    pub fn lo(&self) -> f64 {
        self.0
    }

    pub fn hi(&self) -> f64 {
        self.1
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.0.is_finite() && self.1.is_finite() && self.0 < self.1 {
            Ok(())
        } else {
            Err(ConfigError::InvalidMaskInterval {
                lo: self.0,
                hi: self.1,
            })
        }
    }
}

/// Where a bad-channel mask comes from: a precomputed mask file read by the
/// engine, or an explicit list of intervals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskSource {
    Path(PathBuf),
    Intervals(Vec<MaskInterval>),
}

impl fmt::Display for MaskSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaskSource::Path(path) => write!(f, "{}", path.display()),
            MaskSource::Intervals(intervals) => {
                let parts = intervals
                    .iter()
                    .map(|iv| format!("[{}, {}]", iv.lo(), iv.hi()))
                    .collect::<Vec<_>>();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}
