//! Validated parameters shared by every transform in a chain.
//!
//! [`ParameterConfig`] is the raw, user-facing form (deserializable, every
//! field optional). [`TransformParameters::new`] checks it and resolves the
//! plotting shortcut; once built, the parameters never change.

pub mod plot;
pub mod search;

pub use plot::{resolve_plot_params, PlotOverrides, PlotParams, PlotType};
pub use search::SearchParams;

use crate::prelude::{ConfigError, ConfigResult};
use crate::transforms::{MaskInterval, MaskSource, TransformSpec};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Unvalidated parameter options, as written in a workflow file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParameterConfig {
    pub detrender_niter: usize,
    pub clipper_niter: usize,
    pub detrend_nt: usize,
    pub clip_nt: usize,
    /// Use the compiled kernels rather than the reference implementations.
    pub use_native_kernels: bool,
    /// Use the slower, numerically stable two-pass clippers in the first detrender round.
    pub two_pass_first_round: bool,
    pub plot_type: Option<String>,
    pub plot_downsample_nt: Option<usize>,
    pub plot_nxpix: Option<usize>,
    pub plot_nypix: Option<usize>,
    pub plot_nzoom: Option<usize>,
    pub mask_path: Option<PathBuf>,
    pub mask_intervals: Option<Vec<MaskInterval>>,
    /// Multiplier on clipper frequency decimation; 16 for 16K-channel data.
    pub kfreq: usize,
    pub cf_thr: f64,
    pub search: SearchParams,
}

impl Default for ParameterConfig {
    fn default() -> Self {
        Self {
            detrender_niter: 2,
            clipper_niter: 3,
            detrend_nt: 2048,
            clip_nt: 1024,
            use_native_kernels: true,
            two_pass_first_round: true,
            plot_type: None,
            plot_downsample_nt: None,
            plot_nxpix: None,
            plot_nypix: None,
            plot_nzoom: None,
            mask_path: None,
            mask_intervals: None,
            kfreq: 1,
            cf_thr: 1.0,
            search: SearchParams::default(),
        }
    }
}

impl ParameterConfig {
    fn plot_overrides(&self) -> PlotOverrides {
        PlotOverrides {
            downsample_nt: self.plot_downsample_nt,
            nx_pix: self.plot_nxpix,
            ny_pix: self.plot_nypix,
            nzoom: self.plot_nzoom,
        }
    }
}

/// Parameters for initializing the transforms of an RFI chain.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformParameters {
    detrender_niter: usize,
    clipper_niter: usize,
    detrend_nt: usize,
    clip_nt: usize,
    use_native_kernels: bool,
    two_pass_first_round: bool,
    plot: Option<PlotParams>,
    mask: Option<MaskSource>,
    kfreq: usize,
    cf_thr: f64,
    search: SearchParams,
}

/// Widest decimation applied on top of `kfreq` (`Df = 2 * kfreq` at `Dt = 16`).
const KFREQ_DECIMATION_SPAN: usize = 2 * 16;

fn require_positive(field: &'static str, value: usize) -> ConfigResult<usize> {
    if value == 0 {
        Err(ConfigError::NonPositive { field, value: 0.0 })
    } else {
        Ok(value)
    }
}

impl TransformParameters {
    pub fn new(config: ParameterConfig) -> ConfigResult<Self> {
        let plot = resolve_plot_params(config.plot_type.as_deref(), &config.plot_overrides())?;

        if !(config.cf_thr.is_finite() && config.cf_thr > 0.0) {
            return Err(ConfigError::NonPositive {
                field: "cf_thr",
                value: config.cf_thr,
            });
        }
        config.search.validate()?;

        let kfreq = require_positive("kfreq", config.kfreq)?;
        if kfreq.checked_mul(KFREQ_DECIMATION_SPAN).is_none() {
            return Err(ConfigError::TooLarge {
                field: "kfreq",
                value: kfreq,
            });
        }

        let mask = match (config.mask_path, config.mask_intervals) {
            (Some(path), intervals) => {
                if intervals.is_some() {
                    warn!(
                        "both mask_path and mask_intervals given; using {} and ignoring the intervals",
                        path.display()
                    );
                }
                Some(MaskSource::Path(path))
            }
            (None, Some(intervals)) => {
                for interval in &intervals {
                    interval.validate()?;
                }
                Some(MaskSource::Intervals(intervals))
            }
            (None, None) => None,
        };

        Ok(Self {
            detrender_niter: require_positive("detrender_niter", config.detrender_niter)?,
            clipper_niter: require_positive("clipper_niter", config.clipper_niter)?,
            detrend_nt: require_positive("detrend_nt", config.detrend_nt)?,
            clip_nt: require_positive("clip_nt", config.clip_nt)?,
            use_native_kernels: config.use_native_kernels,
            two_pass_first_round: config.two_pass_first_round,
            plot,
            mask,
            kfreq,
            cf_thr: config.cf_thr,
            search: config.search,
        })
    }

    pub fn detrender_niter(&self) -> usize {
        self.detrender_niter
    }

    pub fn clipper_niter(&self) -> usize {
        self.clipper_niter
    }

    pub fn detrend_nt(&self) -> usize {
        self.detrend_nt
    }

    pub fn clip_nt(&self) -> usize {
        self.clip_nt
    }

    pub fn use_native_kernels(&self) -> bool {
        self.use_native_kernels
    }

    pub fn two_pass_first_round(&self) -> bool {
        self.two_pass_first_round
    }

    pub fn plot(&self) -> Option<&PlotParams> {
        self.plot.as_ref()
    }

    pub fn plots_enabled(&self) -> bool {
        self.plot.is_some()
    }

    pub fn mask(&self) -> Option<&MaskSource> {
        self.mask.as_ref()
    }

    pub fn kfreq(&self) -> usize {
        self.kfreq
    }

    pub fn cf_thr(&self) -> f64 {
        self.cf_thr
    }

    pub fn search(&self) -> &SearchParams {
        &self.search
    }

    /// Appends a plotter writing images prefixed with `label`, if plotting is enabled.
    pub fn append_plotting_stage(&self, chain: &mut Vec<TransformSpec>, label: &str) {
        if let Some(plot) = &self.plot {
            chain.push(TransformSpec::Plotter {
                img_prefix: label.to_string(),
                img_ny: plot.ny_pix,
                img_nx: plot.nx_pix,
                downsample_nt: plot.downsample_nt,
                nzoom: plot.nzoom,
            });
        }
    }

    /// Appends a bad-channel mask, if a mask file or intervals were given.
    pub fn append_mask_stage(&self, chain: &mut Vec<TransformSpec>) {
        if let Some(mask) = &self.mask {
            chain.push(TransformSpec::BadchannelMask {
                mask: mask.clone(),
                nt_chunk: self.clip_nt,
            });
        }
    }
}

impl TryFrom<ParameterConfig> for TransformParameters {
    type Error = ConfigError;

    fn try_from(config: ParameterConfig) -> ConfigResult<Self> {
        Self::new(config)
    }
}

impl Default for TransformParameters {
    fn default() -> Self {
        Self {
            detrender_niter: 2,
            clipper_niter: 3,
            detrend_nt: 2048,
            clip_nt: 1024,
            use_native_kernels: true,
            two_pass_first_round: true,
            plot: None,
            mask: None,
            kfreq: 1,
            cf_thr: 1.0,
            search: SearchParams::default(),
        }
    }
}
