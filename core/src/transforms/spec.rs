use crate::params::SearchParams;
use crate::prelude::Axis;
use crate::transforms::mask::MaskSource;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bonsai dedispersion tree configurations available for 1K-channel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeVariant {
    Nfreq1k3tree,
    Nfreq1k7tree,
}

impl TreeVariant {
    pub fn ntrees(self) -> usize {
        match self {
            TreeVariant::Nfreq1k3tree => 3,
            TreeVariant::Nfreq1k7tree => 7,
        }
    }

    /// Bonsai config name for a given config version.
    pub fn config_name(self, version: u32) -> String {
        format!("nfreq1K_{}tree_v{}", self.ntrees(), version)
    }
}

/// Descriptor of one transform in a chain.
///
/// The external engine interprets the tag and parameters; nothing here runs
/// a kernel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "transform", rename_all = "snake_case")]
pub enum TransformSpec {
    PolynomialDetrender {
        deg: u32,
        axis: Axis,
        nt_chunk: usize,
        native: bool,
    },
    IntensityClipper {
        sigma: f64,
        niter: u32,
        iter_sigma: f64,
        /// `None` clips the whole 2D chunk at once.
        axis: Option<Axis>,
        nt_chunk: usize,
        df: usize,
        dt: usize,
        two_pass: bool,
        native: bool,
    },
    StdDevClipper {
        sigma: f64,
        axis: Axis,
        df: usize,
        dt: usize,
        two_pass: bool,
        native: bool,
    },
    BadchannelMask {
        mask: MaskSource,
        nt_chunk: usize,
    },
    Plotter {
        img_prefix: String,
        img_ny: usize,
        img_nx: usize,
        downsample_nt: usize,
        nzoom: usize,
    },
    DedispersionSearch {
        tree: TreeVariant,
        version: u32,
        search: SearchParams,
    },
    FrbInjector {
        snr: f64,
        undispersed_arrival_time: f64,
        sample_rms: f64,
        dm: f64,
    },
}

impl TransformSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            TransformSpec::PolynomialDetrender { .. } => "polynomial_detrender",
            TransformSpec::IntensityClipper { .. } => "intensity_clipper",
            TransformSpec::StdDevClipper { .. } => "std_dev_clipper",
            TransformSpec::BadchannelMask { .. } => "badchannel_mask",
            TransformSpec::Plotter { .. } => "plotter",
            TransformSpec::DedispersionSearch { .. } => "dedispersion_search",
            TransformSpec::FrbInjector { .. } => "frb_injector",
        }
    }

    pub fn two_pass(&self) -> bool {
        match self {
            TransformSpec::IntensityClipper { two_pass, .. }
            | TransformSpec::StdDevClipper { two_pass, .. } => *two_pass,
            _ => false,
        }
    }
}

fn axis_name(axis: Option<Axis>) -> &'static str {
    match axis {
        Some(Axis::Freq) => "freq",
        Some(Axis::Time) => "time",
        None => "none",
    }
}

impl fmt::Display for TransformSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformSpec::PolynomialDetrender {
                deg, axis, nt_chunk, ..
            } => write!(
                f,
                "polynomial_detrender(deg={deg}, axis={}, nt_chunk={nt_chunk})",
                axis_name(Some(*axis))
            ),
            TransformSpec::IntensityClipper {
                sigma,
                niter,
                iter_sigma,
                axis,
                nt_chunk,
                df,
                dt,
                two_pass,
                ..
            } => write!(
                f,
                "intensity_clipper(sigma={sigma}, niter={niter}, iter_sigma={iter_sigma:.4}, axis={}, \
                 nt_chunk={nt_chunk}, Df={df}, Dt={dt}, two_pass={two_pass})",
                axis_name(*axis)
            ),
            TransformSpec::StdDevClipper {
                sigma,
                axis,
                df,
                dt,
                two_pass,
                ..
            } => write!(
                f,
                "std_dev_clipper(sigma={sigma}, axis={}, Df={df}, Dt={dt}, two_pass={two_pass})",
                axis_name(Some(*axis))
            ),
            TransformSpec::BadchannelMask { mask, nt_chunk } => {
                write!(f, "badchannel_mask({mask}, nt_chunk={nt_chunk})")
            }
            TransformSpec::Plotter {
                img_prefix,
                img_ny,
                img_nx,
                downsample_nt,
                nzoom,
            } => write!(
                f,
                "plotter('{img_prefix}', ny={img_ny}, nx={img_nx}, downsample_nt={downsample_nt}, nzoom={nzoom})"
            ),
            TransformSpec::DedispersionSearch { tree, version, .. } => {
                write!(f, "dedispersion_search({})", tree.config_name(*version))
            }
            TransformSpec::FrbInjector {
                snr,
                undispersed_arrival_time,
                sample_rms,
                dm,
            } => write!(
                f,
                "frb_injector(snr={snr}, t0={undispersed_arrival_time}, rms={sample_rms}, dm={dm})"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_serializes_with_kind_tag() {
        let spec = TransformSpec::PolynomialDetrender {
            deg: 8,
            axis: Axis::Freq,
            nt_chunk: 2048,
            native: true,
        };
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["transform"], "polynomial_detrender");
        assert_eq!(value["axis"], "freq");
        assert_eq!(spec.kind(), "polynomial_detrender");
    }

    #[test]
    fn whole_chunk_clipper_displays_no_axis() {
        let spec = TransformSpec::IntensityClipper {
            sigma: 5.0,
            niter: 12,
            iter_sigma: 5.0,
            axis: None,
            nt_chunk: 1024,
            df: 2,
            dt: 16,
            two_pass: false,
            native: true,
        };
        assert!(spec.to_string().contains("axis=none"));
        assert!(!spec.two_pass());
    }

    #[test]
    fn tree_variant_names_config_file() {
        assert_eq!(
            TreeVariant::Nfreq1k7tree.config_name(3),
            "nfreq1K_7tree_v3"
        );
    }
}
