//! The canonical multi-stage RFI recipe.
//!
//! Each detrender round runs `clipper_niter` rounds of five clippers followed
//! by a time-axis and a frequency-axis polynomial detrender.

use crate::params::TransformParameters;
use crate::prelude::Axis;
use crate::transforms::TransformSpec;

const CLIPPER_SIGMA: f64 = 5.0;
const STD_DEV_SIGMA: f64 = 3.0;
const CLIPPER_NITER: u32 = 12;
const COARSE_DT: usize = 16;

/// Per-iteration threshold of the coarse-grained intensity clippers.
///
/// Scales as `5 / cf_thr^log2(2 * kfreq * 16)` so the effective significance
/// of the decimated clip stays roughly constant across frequency resolutions.
pub fn iter_sigma(params: &TransformParameters) -> f64 {
    let decimation = (2 * params.kfreq() * COARSE_DT) as f64;
    CLIPPER_SIGMA / params.cf_thr().powf(decimation.log2())
}

/// The five clippers of one inner round; `ix` is the enclosing detrender round.
pub fn clipper_chain(params: &TransformParameters, ix: usize) -> Vec<TransformSpec> {
    let two_pass = params.two_pass_first_round() && ix == 0;
    let si = iter_sigma(params);
    let kfreq = params.kfreq();
    let nt_chunk = params.clip_nt();
    let native = params.use_native_kernels();

    let intensity = |iter_sigma: f64, axis: Option<Axis>, df: usize, dt: usize, two_pass: bool| {
        TransformSpec::IntensityClipper {
            sigma: CLIPPER_SIGMA,
            niter: CLIPPER_NITER,
            iter_sigma,
            axis,
            nt_chunk,
            df,
            dt,
            two_pass,
            native,
        }
    };

    vec![
        TransformSpec::StdDevClipper {
            sigma: STD_DEV_SIGMA,
            axis: Axis::Time,
            df: kfreq,
            dt: COARSE_DT,
            two_pass,
            native,
        },
        intensity(si, None, 2 * kfreq, COARSE_DT, false),
        intensity(si, Some(Axis::Freq), 2 * kfreq, COARSE_DT, false),
        intensity(CLIPPER_SIGMA, Some(Axis::Freq), kfreq, 1, false),
        intensity(CLIPPER_SIGMA, Some(Axis::Time), kfreq, 1, two_pass),
    ]
}

/// Time- and frequency-axis detrenders for round `ix`, plus a `dc_out{ix}` plot.
pub fn detrender_chain(params: &TransformParameters, ix: usize) -> Vec<TransformSpec> {
    let detrender = |deg: u32, axis: Axis| TransformSpec::PolynomialDetrender {
        deg,
        axis,
        nt_chunk: params.detrend_nt(),
        native: params.use_native_kernels(),
    };

    let mut chain = vec![detrender(4, Axis::Time), detrender(8, Axis::Freq)];
    params.append_plotting_stage(&mut chain, &format!("dc_out{ix}"));
    chain
}

/// Builds the full RFI chain: raw plot, mask, then the detrender/clipper rounds.
pub fn transform_chain(params: &TransformParameters) -> Vec<TransformSpec> {
    let mut chain = Vec::new();
    params.append_plotting_stage(&mut chain, "raw");
    params.append_mask_stage(&mut chain);

    for ix in 0..params.detrender_niter() {
        for _ in 0..params.clipper_niter() {
            chain.extend(clipper_chain(params, ix));
        }
        chain.extend(detrender_chain(params, ix));
    }

    chain
}

/// Length of [`transform_chain`] for `params`.
pub fn expected_chain_len(params: &TransformParameters) -> usize {
    let plot = usize::from(params.plots_enabled());
    let mask = usize::from(params.mask().is_some());
    let round = params
        .clipper_niter()
        .saturating_mul(5)
        .saturating_add(2 + plot);
    params
        .detrender_niter()
        .saturating_mul(round)
        .saturating_add(plot + mask)
}
