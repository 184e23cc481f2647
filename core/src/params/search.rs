use crate::prelude::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};

/// Options forwarded to the bonsai dedispersion search transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchParams {
    /// Stem for trigger plots (e.g. `triggers` -> `triggers_0_tree2.png`); `None` disables them.
    pub output_plot_stem: Option<String>,
    /// Pixels along the DM axis of trigger plots.
    pub plot_nypix: usize,
    pub use_analytic_normalization: bool,
    pub hdf5_output_filename: Option<String>,
    pub nt_per_hdf5_file: Option<usize>,
    pub fill_rfi_mask: bool,
    pub plot_threshold1: f64,
    pub plot_threshold2: f64,
    pub dynamic_plotter: bool,
    pub plot_all_trees: bool,
    /// SNR threshold of the L1 grouper applied to coarse-grained triggers.
    pub l1_grouper_threshold: f64,
    pub event_outfile: Option<String>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            output_plot_stem: None,
            plot_nypix: 256,
            use_analytic_normalization: true,
            hdf5_output_filename: None,
            nt_per_hdf5_file: None,
            fill_rfi_mask: false,
            plot_threshold1: 6.0,
            plot_threshold2: 10.0,
            dynamic_plotter: false,
            plot_all_trees: false,
            l1_grouper_threshold: 7.0,
            event_outfile: None,
        }
    }
}

impl SearchParams {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.plot_nypix == 0 {
            return Err(ConfigError::NonPositive {
                field: "bonsai_plot_nypix",
                value: 0.0,
            });
        }
        if self.nt_per_hdf5_file == Some(0) {
            return Err(ConfigError::NonPositive {
                field: "bonsai_nt_per_hdf5_file",
                value: 0.0,
            });
        }
        for (field, value) in [
            ("bonsai_plot_threshold1", self.plot_threshold1),
            ("bonsai_plot_threshold2", self.plot_threshold2),
            ("l1_grouper_threshold", self.l1_grouper_threshold),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        Ok(())
    }
}
