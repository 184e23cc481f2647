//! Canned runs, each a fixed acquisition, parameter set and search.

use crate::workflow::config::{AcquisitionConfig, InjectorConfig, SearchConfig, WorkflowConfig};
use clap::ValueEnum;
use rficore::acquisition::catalog::AVALANCHE_DIR;
use rficore::params::{ParameterConfig, SearchParams};
use rficore::transforms::TreeVariant;

const RFI_MASK_PATH: &str = "/data/pathfinder/rfi_masks/rfi_20160705.dat";

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Script {
    /// A faint source at low DM
    #[value(name = "s1-kms")]
    S1Kms,
    /// An RFI storm giving a single false positive at (DM, SNR) = (77.62, 10.64)
    S2,
    /// Injected pulse in the first 20 files of incoherent search 0
    BlindTest,
}

fn pathfinder_search(l1_grouper_threshold: f64, event_outfile: &str) -> SearchParams {
    SearchParams {
        output_plot_stem: Some("triggers".into()),
        use_analytic_normalization: false,
        hdf5_output_filename: None,
        nt_per_hdf5_file: None,
        fill_rfi_mask: true,
        plot_threshold1: 7.0,
        plot_threshold2: 10.0,
        dynamic_plotter: false,
        plot_all_trees: true,
        l1_grouper_threshold,
        event_outfile: Some(event_outfile.into()),
        ..Default::default()
    }
}

fn pathfinder_run(
    label: &str,
    search_name: &str,
    sample_index: usize,
    l1_grouper_threshold: f64,
) -> WorkflowConfig {
    WorkflowConfig {
        label: label.into(),
        acquisition: AcquisitionConfig::Pathfinder {
            search_name: search_name.into(),
            sample_index,
        },
        parameters: ParameterConfig {
            plot_type: Some("web_viewer".into()),
            mask_path: Some(RFI_MASK_PATH.into()),
            detrender_niter: 2,
            clipper_niter: 6,
            search: pathfinder_search(l1_grouper_threshold, &format!("events_{label}")),
            ..Default::default()
        },
        injector: None,
        search: Some(SearchConfig {
            tree: TreeVariant::Nfreq1k7tree,
            version: 3,
        }),
    }
}

impl Script {
    pub fn workflow(self) -> WorkflowConfig {
        match self {
            Script::S1Kms => pathfinder_run("s1-kms", "frb_incoherent_search_3", 6, 7.0),
            Script::S2 => pathfinder_run("s2", "frb_incoherent_4b", 0, 10.0),
            Script::BlindTest => WorkflowConfig {
                label: "blind_test".into(),
                acquisition: AcquisitionConfig::Sample {
                    pattern: format!("{AVALANCHE_DIR}/frb_incoherent_search_0/*.h5"),
                    start: 0,
                    end: 20,
                },
                parameters: ParameterConfig {
                    plot_type: Some("web_viewer".into()),
                    mask_path: Some(RFI_MASK_PATH.into()),
                    clipper_niter: 4,
                    detrender_niter: 3,
                    kfreq: 1,
                    search: SearchParams {
                        output_plot_stem: Some("triggers".into()),
                        ..Default::default()
                    },
                    ..Default::default()
                },
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
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rficore::chains::transform_chain;
    use rficore::params::TransformParameters;

    #[test]
    fn every_script_has_valid_parameters() {
        for script in Script::value_variants() {
            let workflow = script.workflow();
            let params = TransformParameters::new(workflow.parameters).unwrap();
            assert!(params.plots_enabled());
            assert!(params.mask().is_some());
            assert!(workflow.search.is_some());
        }
    }

    #[test]
    fn pathfinder_scripts_differ_in_grouper_threshold() {
        let s1 = Script::S1Kms.workflow();
        let s2 = Script::S2.workflow();
        assert_eq!(s1.parameters.search.l1_grouper_threshold, 7.0);
        assert_eq!(s2.parameters.search.l1_grouper_threshold, 10.0);
        assert_eq!(
            s1.parameters.search.event_outfile.as_deref(),
            Some("events_s1-kms")
        );
        assert_eq!(s2.parameters.search.event_outfile.as_deref(), Some("events_s2"));
    }

    #[test]
    fn blind_test_chain_length() {
        let workflow = Script::BlindTest.workflow();
        let params = TransformParameters::new(workflow.parameters).unwrap();
        assert_eq!(transform_chain(&params).len(), 2 + 3 * (5 * 4 + 3));
        assert!(workflow.injector.is_some());
    }

    #[test]
    fn script_names_parse_from_cli() {
        assert_eq!(Script::from_str("s1-kms", false).unwrap(), Script::S1Kms);
        assert_eq!(Script::from_str("blind-test", false).unwrap(), Script::BlindTest);
    }
}
