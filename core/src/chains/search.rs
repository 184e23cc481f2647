use crate::params::TransformParameters;
use crate::transforms::{TransformSpec, TreeVariant};

fn dedispersion_search(
    params: &TransformParameters,
    tree: TreeVariant,
    version: u32,
) -> TransformSpec {
    TransformSpec::DedispersionSearch {
        tree,
        version,
        search: params.search().clone(),
    }
}

/// Bonsai search over 1K frequency channels with three trees.
pub fn nfreq1k_3tree(params: &TransformParameters, version: u32) -> TransformSpec {
    dedispersion_search(params, TreeVariant::Nfreq1k3tree, version)
}

/// Bonsai search over 1K frequency channels with seven trees.
pub fn nfreq1k_7tree(params: &TransformParameters, version: u32) -> TransformSpec {
    dedispersion_search(params, TreeVariant::Nfreq1k7tree, version)
}

/// Injects a synthetic dispersed pulse into the stream.
pub fn frb_injector(
    snr: f64,
    undispersed_arrival_time: f64,
    sample_rms: f64,
    dm: f64,
) -> TransformSpec {
    TransformSpec::FrbInjector {
        snr,
        undispersed_arrival_time,
        sample_rms,
        dm,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{ParameterConfig, SearchParams};

    #[test]
    fn search_carries_parameter_search_options() {
        let params = TransformParameters::new(ParameterConfig {
            search: SearchParams {
                output_plot_stem: Some("triggers".into()),
                ..Default::default()
            },
            ..Default::default()
        })
        .unwrap();

        match nfreq1k_7tree(&params, 3) {
            TransformSpec::DedispersionSearch {
                tree,
                version,
                search,
            } => {
                assert_eq!(tree, TreeVariant::Nfreq1k7tree);
                assert_eq!(version, 3);
                assert_eq!(search.output_plot_stem.as_deref(), Some("triggers"));
            }
            other => panic!("unexpected transform {other}"),
        }
        assert_eq!(nfreq1k_3tree(&params, 1).kind(), "dedispersion_search");
    }
}
