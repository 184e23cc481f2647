use crate::prelude::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};

/// Shortcut for a full set of plotting parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotType {
    None,
    Big,
    WebViewer,
}

impl PlotType {
    pub fn parse(name: &str) -> ConfigResult<Self> {
        match name {
            "none" => Ok(PlotType::None),
            "big" => Ok(PlotType::Big),
            "web_viewer" => Ok(PlotType::WebViewer),
            other => Err(ConfigError::UnknownPlotType(other.to_string())),
        }
    }

    fn defaults(self) -> Option<PlotParams> {
        match self {
            PlotType::None => None,
            PlotType::Big => Some(PlotParams {
                downsample_nt: 16,
                nx_pix: 1200,
                ny_pix: 512,
                nzoom: 1,
            }),
            PlotType::WebViewer => Some(PlotParams {
                downsample_nt: 16,
                nx_pix: 256,
                ny_pix: 256,
                nzoom: 4,
            }),
        }
    }
}

/// Resolved plotter settings shared by every plotting stage in a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotParams {
    pub downsample_nt: usize,
    pub nx_pix: usize,
    pub ny_pix: usize,
    pub nzoom: usize,
}

/// Sparse, explicitly given fine-grained plotting parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlotOverrides {
    pub downsample_nt: Option<usize>,
    pub nx_pix: Option<usize>,
    pub ny_pix: Option<usize>,
    pub nzoom: Option<usize>,
}

impl PlotOverrides {
    fn fields(&self) -> [(&'static str, Option<usize>); 4] {
        [
            ("plot_downsample_nt", self.downsample_nt),
            ("plot_nxpix", self.nx_pix),
            ("plot_nypix", self.ny_pix),
            ("plot_nzoom", self.nzoom),
        ]
    }

    fn missing(&self) -> Vec<&'static str> {
        self.fields()
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| *name)
            .collect()
    }

    fn apply(&self, base: PlotParams) -> PlotParams {
        PlotParams {
            downsample_nt: self.downsample_nt.unwrap_or(base.downsample_nt),
            nx_pix: self.nx_pix.unwrap_or(base.nx_pix),
            ny_pix: self.ny_pix.unwrap_or(base.ny_pix),
            nzoom: self.nzoom.unwrap_or(base.nzoom),
        }
    }
}

/// Resolves the plotting parameters from an optional shortcut name and the
/// explicit overrides. `Ok(None)` means plotting is disabled.
///
/// A shortcut supplies all four values and any explicit field replaces the
/// corresponding one. Without a shortcut the four fields must be given all
/// together or not at all.
pub fn resolve_plot_params(
    plot_type: Option<&str>,
    overrides: &PlotOverrides,
) -> ConfigResult<Option<PlotParams>> {
    let shortcut = plot_type.map(PlotType::parse).transpose()?;
    let base = shortcut.and_then(PlotType::defaults);

    let resolved = match base {
        Some(base) => overrides.apply(base),
        None => match (
            overrides.downsample_nt,
            overrides.nx_pix,
            overrides.ny_pix,
            overrides.nzoom,
        ) {
            (None, None, None, None) => return Ok(None),
            (Some(downsample_nt), Some(nx_pix), Some(ny_pix), Some(nzoom)) => PlotParams {
                downsample_nt,
                nx_pix,
                ny_pix,
                nzoom,
            },
            _ => {
                return Err(ConfigError::PartialPlotParameters {
                    missing: overrides.missing(),
                })
            }
        },
    };

    for (field, value) in [
        ("plot_downsample_nt", resolved.downsample_nt),
        ("plot_nxpix", resolved.nx_pix),
        ("plot_nypix", resolved.ny_pix),
        ("plot_nzoom", resolved.nzoom),
    ] {
        if value == 0 {
            return Err(ConfigError::NonPositive {
                field,
                value: 0.0,
            });
        }
    }

    Ok(Some(resolved))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(downsample_nt: usize, nx_pix: usize, ny_pix: usize, nzoom: usize) -> PlotParams {
        PlotParams {
            downsample_nt,
            nx_pix,
            ny_pix,
            nzoom,
        }
    }

    #[test]
    fn shortcuts_match_table() {
        let none = PlotOverrides::default();
        assert_eq!(
            resolve_plot_params(Some("big"), &none).unwrap(),
            Some(params(16, 1200, 512, 1))
        );
        assert_eq!(
            resolve_plot_params(Some("web_viewer"), &none).unwrap(),
            Some(params(16, 256, 256, 4))
        );
        assert_eq!(resolve_plot_params(None, &none).unwrap(), None);
        assert_eq!(resolve_plot_params(Some("none"), &none).unwrap(), None);
    }

    #[test]
    fn explicit_field_overrides_shortcut() {
        let overrides = PlotOverrides {
            nzoom: Some(6),
            ..Default::default()
        };
        assert_eq!(
            resolve_plot_params(Some("web_viewer"), &overrides).unwrap(),
            Some(params(16, 256, 256, 6))
        );

        let overrides = PlotOverrides {
            downsample_nt: Some(8),
            ny_pix: Some(128),
            ..Default::default()
        };
        assert_eq!(
            resolve_plot_params(Some("big"), &overrides).unwrap(),
            Some(params(8, 1200, 128, 1))
        );
    }

    #[test]
    fn unknown_shortcut_is_rejected() {
        let err = resolve_plot_params(Some("huge"), &PlotOverrides::default()).unwrap_err();
        assert_eq!(err, ConfigError::UnknownPlotType("huge".into()));
    }

    #[test]
    fn single_fine_grained_field_is_rejected() {
        let singles = [
            PlotOverrides {
                downsample_nt: Some(16),
                ..Default::default()
            },
            PlotOverrides {
                nx_pix: Some(256),
                ..Default::default()
            },
            PlotOverrides {
                ny_pix: Some(256),
                ..Default::default()
            },
            PlotOverrides {
                nzoom: Some(4),
                ..Default::default()
            },
        ];
        for overrides in singles {
            assert!(matches!(
                resolve_plot_params(None, &overrides),
                Err(ConfigError::PartialPlotParameters { ref missing }) if missing.len() == 3
            ));
        }
    }

    #[test]
    fn complete_fine_grained_fields_are_used_directly() {
        let overrides = PlotOverrides {
            downsample_nt: Some(32),
            nx_pix: Some(640),
            ny_pix: Some(480),
            nzoom: Some(2),
        };
        assert_eq!(
            resolve_plot_params(None, &overrides).unwrap(),
            Some(params(32, 640, 480, 2))
        );
    }

    #[test]
    fn zero_sized_plot_is_rejected() {
        let overrides = PlotOverrides {
            nx_pix: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            resolve_plot_params(Some("big"), &overrides),
            Err(ConfigError::NonPositive { field: "plot_nxpix", .. })
        ));
    }
}
