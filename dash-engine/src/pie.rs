use launch_core::{LaunchRecord, Outcome};

use crate::chart::{ChartSpec, PieChart, PieSlice};
use crate::filter::filter_site;
use crate::selection::SiteSelection;

pub const ALL_SITES_PIE_TITLE: &str = "Total Success Launches by Site";
pub const FAILURE_LABEL: &str = "Failure (0)";
pub const SUCCESS_LABEL: &str = "Success (1)";

/// Success pie. Payload range never applies here.
///
/// For `All`, one slice per site valued by its *successful* launches only.
/// For a single site, always exactly `Failure (0)` then `Success (1)`, zeros included.
pub fn pie_spec(records: &[LaunchRecord], site: &SiteSelection) -> ChartSpec {
    let chart = match site {
        SiteSelection::All => success_by_site(records),
        SiteSelection::Site(name) => outcome_split(records, site, name),
    };
    ChartSpec::Pie(chart)
}

fn success_by_site(records: &[LaunchRecord]) -> PieChart {
    let mut slices: Vec<PieSlice> = Vec::new();
    for r in records {
        let idx = match slices.iter().position(|s| s.label == r.site) {
            Some(idx) => idx,
            None => {
                slices.push(PieSlice {
                    label: r.site.clone(),
                    value: 0,
                });
                slices.len() - 1
            }
        };
        if r.outcome.is_success() {
            slices[idx].value += 1;
        }
    }
    PieChart {
        title: ALL_SITES_PIE_TITLE.to_string(),
        slices,
    }
}

fn outcome_split(records: &[LaunchRecord], site: &SiteSelection, name: &str) -> PieChart {
    let (failures, successes) =
        filter_site(records, site)
            .iter()
            .fold((0u64, 0u64), |(f, s), r| match r.outcome {
                Outcome::Failure => (f + 1, s),
                Outcome::Success => (f, s + 1),
            });
    PieChart {
        title: format!("Success vs Failure for {name}"),
        slices: vec![
            PieSlice {
                label: FAILURE_LABEL.to_string(),
                value: failures,
            },
            PieSlice {
                label: SUCCESS_LABEL.to_string(),
                value: successes,
            },
        ],
    }
}
