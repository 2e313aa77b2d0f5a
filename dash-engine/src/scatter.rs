use launch_core::{LaunchRecord, COL_BOOSTER_CATEGORY, COL_CLASS, COL_PAYLOAD};

use crate::chart::{ChartSpec, ScatterChart, ScatterPoint};
use crate::filter::filter;
use crate::selection::{PayloadRange, SiteSelection};

pub const ALL_SITES_SCATTER_TITLE: &str = "Correlation between Payload and Success for All Sites";

/// Payload vs outcome, coloured by booster category, over the fully filtered view.
pub fn scatter_spec(
    records: &[LaunchRecord],
    site: &SiteSelection,
    payload: &PayloadRange,
) -> ChartSpec {
    let points = filter(records, site, payload)
        .into_iter()
        .map(|r| ScatterPoint {
            x: r.payload_kg,
            y: r.outcome.as_class(),
            category: r.booster_category.clone(),
            hover: r.booster_version.clone(),
        })
        .collect();

    let title = match site {
        SiteSelection::All => ALL_SITES_SCATTER_TITLE.to_string(),
        SiteSelection::Site(name) => {
            format!("Correlation between Payload and Success for site {name}")
        }
    };

    ChartSpec::Scatter(ScatterChart {
        title,
        x_label: COL_PAYLOAD.to_string(),
        y_label: COL_CLASS.to_string(),
        color_label: COL_BOOSTER_CATEGORY.to_string(),
        points,
    })
}
