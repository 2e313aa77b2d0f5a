use launch_core::LaunchRecord;

use crate::selection::{PayloadRange, SiteSelection};

/// Records in `[low, high]` (inclusive) and, unless `site` is `All`, at that site.
///
/// Never fails: an unknown site or an empty interval yields an empty view.
pub fn filter<'a>(
    records: &'a [LaunchRecord],
    site: &SiteSelection,
    payload: &PayloadRange,
) -> Vec<&'a LaunchRecord> {
    records
        .iter()
        .filter(|r| payload.contains(r.payload_kg) && site.matches(&r.site))
        .collect()
}

/// Site-only restriction, used by the pie which ignores payload.
pub fn filter_site<'a>(records: &'a [LaunchRecord], site: &SiteSelection) -> Vec<&'a LaunchRecord> {
    records.iter().filter(|r| site.matches(&r.site)).collect()
}
