use launch_core::LaunchTable;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Dropdown value that selects every site. Used both as option value and initial value.
pub const ALL_SITES: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Map a raw control value. Only the exact sentinel means "all sites";
    /// anything else is taken as a site name, known or not.
    pub fn from_value(value: &str) -> Self {
        Self::from(value.to_string())
    }

    pub fn as_value(&self) -> &str {
        match self {
            SiteSelection::All => ALL_SITES,
            SiteSelection::Site(name) => name,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, SiteSelection::All)
    }

    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(name) => name == site,
        }
    }
}

impl From<String> for SiteSelection {
    fn from(value: String) -> Self {
        if value == ALL_SITES {
            SiteSelection::All
        } else {
            SiteSelection::Site(value)
        }
    }
}

impl From<SiteSelection> for String {
    fn from(site: SiteSelection) -> Self {
        match site {
            SiteSelection::All => ALL_SITES.to_string(),
            SiteSelection::Site(name) => name,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_value())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SelectionError {
    #[error("payload bounds must be finite numbers")]
    NonFinite,
    #[error("payload bounds must not be negative (got low = {low})")]
    Negative { low: f64 },
    #[error("payload low bound {low} exceeds high bound {high}")]
    Inverted { low: f64, high: f64 },
}

/// Closed payload interval in kilograms, `0 <= low <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct PayloadRange {
    low: f64,
    high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Result<Self, SelectionError> {
        if !low.is_finite() || !high.is_finite() {
            return Err(SelectionError::NonFinite);
        }
        if low < 0.0 {
            return Err(SelectionError::Negative { low });
        }
        if low > high {
            return Err(SelectionError::Inverted { low, high });
        }
        Ok(Self { low, high })
    }

    /// Full observed range of a table.
    pub fn observed(table: &LaunchTable) -> Self {
        let (low, high) = table.payload_bounds();
        Self { low, high }
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn contains(&self, payload_kg: f64) -> bool {
        payload_kg >= self.low && payload_kg <= self.high
    }
}

impl TryFrom<[f64; 2]> for PayloadRange {
    type Error = SelectionError;

    fn try_from([low, high]: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(low, high)
    }
}

impl From<PayloadRange> for [f64; 2] {
    fn from(range: PayloadRange) -> Self {
        [range.low, range.high]
    }
}

/// Current values of both dashboard controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub site: SiteSelection,
    pub payload: PayloadRange,
}

impl Selection {
    pub fn new(site: SiteSelection, payload: PayloadRange) -> Self {
        Self { site, payload }
    }

    /// All sites over the observed payload range, matching the widgets' initial state.
    pub fn initial(table: &LaunchTable) -> Self {
        Self {
            site: SiteSelection::All,
            payload: PayloadRange::observed(table),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_exact() {
        assert_eq!(SiteSelection::from_value("All"), SiteSelection::All);
        assert_eq!(
            SiteSelection::from_value("ALL"),
            SiteSelection::Site("ALL".into())
        );
        assert_eq!(SiteSelection::All.as_value(), "All");
        assert!(SiteSelection::All.matches("anything"));
        assert!(!SiteSelection::Site("KSC".into()).matches("CCAFS"));
    }

    #[test]
    fn json_and_control_values_agree() {
        for raw in ["All", "ALL", "KSC LC-39A", ""] {
            let json = serde_json::to_string(raw).unwrap();
            let decoded: SiteSelection = serde_json::from_str(&json).unwrap();
            assert_eq!(decoded, SiteSelection::from_value(raw));
        }
    }

    #[test]
    fn range_validation() {
        assert!(PayloadRange::new(0.0, 0.0).is_ok());
        assert_eq!(
            PayloadRange::new(5.0, 1.0),
            Err(SelectionError::Inverted { low: 5.0, high: 1.0 })
        );
        assert_eq!(
            PayloadRange::new(-1.0, 1.0),
            Err(SelectionError::Negative { low: -1.0 })
        );
        assert_eq!(
            PayloadRange::new(0.0, f64::NAN),
            Err(SelectionError::NonFinite)
        );
    }

    #[test]
    fn range_is_closed() {
        let r = PayloadRange::new(1000.0, 2000.0).unwrap();
        assert!(r.contains(1000.0));
        assert!(r.contains(2000.0));
        assert!(!r.contains(2000.5));
        assert!(!r.contains(999.9));
    }

    #[test]
    fn selection_json_shape() {
        let sel = Selection::new(
            SiteSelection::Site("KSC LC-39A".into()),
            PayloadRange::new(0.0, 10_000.0).unwrap(),
        );
        let json = serde_json::to_value(&sel).unwrap();
        assert_eq!(json["site"], "KSC LC-39A");
        assert_eq!(json["payload"], serde_json::json!([0.0, 10000.0]));

        let inverted = r#"{"site":"All","payload":[10.0,1.0]}"#;
        assert!(serde_json::from_str::<Selection>(inverted).is_err());
    }
}
