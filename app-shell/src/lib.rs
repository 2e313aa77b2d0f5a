use chart_render::Theme;
use dash_engine::{InputCell, OutputSlot, PayloadRange, Selection, ALL_SITES};
use launch_core::LaunchTable;
use serde::{Deserialize, Serialize};

pub const HEADING: &str = "SpaceX Launch Records Dashboard";
pub const ALL_SITES_LABEL: &str = "All Sites";
pub const SITE_PLACEHOLDER: &str = "Select a Launch Site";
pub const PAYLOAD_LABEL: &str = "Payload range (Kg):";

pub const SLIDER_MIN: f64 = 0.0;
pub const SLIDER_MAX: f64 = 10_000.0;
pub const SLIDER_STEP: f64 = 1_000.0;
pub const SLIDER_MARK_EVERY: f64 = 2_500.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DropdownSpec {
    pub id: String,
    pub options: Vec<DropdownOption>,
    /// Initial value; always one of `options`.
    pub value: String,
    pub placeholder: String,
    pub searchable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SliderMark {
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RangeSliderSpec {
    pub id: String,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub marks: Vec<SliderMark>,
    pub value: PayloadRange,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphSlot {
    pub id: String,
    pub slot: OutputSlot,
}

/// Everything the page needs to lay out its widgets, derived once from the table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardLayout {
    pub heading: String,
    pub theme: Theme,
    pub site_dropdown: DropdownSpec,
    pub pie_graph: GraphSlot,
    pub payload_label: String,
    pub payload_slider: RangeSliderSpec,
    pub scatter_graph: GraphSlot,
}

impl DashboardLayout {
    pub fn for_table(table: &LaunchTable) -> Self {
        let mut options = vec![DropdownOption {
            label: ALL_SITES_LABEL.to_string(),
            value: ALL_SITES.to_string(),
        }];
        options.extend(table.sites().iter().map(|site| DropdownOption {
            label: site.clone(),
            value: site.clone(),
        }));

        Self {
            heading: HEADING.to_string(),
            theme: Theme::Dark,
            site_dropdown: DropdownSpec {
                id: InputCell::Site.dom_id().to_string(),
                options,
                value: ALL_SITES.to_string(),
                placeholder: SITE_PLACEHOLDER.to_string(),
                searchable: true,
            },
            pie_graph: GraphSlot {
                id: OutputSlot::SuccessPie.dom_id().to_string(),
                slot: OutputSlot::SuccessPie,
            },
            payload_label: PAYLOAD_LABEL.to_string(),
            payload_slider: RangeSliderSpec {
                id: InputCell::PayloadRange.dom_id().to_string(),
                min: SLIDER_MIN,
                max: SLIDER_MAX,
                step: SLIDER_STEP,
                marks: slider_marks(),
                value: PayloadRange::observed(table),
            },
            scatter_graph: GraphSlot {
                id: OutputSlot::PayloadScatter.dom_id().to_string(),
                slot: OutputSlot::PayloadScatter,
            },
        }
    }

    /// Selection matching the widgets' initial values.
    pub fn initial_selection(&self) -> Selection {
        Selection::new(
            dash_engine::SiteSelection::from_value(&self.site_dropdown.value),
            self.payload_slider.value,
        )
    }
}

fn slider_marks() -> Vec<SliderMark> {
    let mut marks = Vec::new();
    let mut v = SLIDER_MIN;
    while v <= SLIDER_MAX {
        marks.push(SliderMark {
            value: v,
            label: format!("{v:.0}"),
        });
        v += SLIDER_MARK_EVERY;
    }
    marks
}

/// Layout plus records, fetched once by browser clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bootstrap {
    pub layout: DashboardLayout,
    pub records: LaunchTable,
}

impl Bootstrap {
    pub fn for_table(table: &LaunchTable) -> Self {
        Self {
            layout: DashboardLayout::for_table(table),
            records: table.clone(),
        }
    }
}

// ---------- Backend fetch ---------------------------------------------------

#[cfg(target_arch = "wasm32")]
pub async fn load_bootstrap_from_backend(api_base: &str) -> Result<Bootstrap, String> {
    use gloo_net::http::Request;

    let url = format!("{}/bootstrap", api_base.trim_end_matches('/'));
    let resp = Request::get(&url)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(format!("backend returned {}", resp.status()));
    }
    resp.json::<Bootstrap>().await.map_err(|e| e.to_string())
}
