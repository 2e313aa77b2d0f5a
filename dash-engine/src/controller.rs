use std::str::FromStr;

use launch_core::LaunchTable;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chart::ChartSpec;
use crate::pie::pie_spec;
use crate::scatter::scatter_spec;
use crate::selection::{PayloadRange, Selection, SiteSelection};

/// Named control whose value feeds the recompute functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputCell {
    Site,
    PayloadRange,
}

impl InputCell {
    pub fn dom_id(&self) -> &'static str {
        match self {
            InputCell::Site => "site-dropdown",
            InputCell::PayloadRange => "payload-slider",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown input {0:?}; expected `site` or `payload_range`")]
pub struct UnknownInput(pub String);

/// Accepts the snake_case name or the DOM id.
impl FromStr for InputCell {
    type Err = UnknownInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "site" | "site-dropdown" => Ok(InputCell::Site),
            "payload_range" | "payload" | "payload-slider" => Ok(InputCell::PayloadRange),
            _ => Err(UnknownInput(s.to_string())),
        }
    }
}

/// Named figure slot on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputSlot {
    SuccessPie,
    PayloadScatter,
}

impl OutputSlot {
    pub fn dom_id(&self) -> &'static str {
        match self {
            OutputSlot::SuccessPie => "success-pie-chart",
            OutputSlot::PayloadScatter => "success-payload-scatter-chart",
        }
    }
}

/// Declares which inputs an output depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub output: OutputSlot,
    pub inputs: &'static [InputCell],
}

impl Binding {
    pub fn depends_on(&self, input: InputCell) -> bool {
        self.inputs.contains(&input)
    }
}

/// The pie ignores payload range, the scatter reads both controls.
pub const BINDINGS: [Binding; 2] = [
    Binding {
        output: OutputSlot::SuccessPie,
        inputs: &[InputCell::Site],
    },
    Binding {
        output: OutputSlot::PayloadScatter,
        inputs: &[InputCell::Site, InputCell::PayloadRange],
    },
];

pub fn affected_outputs(changed: InputCell) -> impl Iterator<Item = OutputSlot> {
    BINDINGS
        .into_iter()
        .filter(move |b| b.depends_on(changed))
        .map(|b| b.output)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub slot: OutputSlot,
    pub spec: ChartSpec,
}

/// Recompute facade over a loaded table; holds no per-request state.
#[derive(Debug, Clone)]
pub struct Dashboard {
    table: LaunchTable,
}

impl Dashboard {
    pub fn new(table: LaunchTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &LaunchTable {
        &self.table
    }

    pub fn initial_selection(&self) -> Selection {
        Selection::initial(&self.table)
    }

    pub fn pie(&self, site: &SiteSelection) -> ChartSpec {
        pie_spec(self.table.records(), site)
    }

    pub fn scatter(&self, site: &SiteSelection, payload: &PayloadRange) -> ChartSpec {
        scatter_spec(self.table.records(), site, payload)
    }

    pub fn recompute(&self, slot: OutputSlot, selection: &Selection) -> ChartSpec {
        match slot {
            OutputSlot::SuccessPie => self.pie(&selection.site),
            OutputSlot::PayloadScatter => self.scatter(&selection.site, &selection.payload),
        }
    }

    /// Recompute only the slots bound to `changed`.
    pub fn on_input_changed(&self, changed: InputCell, selection: &Selection) -> Vec<Figure> {
        affected_outputs(changed)
            .map(|slot| Figure {
                slot,
                spec: self.recompute(slot, selection),
            })
            .collect()
    }

    /// Every slot, used for the first paint.
    pub fn render_all(&self, selection: &Selection) -> Vec<Figure> {
        BINDINGS
            .iter()
            .map(|b| Figure {
                slot: b.output,
                spec: self.recompute(b.output, selection),
            })
            .collect()
    }
}
