//! Filter, pie and scatter recompute functions for the launch dashboard.
//!
//! Everything here is a plain function over `&[LaunchRecord]`. Reactive
//! substrates bind to [`Dashboard`] through the [`BINDINGS`] table.

pub mod chart;
pub mod controller;
pub mod filter;
pub mod pie;
pub mod scatter;
pub mod selection;

pub use chart::{ChartSpec, PieChart, PieSlice, ScatterChart, ScatterPoint};
pub use controller::{
    affected_outputs, Binding, Dashboard, Figure, InputCell, OutputSlot, UnknownInput, BINDINGS,
};
pub use filter::{filter, filter_site};
pub use pie::{pie_spec, ALL_SITES_PIE_TITLE, FAILURE_LABEL, SUCCESS_LABEL};
pub use scatter::{scatter_spec, ALL_SITES_SCATTER_TITLE};
pub use selection::{PayloadRange, Selection, SelectionError, SiteSelection, ALL_SITES};
