//! Charts module - interactive egui_plot visualizations

pub mod plotter;

pub use plotter::ChartPlotter;
