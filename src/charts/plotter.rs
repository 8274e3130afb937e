//! Chart Plotter Module
//! Creates interactive visualizations using egui_plot.

use egui::Color32;
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};

use crate::agg::aggregator::TOP_COUNTRIES;

pub const BAR_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue
pub const LINE_COLOR: Color32 = Color32::from_rgb(46, 204, 113); // Green

/// Creates the dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Bar chart of total payout per country, highest first, truncated
    /// to the top countries. The table view next to it stays complete.
    pub fn draw_country_bar(ui: &mut egui::Ui, country_sums: &[(String, f64)]) {
        let top: Vec<(String, f64)> = country_sums.iter().take(TOP_COUNTRIES).cloned().collect();

        let bars: Vec<Bar> = top
            .iter()
            .enumerate()
            .map(|(i, (country, sum))| {
                Bar::new(i as f64, *sum)
                    .width(0.6)
                    .fill(BAR_COLOR.gamma_multiply(0.8))
                    .name(country)
            })
            .collect();

        let x_labels: Vec<String> = top.iter().map(|(c, _)| c.clone()).collect();

        Plot::new("country_bar")
            .height(300.0)
            .allow_scroll(false)
            .x_axis_label("Country")
            .y_axis_label("Payout ($)")
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if (mark.value - idx as f64).abs() < 1e-6 && idx < x_labels.len() {
                    x_labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name("Total Payout"));
            });
    }

    /// Line chart of total payout per month with point markers.
    /// Months arrive already sorted chronologically.
    pub fn draw_month_line(ui: &mut egui::Ui, month_sums: &[(String, f64)]) {
        let points: Vec<[f64; 2]> = month_sums
            .iter()
            .enumerate()
            .map(|(i, (_, sum))| [i as f64, *sum])
            .collect();

        let x_labels: Vec<String> = month_sums.iter().map(|(m, _)| m.clone()).collect();

        Plot::new("month_line")
            .height(300.0)
            .allow_scroll(false)
            .x_axis_label("Month")
            .y_axis_label("Payout ($)")
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if (mark.value - idx as f64).abs() < 1e-6 && idx < x_labels.len() {
                    x_labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(points.iter().copied()))
                        .color(LINE_COLOR)
                        .width(2.0)
                        .name("Total Payout"),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points.iter().copied()))
                        .radius(4.0)
                        .color(LINE_COLOR),
                );
            });
    }
}
