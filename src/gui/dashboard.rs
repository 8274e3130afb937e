//! Dashboard View
//! Central panel: summary metrics, aggregation tabs and the raw data
//! table. Recomputes every view from the cached table on each frame.

use egui::{Color32, RichText, ScrollArea};
use std::collections::HashSet;

use crate::agg::Aggregator;
use crate::charts::ChartPlotter;
use crate::data::PayoutRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Country,
    Month,
}

/// Central dashboard area with metrics, tabs and charts.
pub struct DashboardView {
    tab: Tab,
}

impl Default for DashboardView {
    fn default() -> Self {
        Self { tab: Tab::Country }
    }
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the dashboard for the current filter selection.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        records: &[PayoutRecord],
        selected_years: &HashSet<i32>,
    ) {
        if records.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        }

        let filtered = Aggregator::filter_by_years(records, selected_years);
        let summary = Aggregator::summary(&filtered);

        // ===== Metrics =====
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            Self::metric(ui, "Total Payout", &format!("${}", format_grouped(summary.total_payout)));
            ui.add_space(30.0);
            Self::metric(ui, "Total Records", &group_thousands(summary.total_records as u64));
        });
        ui.add_space(10.0);
        ui.separator();

        // ===== Tabs =====
        ui.horizontal(|ui| {
            ui.selectable_value(&mut self.tab, Tab::Country, "Payout by Country");
            ui.selectable_value(&mut self.tab, Tab::Month, "Payout by Month");
        });
        ui.add_space(8.0);

        ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
            match self.tab {
                Tab::Country => {
                    ui.label(RichText::new("Payout by Country").size(16.0).strong());
                    ui.add_space(6.0);
                    let agg = Aggregator::sum_by_country(&filtered);
                    Self::draw_agg_table(ui, "country_table", "Country", &agg);
                    ui.add_space(10.0);
                    ui.label(
                        RichText::new("Top Countries by Total Payout")
                            .size(13.0)
                            .strong(),
                    );
                    ChartPlotter::draw_country_bar(ui, &agg);
                }
                Tab::Month => {
                    ui.label(RichText::new("Payout by Month").size(16.0).strong());
                    ui.add_space(6.0);
                    let agg = Aggregator::sum_by_month(&filtered);
                    Self::draw_agg_table(ui, "month_table", "YearMonth", &agg);
                    ui.add_space(10.0);
                    ui.label(RichText::new("Total Payout by Month").size(13.0).strong());
                    ChartPlotter::draw_month_line(ui, &agg);
                }
            }

            ui.add_space(12.0);

            // ===== Raw Data =====
            egui::CollapsingHeader::new("Raw Data").show(ui, |ui| {
                Self::draw_raw_table(ui, &filtered);
            });
        });
    }

    fn metric(ui: &mut egui::Ui, label: &str, value: &str) {
        ui.vertical(|ui| {
            ui.label(RichText::new(label).size(12.0).color(Color32::GRAY));
            ui.label(RichText::new(value).size(22.0).strong());
        });
    }

    /// Two-column aggregation table, full aggregation (no truncation).
    fn draw_agg_table(ui: &mut egui::Ui, id: &str, key_header: &str, rows: &[(String, f64)]) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new(ui.make_persistent_id(id))
                    .striped(true)
                    .min_col_width(120.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new(key_header).strong().size(11.0));
                        ui.label(RichText::new("PayoutValue").strong().size(11.0));
                        ui.end_row();

                        for (key, sum) in rows {
                            ui.label(RichText::new(key).size(11.0));
                            ui.label(RichText::new(format!("{:.2}", sum)).size(11.0));
                            ui.end_row();
                        }
                    });
            });
    }

    /// Full filtered table, newest first.
    fn draw_raw_table(ui: &mut egui::Ui, filtered: &[&PayoutRecord]) {
        let sorted = Aggregator::sorted_by_date_desc(filtered);

        egui::Grid::new(ui.make_persistent_id("raw_table"))
            .striped(true)
            .min_col_width(90.0)
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                for header in ["Date", "Name", "Location", "Payout", "PayoutValue", "Country"] {
                    ui.label(RichText::new(header).strong().size(11.0));
                }
                ui.end_row();

                for record in sorted {
                    ui.label(RichText::new(record.date.to_string()).size(11.0));
                    ui.label(RichText::new(&record.name).size(11.0));
                    ui.label(RichText::new(&record.location).size(11.0));
                    ui.label(RichText::new(&record.payout).size(11.0));
                    ui.label(RichText::new(format!("{:.2}", record.payout_value)).size(11.0));
                    ui.label(RichText::new(&record.country).size(11.0));
                    ui.end_row();
                }
            });
    }
}

/// Round to whole dollars and insert comma separators.
pub fn format_grouped(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let grouped = group_thousands(rounded.abs() as u64);
    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Comma-group an unsigned integer.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
