//! Sidebar Widget
//! Left side panel with the data source picker and the year filter.

use egui::{Color32, RichText};
use std::collections::HashSet;
use std::path::PathBuf;

/// Left side panel: file selection, year multiselect and status line.
pub struct Sidebar {
    pub csv_path: Option<PathBuf>,
    years: Vec<i32>,
    selected: Vec<bool>,
    pub status: String,
}

impl Default for Sidebar {
    fn default() -> Self {
        Self {
            csv_path: None,
            years: Vec::new(),
            selected: Vec::new(),
            status: "Ready".to_string(),
        }
    }
}

impl Sidebar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the year list after a load. Every year starts selected.
    pub fn update_years(&mut self, years: Vec<i32>) {
        self.selected = vec![true; years.len()];
        self.years = years;
    }

    /// The currently selected years. An empty set means no filtering.
    pub fn selected_years(&self) -> HashSet<i32> {
        self.years
            .iter()
            .zip(self.selected.iter())
            .filter(|(_, &on)| on)
            .map(|(&year, _)| year)
            .collect()
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Draw the sidebar.
    pub fn show(&mut self, ui: &mut egui::Ui) -> SidebarAction {
        let mut action = SidebarAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("💰 Apex Payouts")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Payouts by country and month")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.csv_path.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = SidebarAction::BrowseCsv;
                        }
                    });
                });
            });

        ui.add_space(5.0);
        if ui.small_button("⟳ Reload").clicked() {
            action = SidebarAction::Reload;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Filters Section =====
        ui.label(RichText::new("🔍 Filters").size(14.0).strong());
        ui.add_space(5.0);
        ui.label("Year:");

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                if self.years.is_empty() {
                    ui.label(RichText::new("No data loaded").size(11.0).color(Color32::GRAY));
                }
                for (i, year) in self.years.iter().enumerate() {
                    if ui.checkbox(&mut self.selected[i], year.to_string()).changed() {
                        action = SidebarAction::FilterChanged;
                    }
                }
            });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.small_button("Select All").clicked() {
                self.selected.iter_mut().for_each(|v| *v = true);
                action = SidebarAction::FilterChanged;
            }
            if ui.small_button("Clear All").clicked() {
                // Cleared selection means "all years", not "no rows".
                self.selected.iter_mut().for_each(|v| *v = false);
                action = SidebarAction::FilterChanged;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status =====
        let status_color = if self.status.contains("Error") || self.status.contains("not found") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Loaded") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }
}

/// Actions triggered by the sidebar.
#[derive(Debug, Clone, PartialEq)]
pub enum SidebarAction {
    None,
    BrowseCsv,
    Reload,
    FilterChanged,
}
