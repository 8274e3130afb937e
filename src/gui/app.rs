//! Apex Payouts Main Application
//! Main window with sidebar filters and the dashboard view. CSV loading
//! runs on a background thread so the UI stays responsive.

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::thread;

use crate::agg::Aggregator;
use crate::config;
use crate::data::{self, PayoutRecord};
use crate::gui::{DashboardView, Sidebar, SidebarAction};
use egui::SidePanel;

/// CSV loading result from the background thread.
enum LoadResult {
    Complete(Vec<PayoutRecord>),
    Error(String),
}

/// Main application window.
pub struct PayoutsApp {
    records: Arc<Vec<PayoutRecord>>,
    sidebar: Sidebar,
    dashboard: DashboardView,

    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl PayoutsApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self {
            records: Arc::new(Vec::new()),
            sidebar: Sidebar::new(),
            dashboard: DashboardView::new(),
            load_rx: None,
            is_loading: false,
        };

        // The configured source loads on startup; a missing file is a
        // user-visible error, not a crash.
        let path = config::csv_path();
        app.sidebar.csv_path = Some(path.clone());
        app.start_load(path);
        app
    }

    /// Pick a CSV with the system file dialog.
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return;
        }
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.sidebar.csv_path = Some(path.clone());
            self.start_load(path);
        }
    }

    /// Load (or reload) the table on a background thread.
    fn start_load(&mut self, path: PathBuf) {
        self.sidebar
            .set_status(format!("Loading {}...", path.display()));
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        thread::spawn(move || {
            let result = match data::load(&path) {
                Ok(records) => LoadResult::Complete(records),
                Err(e) => LoadResult::Error(e.to_string()),
            };
            let _ = tx.send(result);
        });
    }

    /// Check for CSV loading results.
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Complete(records) => {
                        self.sidebar
                            .set_status(format!("Loaded {} records", records.len()));
                        self.sidebar.update_years(Aggregator::years_present(&records));
                        self.records = Arc::new(records);
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(error) => {
                        self.sidebar.set_status(format!("Error: {}", error));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }
}

impl eframe::App for PayoutsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - filters
        SidePanel::left("sidebar")
            .min_width(240.0)
            .max_width(300.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.sidebar.show(ui);

                    match action {
                        SidebarAction::BrowseCsv => self.handle_browse_csv(),
                        SidebarAction::Reload => {
                            if !self.is_loading {
                                if let Some(path) = self.sidebar.csv_path.clone() {
                                    self.start_load(path);
                                }
                            }
                        }
                        // Views recompute from the cached table each
                        // frame, so a filter change needs no extra work.
                        SidebarAction::FilterChanged | SidebarAction::None => {}
                    }
                });
            });

        // Central panel - dashboard
        let records = Arc::clone(&self.records);
        let selected_years = self.sidebar.selected_years();
        egui::CentralPanel::default().show(ctx, |ui| {
            self.dashboard.show(ui, &records, &selected_years);
        });
    }
}
