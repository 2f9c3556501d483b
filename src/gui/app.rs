//! Bike Sharing Dashboard Main Application
//! Main window with control panel and chart viewer.

use crate::charts::StaticChartRenderer;
use crate::config::DashboardSettings;
use crate::data::{DateRange, RentalTable, RideReport};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use log::{error, info};

/// Main application window.
pub struct DashboardApp {
    table: RentalTable,
    settings: DashboardSettings,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    report: RideReport,
}

impl DashboardApp {
    /// `bounds` is the dataset's min/max date and becomes the initial selection.
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        table: RentalTable,
        bounds: DateRange,
        settings: DashboardSettings,
    ) -> Self {
        let report = RideReport::build(&table, bounds, settings.fill_missing_days);

        Self {
            control_panel: ControlPanel::new(bounds),
            chart_viewer: ChartViewer::new(settings.caption.clone()),
            table,
            settings,
            report,
        }
    }

    /// Re-run filter and aggregation for the current selection
    fn handle_range_changed(&mut self) {
        let range = self.control_panel.selected_range();
        self.report = RideReport::build(&self.table, range, self.settings.fill_missing_days);
    }

    /// Save both charts as PNG into a folder picked by the user
    fn handle_export_png(&mut self) {
        let Some(dir) = rfd::FileDialog::new()
            .set_title("Export charts to folder")
            .pick_folder()
        else {
            return; // User cancelled
        };

        match StaticChartRenderer::export_report(
            &self.report,
            &dir,
            self.settings.export_width,
            self.settings.export_height,
        ) {
            Ok(paths) => {
                info!("Exported {} charts to {}", paths.len(), dir.display());
                self.control_panel
                    .set_status(&format!("Exported {} charts to {}", paths.len(), dir.display()));
            }
            Err(e) => {
                error!("Chart export failed: {}", e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui, &self.report);

                    match action {
                        ControlPanelAction::RangeChanged => self.handle_range_changed(),
                        ControlPanelAction::ExportPng => self.handle_export_png(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui, &self.report);
        });
    }
}
