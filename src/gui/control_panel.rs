//! Control Panel Widget
//! Left side panel with the time range selector and export controls.

use crate::data::{DateRange, RideReport};
use chrono::NaiveDate;
use egui::{Color32, RichText};
use egui_extras::DatePickerButton;

/// Left side control panel with date range selection.
pub struct ControlPanel {
    /// Earliest and latest date in the dataset
    pub bounds: DateRange,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub status: String,
}

impl ControlPanel {
    /// Start with the full dataset range selected.
    pub fn new(bounds: DateRange) -> Self {
        Self {
            bounds,
            start: bounds.start,
            end: bounds.end,
            status: "Ready".to_string(),
        }
    }

    /// Current selection, clamped to the dataset bounds.
    pub fn selected_range(&self) -> DateRange {
        DateRange::clamped(self.start, self.end, self.bounds)
    }

    /// Select the full dataset range again.
    pub fn reset(&mut self) {
        self.start = self.bounds.start;
        self.end = self.bounds.end;
    }

    /// Write picker values back in normalized form, reporting whether they moved.
    pub fn normalize(&mut self, previous: DateRange) -> bool {
        let range = self.selected_range();
        self.start = range.start;
        self.end = range.end;
        range != previous
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, report: &RideReport) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;
        let previous = self.selected_range();

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🚲 Bike Sharing")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(RichText::new("Dashboard").size(11.0).color(Color32::GRAY));
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Time Range Section =====
        ui.label(RichText::new("📅 Time Range").size(14.0).strong());
        ui.add_space(8.0);

        let label_width = 50.0;

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Start:"));
            ui.add(
                DatePickerButton::new(&mut self.start)
                    .id_salt("start_date")
                    .calendar_week(false),
            );
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("End:"));
            ui.add(
                DatePickerButton::new(&mut self.end)
                    .id_salt("end_date")
                    .calendar_week(false),
            );
        });

        ui.add_space(5.0);
        ui.label(
            RichText::new(format!(
                "Available: {} to {}",
                self.bounds.start, self.bounds.end
            ))
            .size(11.0)
            .color(Color32::GRAY),
        );

        ui.add_space(5.0);
        if ui.small_button("Reset to full range").clicked() {
            self.reset();
        }

        if self.normalize(previous) {
            action = ControlPanelAction::RangeChanged;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Summary Section =====
        ui.label(RichText::new("📊 Selection").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("selection_summary")
                    .num_columns(2)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label("Days:");
                        ui.label(report.range.num_days().to_string());
                        ui.end_row();

                        ui.label("Records:");
                        ui.label(report.record_count.to_string());
                        ui.end_row();

                        ui.label("Total rides:");
                        ui.label(report.total_rides().to_string());
                        ui.end_row();
                    });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export =====
        ui.vertical_centered(|ui| {
            let button = egui::Button::new(RichText::new("📄 Export PNG").size(14.0))
                .min_size(egui::vec2(150.0, 30.0));
            if ui.add(button).clicked() {
                action = ControlPanelAction::ExportPng;
            }
        });

        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    RangeChanged,
    ExportPng,
}
