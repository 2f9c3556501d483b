//! Chart Viewer Widget
//! Central scrollable panel with the daily rides and weather charts.

use crate::charts::ChartPlotter;
use crate::data::RideReport;
use egui::{Color32, RichText, ScrollArea};

const DAILY_CHART_HEIGHT: f32 = 380.0;
const WEATHER_CHART_HEIGHT: f32 = 320.0;
const SECTION_SPACING: f32 = 20.0;

/// Renders a ride report: two subheaded charts and the caption.
pub struct ChartViewer {
    caption: String,
}

impl ChartViewer {
    pub fn new(caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
        }
    }

    pub fn show(&self, ui: &mut egui::Ui, report: &RideReport) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if report.record_count == 0 {
                    ui.label(
                        RichText::new("No rentals in the selected range")
                            .size(13.0)
                            .color(Color32::GRAY),
                    );
                    ui.add_space(8.0);
                }

                ui.label(RichText::new("Daily Rides").size(20.0).strong());
                ui.add_space(8.0);
                ChartPlotter::draw_daily_rides_chart(ui, &report.daily, DAILY_CHART_HEIGHT);

                ui.add_space(SECTION_SPACING);

                ui.label(
                    RichText::new("Rides by Weather Condition")
                        .size(20.0)
                        .strong(),
                );
                ui.add_space(8.0);
                ChartPlotter::draw_weather_chart(ui, &report.weather, WEATHER_CHART_HEIGHT);

                ui.add_space(SECTION_SPACING);
                ui.label(RichText::new(&self.caption).size(11.0).color(Color32::GRAY));
            });
    }
}
