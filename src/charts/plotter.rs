//! Chart Plotter Module
//! Creates the interactive daily-rides and weather charts using egui_plot.

use crate::data::{DailyTotal, WeatherTotal};
use chrono::{Datelike, NaiveDate};
use egui::Color32;
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoints, Points};

/// Line color of the daily rides chart
pub const LINE_COLOR: Color32 = Color32::from_rgb(144, 202, 249); // #90CAF9

/// Dark-to-light blues for the weather bars
pub const BLUES: [Color32; 6] = [
    Color32::from_rgb(38, 68, 110),
    Color32::from_rgb(49, 90, 143),
    Color32::from_rgb(61, 112, 175),
    Color32::from_rgb(86, 136, 196),
    Color32::from_rgb(122, 163, 210),
    Color32::from_rgb(160, 190, 224),
];

/// Draws the dashboard charts with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Plot x coordinate for a date (days since the common era).
    pub fn date_to_x(date: NaiveDate) -> f64 {
        date.num_days_from_ce() as f64
    }

    /// Date nearest to a plot x coordinate.
    pub fn x_to_date(x: f64) -> Option<NaiveDate> {
        if !x.is_finite() {
            return None;
        }
        NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
    }

    /// Palette slot for bar `index` out of `count`, spread across the palette.
    pub fn palette_index(index: usize, count: usize, palette_len: usize) -> usize {
        if count <= 1 || palette_len <= 1 {
            return 0;
        }
        (index * (palette_len - 1) / (count - 1)).min(palette_len - 1)
    }

    pub fn bar_color(index: usize, count: usize) -> Color32 {
        BLUES[Self::palette_index(index, count, BLUES.len())]
    }

    /// Line chart of total rides per day, with point markers.
    pub fn draw_daily_rides_chart(ui: &mut egui::Ui, daily: &[DailyTotal], height: f32) {
        let points: Vec<[f64; 2]> = daily
            .iter()
            .map(|d| [Self::date_to_x(d.date), d.total_rides as f64])
            .collect();

        Plot::new("daily_rides")
            .height(height)
            .allow_scroll(false)
            .include_y(0.0)
            .y_axis_label("Total Rides")
            .x_axis_formatter(|mark, _range| {
                Self::x_to_date(mark.value)
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default()
            })
            .label_formatter(|_name, value| match Self::x_to_date(value.x) {
                Some(date) => format!("{}\n{:.0} rides", date.format("%Y-%m-%d"), value.y),
                None => String::new(),
            })
            .show(ui, |plot_ui| {
                if points.is_empty() {
                    return;
                }

                plot_ui.line(
                    Line::new(PlotPoints::from_iter(points.iter().copied()))
                        .color(LINE_COLOR)
                        .width(2.0)
                        .name("Total Rides"),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points.iter().copied()))
                        .radius(3.5)
                        .color(LINE_COLOR),
                );
            });
    }

    /// Bar chart of total rides per weather condition.
    pub fn draw_weather_chart(ui: &mut egui::Ui, weather: &[WeatherTotal], height: f32) {
        let labels: Vec<String> = weather.iter().map(|w| w.code.to_string()).collect();
        let count = weather.len();

        let bars: Vec<Bar> = weather
            .iter()
            .enumerate()
            .map(|(i, w)| {
                Bar::new(i as f64, w.total_rides as f64)
                    .width(0.6)
                    .name(w.code)
                    .fill(Self::bar_color(i, count))
            })
            .collect();

        Plot::new("rides_by_weather")
            .height(height)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_y(0.0)
            .x_axis_label("Weather Condition")
            .y_axis_label("Total Rides")
            .x_grid_spacer(move |_input| {
                (0..count)
                    .map(|i| GridMark {
                        value: i as f64,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .x_axis_formatter(move |mark, _range| {
                if mark.value < -0.5 {
                    return String::new();
                }
                labels
                    .get(mark.value.round() as usize)
                    .cloned()
                    .unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));
            });
    }
}
