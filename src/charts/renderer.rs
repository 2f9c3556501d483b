//! Static Chart Renderer
//! Draws the two dashboard charts to PNG images with plotters.
//!
//! Layout follows the interactive view:
//! 1. "Daily Rides": line chart with point markers, dates on the x-axis
//! 2. "Rides by Weather Condition": bar chart, one bar per weather label

use super::plotter::{ChartPlotter, LINE_COLOR};
use crate::data::{DailyTotal, RideReport, WeatherTotal};
use chrono::Duration;
use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::fmt::Display;
use std::io::Cursor;
use std::ops::Range;
use std::path::{Path, PathBuf};
use thiserror::Error;

const FONT: &str = "sans-serif";
pub const DAILY_TITLE: &str = "Daily Rides";
pub const WEATHER_TITLE: &str = "Rides by Weather Condition";
pub const DAILY_FILE: &str = "daily_rides.png";
pub const WEATHER_FILE: &str = "rides_by_weather.png";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Chart drawing failed: {0}")]
    Draw(String),
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Invalid image size {0}x{1}")]
    InvalidSize(u32, u32),
    #[error("Failed to write {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),
}

fn draw_err(e: impl Display) -> RenderError {
    RenderError::Draw(e.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the daily rides line chart to PNG bytes.
    pub fn render_daily_rides(
        daily: &[DailyTotal],
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, RenderError> {
        let mut buffer = Self::pixel_buffer(width, height)?;
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;
            Self::draw_daily(&root, daily)?;
            root.present().map_err(draw_err)?;
        }
        Self::encode_png(width, height, buffer)
    }

    /// Render the weather bar chart to PNG bytes.
    pub fn render_weather(
        weather: &[WeatherTotal],
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, RenderError> {
        let mut buffer = Self::pixel_buffer(width, height)?;
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;
            Self::draw_weather(&root, weather)?;
            root.present().map_err(draw_err)?;
        }
        Self::encode_png(width, height, buffer)
    }

    /// Write both charts of a report into `dir`, returning the written paths.
    pub fn export_report(
        report: &RideReport,
        dir: &Path,
        width: u32,
        height: u32,
    ) -> Result<Vec<PathBuf>, RenderError> {
        let charts = [
            (DAILY_FILE, Self::render_daily_rides(&report.daily, width, height)?),
            (WEATHER_FILE, Self::render_weather(&report.weather, width, height)?),
        ];

        let mut written = Vec::with_capacity(charts.len());
        for (name, bytes) in charts {
            let path = dir.join(name);
            std::fs::write(&path, bytes).map_err(|e| RenderError::Io(path.clone(), e))?;
            info!("Wrote {}", path.display());
            written.push(path);
        }
        Ok(written)
    }

    /// Y-axis range covering all values with 10% headroom, always including zero.
    pub fn y_axis_range(values: impl Iterator<Item = i64>) -> Range<i64> {
        let (min, max) = values.fold((0i64, 0i64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        let pad = |v: i64| (v as f64 * 1.1).round() as i64;
        let hi = pad(max).max(1);
        (pad(min))..hi
    }

    fn pixel_buffer(width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidSize(width, height));
        }
        Ok(vec![0u8; width as usize * height as usize * 3])
    }

    fn encode_png(width: u32, height: u32, buffer: Vec<u8>) -> Result<Vec<u8>, RenderError> {
        let img = image::RgbImage::from_raw(width, height, buffer)
            .ok_or(RenderError::InvalidSize(width, height))?;
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Same colors as the interactive charts.
    fn to_rgb(color: egui::Color32) -> RGBColor {
        RGBColor(color.r(), color.g(), color.b())
    }

    fn bar_color(index: usize, count: usize) -> RGBColor {
        Self::to_rgb(ChartPlotter::bar_color(index, count))
    }

    fn draw_daily(
        root: &DrawingArea<BitMapBackend<'_>, Shift>,
        daily: &[DailyTotal],
    ) -> Result<(), RenderError> {
        let (Some(first), Some(last)) = (daily.first(), daily.last()) else {
            return Self::draw_empty(root, DAILY_TITLE);
        };

        // x is days since the first date
        let origin = first.date;
        let span = (last.date - origin).num_days().max(1) as f64;
        let y_range = Self::y_axis_range(daily.iter().map(|d| d.total_rides));

        let mut chart = ChartBuilder::on(root)
            .caption(DAILY_TITLE, (FONT, 36))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(100)
            .build_cartesian_2d(-0.5f64..span + 0.5, y_range)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_labels(8)
            .x_label_formatter(&|x| {
                (origin + Duration::days(x.round() as i64))
                    .format("%Y-%m-%d")
                    .to_string()
            })
            .x_label_style((FONT, 20))
            .y_label_style((FONT, 24))
            .y_desc("Total Rides")
            .axis_desc_style((FONT, 24))
            .draw()
            .map_err(draw_err)?;

        let line_color = Self::to_rgb(LINE_COLOR);
        let points: Vec<(f64, i64)> = daily
            .iter()
            .map(|d| ((d.date - origin).num_days() as f64, d.total_rides))
            .collect();

        chart
            .draw_series(LineSeries::new(
                points.iter().copied(),
                line_color.stroke_width(2),
            ))
            .map_err(draw_err)?;
        chart
            .draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 4, line_color.filled())),
            )
            .map_err(draw_err)?;

        Ok(())
    }

    fn draw_weather(
        root: &DrawingArea<BitMapBackend<'_>, Shift>,
        weather: &[WeatherTotal],
    ) -> Result<(), RenderError> {
        if weather.is_empty() {
            return Self::draw_empty(root, WEATHER_TITLE);
        }

        let count = weather.len();
        let y_range = Self::y_axis_range(weather.iter().map(|w| w.total_rides));

        let mut chart = ChartBuilder::on(root)
            .caption(WEATHER_TITLE, (FONT, 36))
            .margin(20)
            .x_label_area_size(70)
            .y_label_area_size(110)
            .build_cartesian_2d(-0.5f64..count as f64 - 0.5, y_range)
            .map_err(draw_err)?;

        // Category names are drawn under each bar below
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_label_formatter(&|_| String::new())
            .y_label_style((FONT, 22))
            .x_desc("Weather Condition")
            .y_desc("Total Rides")
            .axis_desc_style((FONT, 24))
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(weather.iter().enumerate().map(|(i, w)| {
                let x = i as f64;
                Rectangle::new(
                    [(x - 0.35, 0), (x + 0.35, w.total_rides)],
                    Self::bar_color(i, count).filled(),
                )
            }))
            .map_err(draw_err)?;

        let label_style =
            TextStyle::from((FONT, 22).into_font()).pos(Pos::new(HPos::Center, VPos::Top));
        for (i, w) in weather.iter().enumerate() {
            let (x, y) = chart.backend_coord(&(i as f64, 0i64));
            root.draw(&Text::new(
                w.code.to_string(),
                (x, y + 8),
                label_style.clone(),
            ))
            .map_err(draw_err)?;
        }

        Ok(())
    }

    fn draw_empty(
        root: &DrawingArea<BitMapBackend<'_>, Shift>,
        title: &str,
    ) -> Result<(), RenderError> {
        let (w, h) = root.dim_in_pixel();
        let style = TextStyle::from((FONT, 30).into_font()).pos(Pos::new(HPos::Center, VPos::Center));
        root.draw(&Text::new(
            format!("{}: no data in range", title),
            ((w / 2) as i32, (h / 2) as i32),
            style,
        ))
        .map_err(draw_err)
    }
}
