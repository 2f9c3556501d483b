//! Bike Sharing Dashboard - daily rides and weather breakdown viewer
//!
//! Loads a daily bike rental CSV, lets the user pick a date range and shows
//! total rides per day and per weather condition.

mod charts;
mod config;
mod data;
mod gui;

use anyhow::{anyhow, Context};
use config::{DashboardSettings, DEFAULT_SETTINGS_PATH};
use data::{DataLoader, DateRange, LoaderError};
use eframe::egui;
use gui::DashboardApp;
use log::info;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = DashboardSettings::load_or_default(DEFAULT_SETTINGS_PATH)?;

    // Load data
    let table = DataLoader::load_csv(&settings.data_path)
        .with_context(|| format!("loading {}", settings.data_path.display()))?;
    let (min_date, max_date) = table.date_bounds().ok_or(LoaderError::NoData)?;
    let bounds = DateRange::new(min_date, max_date);

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.window_width, settings.window_height])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Bike Sharing Dashboard"),
        ..Default::default()
    };

    info!(
        "Starting dashboard for {} to {}, {} rides total",
        min_date,
        max_date,
        table.total_rides()
    );

    // Run the application
    eframe::run_native(
        "Bike Sharing Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, table, bounds, settings)))),
    )
    .map_err(|e| anyhow!("dashboard window failed: {}", e))
}
