use chrono::{Duration, NaiveDate};
use liftrank_domain as domain;
use plotters::{
    chart::ChartBuilder,
    prelude::{IntoDrawingArea, SVGBackend},
    series::Histogram,
    style::{Color, IntoFont, Palette, Palette99, RGBColor, TextStyle, WHITE},
};

use crate::{
    Theme,
    settings::{CHART_WIDTH_MAX, CHART_WIDTH_MIN},
};

pub const COLOR_VOLUME: usize = 6;

pub const OPACITY_ACTIVE: f64 = 0.9;
pub const OPACITY_INACTIVE: f64 = 0.15;

pub const HEIGHT: u32 = 200;

/// Minimal bar heights relative to the chart height.
///
/// A day without activity is still drawn, but lower than any active day.
pub const MIN_BAR_ACTIVE: f32 = 4.0 / 120.0;
pub const MIN_BAR_INACTIVE: f32 = 2.0 / 120.0;

pub const FONT: (&str, u32) = ("sans-serif", 11);

/// Height of the bar for a day, scaled to `height`.
///
/// `max_volume` must be positive, which `Progress::max_daily_volume`
/// guarantees.
#[must_use]
pub fn bar_height(bucket: &domain::DayBucket, max_volume: f32, height: f32) -> f32 {
    let min = if bucket.is_active() {
        MIN_BAR_ACTIVE
    } else {
        MIN_BAR_INACTIVE
    };
    f32::max(bucket.volume / max_volume * height, min * height)
}

/// Plot the daily volume of the last days as SVG.
///
/// Returns `None` if there was no activity on any day.
#[allow(clippy::missing_errors_doc)]
pub fn plot_daily_volume(
    progress: &domain::Progress,
    theme: Theme,
    width: u32,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let (Some(first), Some(last)) = (
        progress.daily_series.first().map(|d| d.date),
        progress.daily_series.last().map(|d| d.date),
    ) else {
        return Ok(None);
    };

    if !progress.daily_series.iter().any(domain::DayBucket::is_active) {
        return Ok(None);
    }

    let max_volume = progress.max_daily_volume();
    let bars = |active: bool| {
        progress
            .daily_series
            .iter()
            .filter(move |d| d.is_active() == active)
            .map(move |d| (d.date, bar_height(d, max_volume, max_volume)))
            .collect::<Vec<(NaiveDate, f32)>>()
    };

    let mut result = String::new();

    {
        let root = SVGBackend::with_string(&mut result, (chart_width(width), HEIGHT))
            .into_drawing_area();
        let (color, background_color) = colors(theme);

        root.fill(&background_color)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(10f32)
            .x_label_area_size(30f32)
            .y_label_area_size(50f32)
            .build_cartesian_2d(first..last + Duration::days(1), 0f32..max_volume * 1.1)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .set_all_tick_mark_size(3u32)
            .axis_style(color.mix(0.3))
            .bold_line_style(color.mix(0.05))
            .light_line_style(color.mix(0.0))
            .label_style(TextStyle::from(FONT.into_font()).color(&color))
            .x_labels(domain::DAYS)
            .x_label_formatter(&|date| date.format("%a").to_string())
            .y_labels(5)
            .draw()?;

        chart.draw_series(
            Histogram::vertical(&chart)
                .style(color.mix(OPACITY_INACTIVE).filled())
                .margin(4)
                .data(bars(false)),
        )?;
        chart.draw_series(
            Histogram::vertical(&chart)
                .style(Palette99::pick(COLOR_VOLUME).mix(OPACITY_ACTIVE).filled())
                .margin(4)
                .data(bars(true)),
        )?;

        root.present()?;
    }

    Ok(Some(result))
}

fn colors(theme: Theme) -> (RGBColor, RGBColor) {
    let dark = RGBColor(20, 22, 26);
    match theme {
        Theme::Light => (dark, WHITE),
        Theme::Dark => (WHITE, dark),
    }
}

fn chart_width(width: u32) -> u32 {
    width.clamp(CHART_WIDTH_MIN, CHART_WIDTH_MAX)
}
