use chrono::{DateTime, TimeZone, Utc};
use liftrank_app::Unit;
use liftrank_domain as domain;

/// Label of the day `date` falls on, relative to `now`.
pub fn format_date<Tz: TimeZone>(date: &DateTime<Utc>, now: &DateTime<Tz>) -> String {
    let day = date.with_timezone(&now.timezone()).date_naive();
    let today = now.date_naive();

    if day == today {
        "Today".to_string()
    } else if today.pred_opt() == Some(day) {
        "Yesterday".to_string()
    } else {
        day.format("%b %-d, %Y").to_string()
    }
}

/// Format a number with thousands separators and at most three decimals.
pub fn format_number(value: f32) -> String {
    let rounded = (f64::from(value) * 1000.0).round() / 1000.0;
    let formatted = format!("{:.3}", rounded.abs());
    let (integer, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut result = String::new();
    if rounded < 0.0 {
        result.push('-');
    }
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    if !fraction.is_empty() {
        result.push('.');
        result.push_str(fraction);
    }
    result
}

pub fn format_weight(value: f32, unit: Unit) -> String {
    format!("{} {unit}", format_number(value))
}

/// Volume in thousands with one decimal, e.g. `12.3K`.
pub fn format_volume_k(volume: f32) -> String {
    format!("{:.1}K", volume / 1000.0)
}

pub fn rank_symbol(rank: domain::Rank) -> &'static str {
    match rank {
        domain::Rank::Gold => "🥇",
        domain::Rank::Silver => "🥈",
        domain::Rank::Bronze => "🥉",
    }
}

/// What it takes to reach a rank.
pub fn rank_description(rank: domain::Rank, unit: Unit) -> String {
    match rank {
        domain::Rank::Gold => format!(
            "{}K+ volume or {}+ {unit}",
            domain::GOLD_TOTAL_VOLUME / 1000.0,
            domain::GOLD_MAX_WEIGHT
        ),
        domain::Rank::Silver => format!(
            "{}K+ volume or {}+ {unit}",
            domain::SILVER_TOTAL_VOLUME / 1000.0,
            domain::SILVER_MAX_WEIGHT
        ),
        domain::Rank::Bronze => "Getting started".to_string(),
    }
}
