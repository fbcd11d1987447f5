//! Chart.js configurations for the 6-month chart endpoints
//!
//! Gaps in the data (NaN closes, SMA warm-up) serialize as `null` so the
//! frontend draws a gap instead of a drop to zero.

use crate::error::{MarketError, Result};
use crate::model::PriceBar;
use serde_json::{Value, json};
use ta::indicators::SimpleMovingAverage;
use ta::{Next, Reset};

pub const SHORT_SMA_PERIOD: usize = 20;
pub const LONG_SMA_PERIOD: usize = 50;

fn labels(bars: &[PriceBar]) -> Vec<String> {
    bars.iter()
        .map(|bar| bar.date.format("%Y-%m-%d").to_string())
        .collect()
}

fn finite_or_null(value: f64) -> Value {
    if value.is_finite() { json!(value) } else { Value::Null }
}

fn closes(bars: &[PriceBar]) -> Vec<Value> {
    bars.iter().map(|bar| finite_or_null(bar.close)).collect()
}

/// Rolling mean over `period` closes
///
/// A point is present only when the preceding `period` closes are all
/// finite; a NaN close restarts the window.
pub fn rolling_mean(values: &[f64], period: usize) -> Result<Vec<Option<f64>>> {
    let mut sma = SimpleMovingAverage::new(period)
        .map_err(|e| MarketError::IndicatorError(e.to_string()))?;
    let mut streak = 0;

    Ok(values
        .iter()
        .map(|&value| {
            if !value.is_finite() {
                sma.reset();
                streak = 0;
                return None;
            }
            let mean = sma.next(value);
            streak += 1;
            (streak >= period).then_some(mean)
        })
        .collect())
}

fn base_options(title: String, begin_at_zero: bool) -> Value {
    json!({
        "responsive": true,
        "maintainAspectRatio": false,
        "interaction": { "intersect": false, "mode": "index" },
        "plugins": {
            "title": { "display": true, "text": title },
            "legend": { "position": "top" }
        },
        "scales": {
            "y": { "beginAtZero": begin_at_zero, "grid": { "drawBorder": false } },
            "x": { "grid": { "display": false } }
        }
    })
}

/// Line chart of closing prices
pub fn price_trend_config(symbol: &str, bars: &[PriceBar]) -> Value {
    json!({
        "type": "line",
        "data": {
            "labels": labels(bars),
            "datasets": [{
                "label": format!("{symbol} Price"),
                "data": closes(bars),
                "borderColor": "#0066B3",
                "backgroundColor": "rgba(0, 102, 179, 0.1)",
                "fill": true,
                "tension": 0.4,
                "spanGaps": true
            }]
        },
        "options": base_options(format!("Price Trend - {symbol}"), false)
    })
}

/// Bar chart of daily volume
pub fn volume_config(symbol: &str, bars: &[PriceBar]) -> Value {
    let volumes: Vec<u64> = bars.iter().map(|bar| bar.volume).collect();
    json!({
        "type": "bar",
        "data": {
            "labels": labels(bars),
            "datasets": [{
                "label": format!("{symbol} Volume"),
                "data": volumes,
                "backgroundColor": "rgba(90, 45, 129, 0.5)",
                "borderColor": "#5A2D81",
                "borderWidth": 1,
                "borderRadius": 4
            }]
        },
        "options": base_options(format!("Trading Volume - {symbol}"), true)
    })
}

/// Closing price with 20- and 50-day simple moving averages
pub fn technical_config(symbol: &str, bars: &[PriceBar]) -> Result<Value> {
    let raw: Vec<f64> = bars.iter().map(|bar| bar.close).collect();
    let sma = |period| -> Result<Vec<Value>> {
        Ok(rolling_mean(&raw, period)?
            .into_iter()
            .map(|point| point.map_or(Value::Null, |v| json!(v)))
            .collect())
    };
    let short = sma(SHORT_SMA_PERIOD)?;
    let long = sma(LONG_SMA_PERIOD)?;

    let mut options = base_options(format!("Technical Analysis - {symbol}"), false);
    options["plugins"]["legend"]["labels"] = json!({ "usePointStyle": true, "padding": 15 });
    options["plugins"]["tooltip"] = json!({ "mode": "index", "intersect": false });
    options["scales"]["y"]["grid"]["color"] = json!("rgba(0, 0, 0, 0.05)");
    options["scales"]["y"]["ticks"] = json!({ "padding": 10 });
    options["scales"]["x"]["ticks"] = json!({ "maxTicksLimit": 10, "maxRotation": 0 });

    Ok(json!({
        "type": "line",
        "data": {
            "labels": labels(bars),
            "datasets": [
                {
                    "label": format!("{symbol} Price"),
                    "data": closes(bars),
                    "borderColor": "#0D1F52",
                    "backgroundColor": "rgba(13, 31, 82, 0.1)",
                    "fill": false,
                    "tension": 0.4,
                    "borderWidth": 2,
                    "pointRadius": 0,
                    "spanGaps": true
                },
                {
                    "label": format!("{SHORT_SMA_PERIOD}-day SMA"),
                    "data": short,
                    "borderColor": "#E31B72",
                    "backgroundColor": "transparent",
                    "borderDash": [5, 5],
                    "borderWidth": 2,
                    "pointRadius": 0,
                    "fill": false,
                    "spanGaps": true
                },
                {
                    "label": format!("{LONG_SMA_PERIOD}-day SMA"),
                    "data": long,
                    "borderColor": "#5A2D81",
                    "backgroundColor": "transparent",
                    "borderDash": [10, 5],
                    "borderWidth": 2,
                    "pointRadius": 0,
                    "fill": false,
                    "spanGaps": true
                }
            ]
        },
        "options": options
    }))
}
