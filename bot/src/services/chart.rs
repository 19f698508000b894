//! Candlestick chart rendering: price panel with SMA(3)/SMA(15) overlays,
//! a volume subpanel and a 14-period RSI subpanel with 70/30 bands.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use plotters::prelude::*;
use tempfile::NamedTempFile;

use crate::services::indicators::{calculate_rsi, calculate_sma, RSI_PERIOD};
use shared::CandleResponse;

const WIDTH: u32 = 1280;
const HEIGHT: u32 = 960;
const FAST_SMA: usize = 3;
const SLOW_SMA: usize = 15;
const RSI_OVERBOUGHT: f64 = 70.0;
const RSI_OVERSOLD: f64 = 30.0;

/// Renders the chart into a uniquely named temp PNG. The file is removed
/// when the returned handle drops, whatever happened to the send.
pub fn render_candle_chart(
    candles: &CandleResponse,
    symbol: &str,
    resolution_label: &str,
) -> Result<NamedTempFile> {
    let image = chart_image_file(symbol)?;
    draw(candles, symbol, resolution_label, image.path())?;
    Ok(image)
}

/// Unique .png destination; the name embeds symbol and timestamp.
fn chart_image_file(symbol: &str) -> Result<NamedTempFile> {
    tempfile::Builder::new()
        .prefix(&format!("chart-{}-{}-", symbol, Utc::now().timestamp()))
        .suffix(".png")
        .tempfile()
        .context("creating chart image file")
}

fn draw(
    candles: &CandleResponse,
    symbol: &str,
    resolution_label: &str,
    path: &std::path::Path,
) -> Result<()> {
    let n = candles.timestamps.len();
    anyhow::ensure!(n > 0, "no candles to draw");
    anyhow::ensure!(
        candles.open.len() == n
            && candles.high.len() == n
            && candles.low.len() == n
            && candles.close.len() == n
            && candles.volume.len() == n,
        "candle arrays are misaligned"
    );

    let x_range = -0.5..(n as f64 - 0.5);
    let (price_floor, price_ceil) = price_bounds(candles);
    let max_volume = candles.volume.iter().cloned().fold(0.0_f64, f64::max);

    let timestamps = candles.timestamps.clone();
    let span_secs = timestamps.last().unwrap() - timestamps[0];
    let time_format = if span_secs < 14 * 24 * 3600 {
        "%m-%d %H:%M"
    } else {
        "%m-%d-%Y"
    };
    let x_label = move |x: &f64| -> String {
        let i = x.round() as i64;
        if i < 0 || i as usize >= timestamps.len() {
            return String::new();
        }
        DateTime::<Utc>::from_timestamp(timestamps[i as usize], 0)
            .map(|t| t.format(time_format).to_string())
            .unwrap_or_default()
    };

    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;
    let (price_area, lower) = root.split_vertically(540);
    let (volume_area, rsi_area) = lower.split_vertically(180);

    // Price panel: candles plus the two moving averages.
    let mut price_chart = ChartBuilder::on(&price_area)
        .caption(
            format!("{} ({})", symbol, resolution_label),
            ("sans-serif", 28),
        )
        .margin(8)
        .x_label_area_size(0)
        .y_label_area_size(64)
        .build_cartesian_2d(x_range.clone(), price_floor..price_ceil)?;
    price_chart
        .configure_mesh()
        .disable_x_mesh()
        .y_labels(8)
        .draw()?;

    let candle_width = ((WIDTH as f64 / n as f64) * 0.6).clamp(1.0, 12.0) as u32;
    price_chart.draw_series(candles.timestamps.iter().enumerate().map(|(i, _)| {
        CandleStick::new(
            i as f64,
            candles.open[i],
            candles.high[i],
            candles.low[i],
            candles.close[i],
            GREEN.filled(),
            RED.filled(),
            candle_width,
        )
    }))?;

    let fast = calculate_sma(&candles.close, FAST_SMA);
    let slow = calculate_sma(&candles.close, SLOW_SMA);
    price_chart
        .draw_series(LineSeries::new(series_points(&fast), BLUE.stroke_width(2)))?
        .label(format!("SMA {}", FAST_SMA))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], BLUE.stroke_width(2)));
    price_chart
        .draw_series(LineSeries::new(
            series_points(&slow),
            MAGENTA.stroke_width(2),
        ))?
        .label(format!("SMA {}", SLOW_SMA))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], MAGENTA.stroke_width(2)));
    price_chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()?;

    // Volume panel, bars colored by candle direction.
    let mut volume_chart = ChartBuilder::on(&volume_area)
        .margin(8)
        .x_label_area_size(0)
        .y_label_area_size(64)
        .build_cartesian_2d(x_range.clone(), 0.0..(max_volume * 1.1).max(1.0))?;
    volume_chart
        .configure_mesh()
        .disable_x_mesh()
        .y_labels(4)
        .draw()?;
    volume_chart.draw_series(candles.volume.iter().enumerate().map(|(i, &volume)| {
        let color = if candles.close[i] >= candles.open[i] {
            GREEN.mix(0.5)
        } else {
            RED.mix(0.5)
        };
        Rectangle::new(
            [(i as f64 - 0.35, 0.0), (i as f64 + 0.35, volume)],
            color.filled(),
        )
    }))?;

    // RSI panel with the overbought/oversold reference lines.
    let mut rsi_chart = ChartBuilder::on(&rsi_area)
        .margin(8)
        .x_label_area_size(32)
        .y_label_area_size(64)
        .build_cartesian_2d(x_range, 0.0..100.0_f64)?;
    rsi_chart
        .configure_mesh()
        .disable_x_mesh()
        .y_labels(5)
        .x_labels(8)
        .x_label_formatter(&x_label)
        .draw()?;

    let rsi = calculate_rsi(&candles.close, RSI_PERIOD);
    rsi_chart.draw_series(LineSeries::new(
        series_points(&rsi),
        RGBColor(90, 60, 160).stroke_width(2),
    ))?;
    for level in [RSI_OVERBOUGHT, RSI_OVERSOLD] {
        rsi_chart.draw_series(LineSeries::new(
            (0..n).map(|i| (i as f64, level)),
            RED.mix(0.4),
        ))?;
    }

    root.present().context("writing chart image")?;
    Ok(())
}

fn series_points(series: &[Option<f64>]) -> Vec<(f64, f64)> {
    series
        .iter()
        .enumerate()
        .filter_map(|(i, value)| value.map(|v| (i as f64, v)))
        .collect()
}

fn price_bounds(candles: &CandleResponse) -> (f64, f64) {
    let low = candles.low.iter().cloned().fold(f64::INFINITY, f64::min);
    let high = candles
        .high
        .iter()
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max);
    let pad = ((high - low) * 0.05).max(high.abs() * 0.001);
    (low - pad, high + pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_candles(n: usize) -> CandleResponse {
        let mut open = Vec::new();
        let mut high = Vec::new();
        let mut low = Vec::new();
        let mut close = Vec::new();
        let mut volume = Vec::new();
        let mut timestamps = Vec::new();
        for i in 0..n {
            let base = 100.0 + ((i * 13) % 17) as f64 - 8.0;
            open.push(base);
            close.push(base + if i % 2 == 0 { 1.5 } else { -1.0 });
            high.push(base + 2.5);
            low.push(base - 2.0);
            volume.push(1000.0 + (i % 7) as f64 * 350.0);
            timestamps.push(1_700_000_000 + (i as i64) * 900);
        }
        CandleResponse {
            status: "ok".to_string(),
            open,
            high,
            low,
            close,
            volume,
            timestamps,
        }
    }

    #[test]
    fn image_file_is_removed_on_drop() {
        let image = chart_image_file("AAPL").unwrap();
        let path = image.path().to_path_buf();
        assert!(path.exists());
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));
        drop(image);
        assert!(!path.exists());
    }

    #[test]
    fn image_file_name_embeds_the_symbol() {
        let image = chart_image_file("TSLA").unwrap();
        let name = image
            .path()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .into_owned();
        assert!(name.starts_with("chart-TSLA-"));
    }

    #[test]
    fn two_image_files_never_collide() {
        let a = chart_image_file("AAPL").unwrap();
        let b = chart_image_file("AAPL").unwrap();
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn refuses_an_empty_series() {
        let empty = CandleResponse {
            status: "ok".to_string(),
            open: vec![],
            high: vec![],
            low: vec![],
            close: vec![],
            volume: vec![],
            timestamps: vec![],
        };
        assert!(render_candle_chart(&empty, "AAPL", "15m").is_err());
    }

    #[test]
    fn refuses_misaligned_arrays() {
        let mut candles = sample_candles(10);
        candles.volume.pop();
        assert!(render_candle_chart(&candles, "AAPL", "15m").is_err());
    }

    #[test]
    fn series_points_skip_warm_up_gaps() {
        let points = series_points(&[None, None, Some(1.5), Some(2.0)]);
        assert_eq!(points, vec![(2.0, 1.5), (3.0, 2.0)]);
    }

    #[test]
    fn price_bounds_pad_beyond_extremes() {
        let candles = sample_candles(20);
        let (floor, ceil) = price_bounds(&candles);
        let low = candles.low.iter().cloned().fold(f64::INFINITY, f64::min);
        let high = candles.high.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert!(floor < low);
        assert!(ceil > high);
    }
}
