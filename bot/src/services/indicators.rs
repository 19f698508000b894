//! Indicator series used by chart rendering, wrapping the `ta` crate.

use ta::indicators::{RelativeStrengthIndex, SimpleMovingAverage};
use ta::Next;

/// 14 is the conventional RSI lookback.
pub const RSI_PERIOD: usize = 14;

/// RSI with warm-up tracking: `ta` emits values from the first sample, but
/// the oscillator is only meaningful after `period` deltas.
#[derive(Debug)]
pub struct Rsi {
    inner: RelativeStrengthIndex,
    period: usize,
    update_count: usize,
    last_value: Option<f64>,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self {
            inner: RelativeStrengthIndex::new(period).unwrap(),
            period,
            update_count: 0,
            last_value: None,
        }
    }

    pub fn update(&mut self, value: f64) {
        let rsi_value = self.inner.next(value);
        self.update_count += 1;
        if self.update_count > self.period {
            self.last_value = Some(rsi_value);
        }
    }

    pub fn value(&self) -> Option<f64> {
        self.last_value
    }
}

#[derive(Debug)]
pub struct Sma {
    inner: SimpleMovingAverage,
    period: usize,
    update_count: usize,
    last_value: Option<f64>,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self {
            inner: SimpleMovingAverage::new(period).unwrap(),
            period,
            update_count: 0,
            last_value: None,
        }
    }

    pub fn update(&mut self, value: f64) {
        let sma_value = self.inner.next(value);
        self.update_count += 1;
        if self.update_count >= self.period {
            self.last_value = Some(sma_value);
        }
    }

    pub fn value(&self) -> Option<f64> {
        self.last_value
    }
}

/// RSI over a closing-price series; `None` until the warm-up completes.
pub fn calculate_rsi(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut rsi = Rsi::new(period);
    values
        .iter()
        .map(|&value| {
            rsi.update(value);
            rsi.value()
        })
        .collect()
}

/// Simple moving average over a series; `None` until `period` samples.
pub fn calculate_sma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut sma = Sma::new(period);
    values
        .iter()
        .map(|&value| {
            sma.update(value);
            sma.value()
        })
        .collect()
}
