use serde::{Deserialize, Serialize};

/// Real-time quote. `change`/`percent_change` come back null for unknown
/// symbols, which also report a current price of 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    #[serde(rename = "c")]
    pub current: f64,
    #[serde(rename = "h")]
    pub high: f64,
    #[serde(rename = "l")]
    pub low: f64,
    #[serde(rename = "d")]
    pub change: Option<f64>,
    #[serde(rename = "dp")]
    pub percent_change: Option<f64>,
}

/// One fiscal quarter of EPS results. `period` is "YYYY-MM-DD" with the
/// month always landing on a quarter end (03/06/09/12).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarningsRecord {
    pub period: String,
    pub actual: Option<f64>,
    pub estimate: Option<f64>,
    pub surprise: Option<f64>,
    #[serde(rename = "surprisePercent")]
    pub surprise_percent: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub source: String,
    pub headline: String,
    pub url: String,
    /// Unix timestamp of publication.
    pub datetime: i64,
}

/// Monthly analyst recommendation counts. `period` is "YYYY-MM-DD".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationTrend {
    pub period: String,
    #[serde(rename = "strongBuy")]
    pub strong_buy: i64,
    pub buy: i64,
    pub hold: i64,
    pub sell: i64,
    #[serde(rename = "strongSell")]
    pub strong_sell: i64,
}

/// OHLCV candle series, arrays aligned to `timestamps`. `status` is "ok"
/// when data is present and "no_data" otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandleResponse {
    #[serde(rename = "s")]
    pub status: String,
    #[serde(rename = "o", default)]
    pub open: Vec<f64>,
    #[serde(rename = "h", default)]
    pub high: Vec<f64>,
    #[serde(rename = "l", default)]
    pub low: Vec<f64>,
    #[serde(rename = "c", default)]
    pub close: Vec<f64>,
    #[serde(rename = "v", default)]
    pub volume: Vec<f64>,
    #[serde(rename = "t", default)]
    pub timestamps: Vec<i64>,
}

impl CandleResponse {
    pub fn is_empty(&self) -> bool {
        self.status != "ok" || self.timestamps.is_empty()
    }
}
