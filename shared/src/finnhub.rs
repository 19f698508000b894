use anyhow::Result;
use chrono::NaiveDate;

use crate::models::{CandleResponse, EarningsRecord, NewsItem, Quote, RecommendationTrend};

/// Client for the Finnhub REST API. One instance is created at startup and
/// shared by every command handler.
#[derive(Debug, Clone)]
pub struct FinnhubClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl FinnhubClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Real-time quote for a stock symbol.
    pub async fn quote(&self, symbol: &str) -> Result<Quote> {
        tracing::debug!("GET /quote symbol={}", symbol);
        let response = self
            .client
            .get(format!("{}/quote", self.base_url))
            .query(&[("symbol", symbol), ("token", self.api_key.as_str())])
            .send()
            .await?;

        let quote: Quote = response.json().await?;
        Ok(quote)
    }

    /// Historical per-quarter actual/estimated EPS, most recent first.
    pub async fn company_earnings(&self, symbol: &str) -> Result<Vec<EarningsRecord>> {
        tracing::debug!("GET /stock/earnings symbol={}", symbol);
        let response = self
            .client
            .get(format!("{}/stock/earnings", self.base_url))
            .query(&[("symbol", symbol), ("token", self.api_key.as_str())])
            .send()
            .await?;

        let earnings: Vec<EarningsRecord> = response.json().await?;
        Ok(earnings)
    }

    /// Company news between two dates (inclusive), upstream ordering kept.
    pub async fn company_news(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<NewsItem>> {
        tracing::debug!("GET /company-news symbol={} from={} to={}", symbol, from, to);
        let from = from.format("%Y-%m-%d").to_string();
        let to = to.format("%Y-%m-%d").to_string();
        let response = self
            .client
            .get(format!("{}/company-news", self.base_url))
            .query(&[
                ("symbol", symbol),
                ("from", from.as_str()),
                ("to", to.as_str()),
                ("token", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let news: Vec<NewsItem> = response.json().await?;
        Ok(news)
    }

    /// Monthly analyst recommendation counts, most recent first.
    pub async fn recommendation_trends(&self, symbol: &str) -> Result<Vec<RecommendationTrend>> {
        tracing::debug!("GET /stock/recommendation symbol={}", symbol);
        let response = self
            .client
            .get(format!("{}/stock/recommendation", self.base_url))
            .query(&[("symbol", symbol), ("token", self.api_key.as_str())])
            .send()
            .await?;

        let trends: Vec<RecommendationTrend> = response.json().await?;
        Ok(trends)
    }

    /// OHLCV candles for a symbol over a Unix time range. `resolution` is
    /// the upstream code ("1", "5", "15", "30", "60", "D", "W", "M").
    pub async fn stock_candles(
        &self,
        symbol: &str,
        resolution: &str,
        from: i64,
        to: i64,
    ) -> Result<CandleResponse> {
        tracing::debug!(
            "GET /stock/candle symbol={} resolution={} from={} to={}",
            symbol,
            resolution,
            from,
            to
        );
        let from = from.to_string();
        let to = to.to_string();
        let response = self
            .client
            .get(format!("{}/stock/candle", self.base_url))
            .query(&[
                ("symbol", symbol),
                ("resolution", resolution),
                ("from", from.as_str()),
                ("to", to.as_str()),
                ("token", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let candles: CandleResponse = response.json().await?;
        Ok(candles)
    }
}
