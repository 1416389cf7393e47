//! CoinGecko API 클라이언트.
//!
//! CoinGecko 공개 API를 통해 현재 시세와 과거 가격 데이터를 수집합니다.
//!
//! # 지원 조회
//!
//! - 현재 시세 스냅샷 (`/simple/price`)
//! - 코인 프로필 (`/coins/{id}`)
//! - 기간별 가격 차트 (`/coins/{id}/market_chart`, 일 단위 또는 전체)
//!
//! # API 키 관리
//!
//! 데모 API 키는 설정(`provider.api_key`) 또는
//! `BTCSTAT__PROVIDER__API_KEY` 환경 변수로 주입되며,
//! 비어 있지 않을 때만 `x-cg-demo-api-key` 헤더로 전송됩니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use btcstat_data::{ChartRange, CoinGeckoClient};
//!
//! let client = CoinGeckoClient::new(&config.provider)?;
//! let series = client.market_chart("bitcoin", "eur", ChartRange::Max).await?;
//! ```

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, warn};

use btcstat_core::{
    CoinProfile, CurrencyQuote, MarketFigures, MarketSnapshot, PricePoint, PriceSeries,
    ProviderConfig, StatError, StatResult,
};

/// 차트 조회 범위.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartRange {
    /// 최근 N일
    Days(u32),
    /// 제공자가 보유한 전체 기간
    Max,
}

impl ChartRange {
    /// `days` 쿼리 파라미터 값을 반환합니다.
    pub fn as_query_value(&self) -> String {
        match self {
            Self::Days(days) => days.to_string(),
            Self::Max => "max".to_string(),
        }
    }
}

impl fmt::Display for ChartRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Days(days) => write!(f, "{} days", days),
            Self::Max => write!(f, "max"),
        }
    }
}

/// CoinGecko API 클라이언트.
#[derive(Clone)]
pub struct CoinGeckoClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// `/simple/price` 응답 (통화별 값이 평탄화된 맵).
type SimplePriceResponse = HashMap<String, HashMap<String, f64>>;

/// `/coins/{id}` 응답에서 사용하는 필드.
#[derive(Debug, Deserialize)]
struct CoinResponse {
    name: String,
    symbol: String,
    genesis_date: Option<NaiveDate>,
    market_cap_rank: Option<u32>,
    market_data: CoinMarketData,
}

/// `/coins/{id}`의 `market_data` 중 사용하는 필드.
#[derive(Debug, Deserialize)]
struct CoinMarketData {
    #[serde(default)]
    current_price: HashMap<String, f64>,
    #[serde(default)]
    market_cap: HashMap<String, f64>,
    #[serde(default)]
    total_volume: HashMap<String, f64>,
    #[serde(default)]
    ath: HashMap<String, f64>,
    #[serde(default)]
    ath_date: HashMap<String, DateTime<Utc>>,
}

/// `/coins/{id}/market_chart` 응답.
#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    /// `[timestamp_ms, price]` 쌍의 목록
    prices: Vec<(i64, f64)>,
}

impl CoinGeckoClient {
    /// 새 클라이언트를 생성합니다.
    pub fn new(config: &ProviderConfig) -> StatResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// 여러 통화 기준의 현재 시세를 조회합니다.
    ///
    /// 시가총액과 24시간 변동률을 함께 요청합니다.
    pub async fn simple_price(
        &self,
        coin_id: &str,
        vs_currencies: &[String],
    ) -> StatResult<MarketSnapshot> {
        let currencies = vs_currencies.join(",");
        let query = [
            ("ids", coin_id),
            ("vs_currencies", currencies.as_str()),
            ("include_market_cap", "true"),
            ("include_24hr_change", "true"),
        ];

        let response: SimplePriceResponse = self.get_json("/simple/price", &query).await?;

        let values = response.get(coin_id).ok_or_else(|| {
            StatError::DataUnavailable(format!("no price data for '{}'", coin_id))
        })?;

        let mut quotes = Vec::with_capacity(vs_currencies.len());
        for currency in vs_currencies {
            let Some(price) = values.get(currency.as_str()) else {
                warn!("CoinGecko: no {} quote for {}", currency, coin_id);
                continue;
            };
            quotes.push(CurrencyQuote {
                currency: currency.clone(),
                price: decimal_from(*price)?,
                market_cap: values
                    .get(&format!("{}_market_cap", currency))
                    .and_then(|v| Decimal::from_f64_retain(*v)),
                change_24h_pct: values.get(&format!("{}_24h_change", currency)).copied(),
            });
        }

        if quotes.is_empty() {
            return Err(StatError::DataUnavailable(format!(
                "no quotes for '{}' in requested currencies",
                coin_id
            )));
        }

        Ok(MarketSnapshot {
            coin_id: coin_id.to_string(),
            quotes,
        })
    }

    /// 코인 기본 프로필과 통화별 시장 지표를 조회합니다.
    pub async fn coin_profile(
        &self,
        coin_id: &str,
        vs_currencies: &[String],
    ) -> StatResult<CoinProfile> {
        let response: CoinResponse = self
            .get_json(&format!("/coins/{}", coin_id), &[])
            .await?;

        let figures = vs_currencies
            .iter()
            .map(|currency| MarketFigures {
                currency: currency.clone(),
                current_price: response
                    .market_data
                    .current_price
                    .get(currency.as_str())
                    .and_then(|v| Decimal::from_f64_retain(*v)),
                market_cap: response
                    .market_data
                    .market_cap
                    .get(currency.as_str())
                    .and_then(|v| Decimal::from_f64_retain(*v)),
                total_volume: response
                    .market_data
                    .total_volume
                    .get(currency.as_str())
                    .and_then(|v| Decimal::from_f64_retain(*v)),
                ath: response
                    .market_data
                    .ath
                    .get(currency.as_str())
                    .and_then(|v| Decimal::from_f64_retain(*v)),
                ath_date: response.market_data.ath_date.get(currency.as_str()).copied(),
            })
            .collect();

        Ok(CoinProfile {
            name: response.name,
            symbol: response.symbol,
            genesis_date: response.genesis_date,
            market_cap_rank: response.market_cap_rank,
            figures,
        })
    }

    /// 기간별 일 단위 가격 시계열을 조회합니다.
    ///
    /// 응답의 `prices` 목록(`[timestamp_ms, price]`)을
    /// 시각 오름차순 `PriceSeries`로 변환합니다.
    pub async fn market_chart(
        &self,
        coin_id: &str,
        vs_currency: &str,
        range: ChartRange,
    ) -> StatResult<PriceSeries> {
        let days = range.as_query_value();
        let query = [
            ("vs_currency", vs_currency),
            ("days", days.as_str()),
            ("interval", "daily"),
        ];

        info!("CoinGecko: market chart for {} ({})", coin_id, range);

        let response: MarketChartResponse = self
            .get_json(&format!("/coins/{}/market_chart", coin_id), &query)
            .await?;

        if response.prices.is_empty() {
            return Err(StatError::DataUnavailable(format!(
                "empty market chart for '{}'",
                coin_id
            )));
        }

        let points: Vec<PricePoint> = response
            .prices
            .iter()
            .filter_map(|(timestamp_ms, price)| {
                let timestamp = Utc.timestamp_millis_opt(*timestamp_ms).single()?;
                let price = Decimal::from_f64_retain(*price)?;
                (price > Decimal::ZERO).then(|| PricePoint::new(timestamp, price))
            })
            .collect();

        let series = PriceSeries::from_unordered(points);
        if series.is_empty() {
            return Err(StatError::DataUnavailable(format!(
                "no usable price points for '{}'",
                coin_id
            )));
        }

        debug!(
            "CoinGecko: {} price points for {} ({})",
            series.len(),
            coin_id,
            range
        );

        Ok(series)
    }

    /// GET 요청을 보내고 JSON 본문을 역직렬화합니다.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> StatResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("CoinGecko: GET {}", path);

        let mut request = self.client.get(&url).query(query);
        if !self.api_key.is_empty() {
            request = request.header("x-cg-demo-api-key", &self.api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StatError::Provider(format!(
                "CoinGecko HTTP {} for {}",
                status, path
            )));
        }

        Ok(response.json::<T>().await?)
    }
}

/// f64 값을 Decimal로 변환하며, 표현 불가능한 값은 제공자 오류로 취급합니다.
fn decimal_from(value: f64) -> StatResult<Decimal> {
    Decimal::from_f64_retain(value)
        .ok_or_else(|| StatError::Provider(format!("unrepresentable price value: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_range_query_values() {
        assert_eq!(ChartRange::Days(30).as_query_value(), "30");
        assert_eq!(ChartRange::Max.as_query_value(), "max");
    }

    #[test]
    fn decimal_from_rejects_nan() {
        assert!(decimal_from(f64::NAN).is_err());
        assert!(decimal_from(30000.5).is_ok());
    }
}
