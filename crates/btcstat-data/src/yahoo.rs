//! Yahoo Finance 과거 데이터 제공자.
//!
//! Yahoo Finance API를 사용하여 심볼의 전체 일봉 히스토리를 조회하고
//! 종가(close) 컬럼만 가격 시계열로 변환합니다.
//!
//! # 심볼 형식
//!
//! 모든 심볼은 Yahoo Finance 형식으로 전달되어야 합니다:
//! - 암호화폐 페어: "BTC-EUR", "BTC-USD"
//! - 미국 주식: "AAPL", "SPY"
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use btcstat_data::YahooProvider;
//!
//! let provider = YahooProvider::new()?;
//! let series = provider.daily_closes("BTC-EUR").await?;
//! ```

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use yahoo_finance_api as yahoo;

use btcstat_core::{PricePoint, PriceSeries, StatError, StatResult};

/// Yahoo Finance 과거 데이터 제공자.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
}

impl YahooProvider {
    /// 새로운 Yahoo Finance 제공자를 생성합니다.
    pub fn new() -> StatResult<Self> {
        let connector = yahoo::YahooConnector::new()
            .map_err(|e| StatError::Provider(format!("Yahoo Finance connector: {}", e)))?;

        Ok(Self { connector })
    }

    /// 전체 기간의 일별 종가 시계열을 조회합니다.
    ///
    /// 유효하지 않은 행(0 이하 또는 비정상 종가, 변환 불가 시각)은
    /// 건너뛰고, 남은 샘플을 시각 오름차순으로 정렬해 반환합니다.
    pub async fn daily_closes(&self, symbol: &str) -> StatResult<PriceSeries> {
        info!("Yahoo Finance: full daily history for {}", symbol);

        let response = self
            .connector
            .get_quote_range(symbol, "1d", "max")
            .await
            .map_err(|e| {
                StatError::Provider(format!("Yahoo Finance request ({}): {}", symbol, e))
            })?;

        let quotes = response
            .quotes()
            .map_err(|e| StatError::Provider(format!("Yahoo Finance quote parse: {}", e)))?;

        if quotes.is_empty() {
            warn!("Yahoo Finance: no data for {}", symbol);
            return Err(StatError::DataUnavailable(format!(
                "no quotes for '{}'",
                symbol
            )));
        }

        let points: Vec<PricePoint> = quotes
            .iter()
            .filter_map(|quote| {
                if !quote.close.is_finite() || quote.close <= 0.0 {
                    return None;
                }
                let timestamp = Utc.timestamp_opt(quote.timestamp, 0).single()?;
                let price = Decimal::from_f64_retain(quote.close)?;
                Some(PricePoint::new(timestamp, price))
            })
            .collect();

        let series = PriceSeries::from_unordered(points);
        if series.is_empty() {
            return Err(StatError::DataUnavailable(format!(
                "no usable close prices for '{}'",
                symbol
            )));
        }

        debug!(
            "Yahoo Finance: {} daily closes for {}",
            series.len(),
            symbol
        );

        Ok(series)
    }
}
