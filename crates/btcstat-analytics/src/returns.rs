//! 수익/위험 지표 계산 모듈.
//!
//! 가격 시계열의 로그 수익률을 기반으로 다음 지표를 계산합니다:
//! - CAGR (연평균 복리 수익률)
//! - 연율화 변동성
//! - 샤프 비율 (무위험 이자율 0% 가정)
//! - 총 수익률
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! use btcstat_analytics::ReturnStats;
//!
//! let stats = ReturnStats::from_series(&series)?;
//! println!("CAGR: {:.2}%", stats.cagr_pct);
//! ```

use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use btcstat_core::{PriceSeries, StatError, StatResult};

/// 연간 거래 기간 수 (연율화 계산에 사용).
///
/// 주식 시장 관행인 252 거래일을 그대로 사용합니다.
/// 원본 계산과 동일하게 샘플링 주기(일봉/월봉)와 무관하게
/// 이 계수를 적용하는 단순화 가정입니다.
pub const TRADING_PERIODS_PER_YEAR: f64 = 252.0;

/// 가격 시계열에서 파생된 수익/위험 지표.
///
/// 샤프 비율은 무위험 이자율 0%를 가정하며, 연율화에는
/// [`TRADING_PERIODS_PER_YEAR`]의 제곱근을 곱합니다.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReturnStats {
    /// 연평균 복리 수익률 (%)
    pub cagr_pct: f64,
    /// 연율화 변동성 (%)
    pub annualized_volatility_pct: f64,
    /// 샤프 비율 (표준편차가 0이면 정확히 0)
    pub sharpe_ratio: f64,
    /// 총 수익률 (%)
    pub total_return_pct: f64,
    /// 경과 연수
    pub elapsed_years: f64,
    /// 샘플 개수
    pub samples: usize,
}

impl ReturnStats {
    /// 가격 시계열에서 수익/위험 지표를 계산합니다.
    ///
    /// # 계산 방법
    ///
    /// 1. 연속 샘플 쌍마다 로그 수익률 `r_i = ln(p_i / p_{i-1})` 계산
    /// 2. 경과 연수 = `(마지막 시각 - 첫 시각) / 365.25일`
    /// 3. CAGR = `(마지막 가격 / 첫 가격)^(1/연수) - 1`
    /// 4. 변동성 = 수익률 모표준편차 × √252
    /// 5. 샤프 = `평균(r) / 표준편차(r) × √252` (표준편차 0이면 0)
    ///
    /// # 에러
    ///
    /// 샘플이 2개 미만이거나 경과 기간이 0이면 `InsufficientData`,
    /// 0 이하의 가격이 포함되어 있으면 `InvalidInput`을 반환합니다.
    pub fn from_series(series: &PriceSeries) -> StatResult<Self> {
        if series.len() < 2 {
            return Err(StatError::InsufficientData(format!(
                "return stats require at least 2 price points, got {}",
                series.len()
            )));
        }

        let years = series.elapsed_years();
        if years <= 0.0 {
            return Err(StatError::InsufficientData(
                "price series spans zero elapsed time".to_string(),
            ));
        }

        let prices = collect_positive_prices(series)?;
        let returns = log_returns(&prices);

        let mean = returns.iter().sum::<f64>() / returns.len() as f64;
        let std_dev = population_std_dev(&returns, mean);

        let first = prices[0];
        let last = prices[prices.len() - 1];
        let total_return = last / first;

        let sharpe_ratio = if std_dev > 0.0 {
            (mean / std_dev) * TRADING_PERIODS_PER_YEAR.sqrt()
        } else {
            0.0
        };

        Ok(Self {
            cagr_pct: (total_return.powf(1.0 / years) - 1.0) * 100.0,
            annualized_volatility_pct: std_dev * TRADING_PERIODS_PER_YEAR.sqrt() * 100.0,
            sharpe_ratio,
            total_return_pct: (total_return - 1.0) * 100.0,
            elapsed_years: years,
            samples: series.len(),
        })
    }
}

/// 시계열의 가격을 f64로 변환합니다. 0 이하의 가격은 거부합니다.
pub(crate) fn collect_positive_prices(series: &PriceSeries) -> StatResult<Vec<f64>> {
    series
        .iter()
        .map(|point| {
            point
                .price
                .to_f64()
                .filter(|p| *p > 0.0)
                .ok_or_else(|| {
                    StatError::InvalidInput(format!(
                        "non-positive price {} at {}",
                        point.price, point.timestamp
                    ))
                })
        })
        .collect()
}

/// 연속 쌍별 로그 수익률을 계산합니다.
pub(crate) fn log_returns(prices: &[f64]) -> Vec<f64> {
    prices
        .windows(2)
        .map(|pair| (pair[1] / pair[0]).ln())
        .collect()
}

/// 모표준편차를 계산합니다 (n으로 나누는 버전).
///
/// 원본 계산(numpy `std` 기본값)과 동일하게 표본이 아닌
/// 모집단 표준편차를 사용합니다.
pub(crate) fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use btcstat_core::PricePoint;
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn series_from_daily(prices: &[Decimal]) -> PriceSeries {
        let base = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let points = prices
            .iter()
            .enumerate()
            .map(|(i, price)| PricePoint::new(base + Duration::days(i as i64), *price))
            .collect();
        PriceSeries::new(points).unwrap()
    }

    #[test]
    fn cagr_matches_closed_form() {
        // 2년(730.5일) 동안 100 → 400
        let base = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let points = vec![
            PricePoint::new(base, dec!(100)),
            PricePoint::new(base + Duration::hours(730 * 24 + 12), dec!(400)),
        ];
        let series = PriceSeries::new(points).unwrap();

        let stats = ReturnStats::from_series(&series).unwrap();

        // (400/100)^(1/2) - 1 = 1.0 → 100%
        assert!((stats.cagr_pct - 100.0).abs() < 1e-6);
        assert!((stats.total_return_pct - 300.0).abs() < 1e-9);
        assert!((stats.elapsed_years - 2.0).abs() < 1e-9);
    }

    #[test]
    fn constant_prices_yield_zero_sharpe() {
        let series = series_from_daily(&[dec!(100), dec!(100), dec!(100), dec!(100)]);

        let stats = ReturnStats::from_series(&series).unwrap();

        assert_eq!(stats.sharpe_ratio, 0.0);
        assert_eq!(stats.annualized_volatility_pct, 0.0);
        assert!(stats.sharpe_ratio.is_finite());
        assert_eq!(stats.total_return_pct, 0.0);
    }

    #[test]
    fn single_point_is_insufficient() {
        let base = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let series = PriceSeries::new(vec![PricePoint::new(base, dec!(100))]).unwrap();

        let result = ReturnStats::from_series(&series);

        assert!(matches!(result, Err(StatError::InsufficientData(_))));
    }

    #[test]
    fn zero_elapsed_span_is_insufficient() {
        // 1ms 간격은 초 단위 경과 연수로는 0이다
        let base = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let points = vec![
            PricePoint::new(base, dec!(100)),
            PricePoint::new(base + Duration::milliseconds(1), dec!(200)),
        ];
        let series = PriceSeries::new(points).unwrap();

        let result = ReturnStats::from_series(&series);

        assert!(matches!(result, Err(StatError::InsufficientData(_))));
    }

    #[test]
    fn volatility_uses_population_std_dev() {
        let series = series_from_daily(&[dec!(100), dec!(110), dec!(100), dec!(110)]);
        let stats = ReturnStats::from_series(&series).unwrap();

        // 수동 계산: 수익률 [ln(1.1), ln(1/1.1), ln(1.1)]
        let r1 = (1.1f64).ln();
        let returns = [r1, -r1, r1];
        let mean = returns.iter().sum::<f64>() / 3.0;
        let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / 3.0;
        let expected = variance.sqrt() * TRADING_PERIODS_PER_YEAR.sqrt() * 100.0;

        assert!((stats.annualized_volatility_pct - expected).abs() < 1e-9);
        assert!(stats.sharpe_ratio > 0.0);
    }

    #[test]
    fn series_is_unchanged_by_calculation() {
        let series = series_from_daily(&[dec!(100), dec!(150), dec!(125)]);
        let before = series.clone();

        let _ = ReturnStats::from_series(&series).unwrap();

        assert_eq!(series, before);
    }

    #[test]
    fn non_positive_price_is_invalid_input() {
        let series = series_from_daily(&[dec!(100), dec!(0)]);

        let result = ReturnStats::from_series(&series);

        assert!(matches!(result, Err(StatError::InvalidInput(_))));
    }
}
