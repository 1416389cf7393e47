//! 수익률 분포 모멘트 계산 모듈.
//!
//! 로그 수익률 표본의 평균, 표준편차, 왜도, 첨도를 계산합니다.
//! 몬테카를로 전망의 입력 파라미터로 사용됩니다.

use serde::{Deserialize, Serialize};

use btcstat_core::{PriceSeries, StatError, StatResult};

use crate::returns::{collect_positive_prices, log_returns, population_std_dev};

/// 로그 수익률 표본의 분포 모멘트.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReturnMoments {
    /// 평균 수익률 (기간당, 비율)
    pub mean: f64,
    /// 모표준편차 (기간당, 비율)
    pub std_dev: f64,
    /// 왜도 (표준화 3차 모멘트)
    pub skewness: f64,
    /// 첨도 (표준화 4차 모멘트, 정규분포 = 3)
    pub kurtosis: f64,
    /// 수익률 표본 개수
    pub samples: usize,
}

impl ReturnMoments {
    /// 가격 시계열의 로그 수익률 분포 모멘트를 계산합니다.
    ///
    /// 표준편차가 0이면 왜도와 첨도는 0으로 보고합니다.
    ///
    /// # 에러
    ///
    /// 샘플이 2개 미만이면 `InsufficientData`를 반환합니다.
    pub fn from_series(series: &PriceSeries) -> StatResult<Self> {
        if series.len() < 2 {
            return Err(StatError::InsufficientData(format!(
                "return moments require at least 2 price points, got {}",
                series.len()
            )));
        }

        let prices = collect_positive_prices(series)?;
        let returns = log_returns(&prices);
        Ok(Self::from_returns(&returns))
    }

    /// 수익률 표본에서 직접 모멘트를 계산합니다.
    pub fn from_returns(returns: &[f64]) -> Self {
        let n = returns.len() as f64;
        let mean = returns.iter().sum::<f64>() / n;
        let std_dev = population_std_dev(returns, mean);

        let (skewness, kurtosis) = if std_dev > 0.0 {
            let skew = returns
                .iter()
                .map(|r| ((r - mean) / std_dev).powi(3))
                .sum::<f64>()
                / n;
            let kurt = returns
                .iter()
                .map(|r| ((r - mean) / std_dev).powi(4))
                .sum::<f64>()
                / n;
            (skew, kurt)
        } else {
            (0.0, 0.0)
        };

        Self {
            mean,
            std_dev,
            skewness,
            kurtosis,
            samples: returns.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use btcstat_core::PricePoint;
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal_macros::dec;

    #[test]
    fn symmetric_returns_have_near_zero_skew() {
        let returns = [0.1, -0.1, 0.1, -0.1];
        let moments = ReturnMoments::from_returns(&returns);

        assert!((moments.mean - 0.0).abs() < 1e-12);
        assert!((moments.skewness - 0.0).abs() < 1e-12);
        assert!(moments.std_dev > 0.0);
        // 두 값만 가지는 대칭 분포의 첨도는 1
        assert!((moments.kurtosis - 1.0).abs() < 1e-12);
    }

    #[test]
    fn constant_returns_report_zero_moments() {
        let returns = [0.05, 0.05, 0.05];
        let moments = ReturnMoments::from_returns(&returns);

        assert_eq!(moments.std_dev, 0.0);
        assert_eq!(moments.skewness, 0.0);
        assert_eq!(moments.kurtosis, 0.0);
        assert!(moments.mean > 0.0);
    }

    #[test]
    fn from_series_requires_two_points() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let series = PriceSeries::new(vec![PricePoint::new(base, dec!(100))]).unwrap();

        assert!(matches!(
            ReturnMoments::from_series(&series),
            Err(StatError::InsufficientData(_))
        ));

        let series = PriceSeries::new(vec![
            PricePoint::new(base, dec!(100)),
            PricePoint::new(base + Duration::days(1), dec!(110)),
        ])
        .unwrap();
        let moments = ReturnMoments::from_series(&series).unwrap();

        assert_eq!(moments.samples, 1);
        assert!((moments.mean - (1.1f64).ln()).abs() < 1e-12);
    }
}
