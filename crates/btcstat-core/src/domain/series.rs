//! 가격 시계열 타입.
//!
//! 제공자에서 수신한 (시각, 가격) 샘플의 순서 있는 시퀀스를 표현합니다.
//! 시리즈 내부의 타임스탬프는 항상 엄격하게 증가해야 하며,
//! 이 불변 조건은 생성 시점에 검증됩니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use btcstat_core::{PricePoint, PriceSeries};
//!
//! let series = PriceSeries::from_unordered(points)?;
//! let years = series.elapsed_years();
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{StatError, StatResult};

/// 연간 일수 (윤년 포함 평균).
///
/// 경과 연수 계산에 사용됩니다. CAGR과 연율화 수익률 값에
/// 직접적인 영향을 주는 가정이므로 상수로 노출합니다.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// 단일 가격 샘플.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// 관측 시각 (UTC 기준)
    pub timestamp: DateTime<Utc>,
    /// 관측 가격
    pub price: Decimal,
}

impl PricePoint {
    /// 새 가격 샘플을 생성합니다.
    pub fn new(timestamp: DateTime<Utc>, price: Decimal) -> Self {
        Self { timestamp, price }
    }
}

/// 시각 오름차순으로 정렬된 가격 시계열.
///
/// 생성된 이후에는 불변입니다. 모든 소비자는 `&PriceSeries`를 받아
/// 원본을 수정하지 않고 파생 통계만 계산합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries(Vec<PricePoint>);

impl PriceSeries {
    /// 이미 정렬된 샘플 목록에서 시계열을 생성합니다.
    ///
    /// # 에러
    ///
    /// 타임스탬프가 엄격하게 증가하지 않으면 `InvalidInput`을 반환합니다.
    pub fn new(points: Vec<PricePoint>) -> StatResult<Self> {
        for pair in points.windows(2) {
            if pair[1].timestamp <= pair[0].timestamp {
                return Err(StatError::InvalidInput(format!(
                    "price series timestamps must be strictly increasing ({} then {})",
                    pair[0].timestamp, pair[1].timestamp
                )));
            }
        }
        Ok(Self(points))
    }

    /// 순서가 보장되지 않은 샘플 목록에서 시계열을 생성합니다.
    ///
    /// 시각 오름차순으로 정렬하고, 같은 타임스탬프가 중복되면
    /// 나중에 온 샘플을 유지합니다. 제공자 응답이 정렬을 보장하지
    /// 않는 경우에 사용합니다.
    pub fn from_unordered(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.timestamp);

        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.timestamp == point.timestamp => *last = point,
                _ => deduped.push(point),
            }
        }

        Self(deduped)
    }

    /// 샘플 목록에 대한 참조를 반환합니다.
    pub fn points(&self) -> &[PricePoint] {
        &self.0
    }

    /// 샘플 개수를 반환합니다.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// 시계열이 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 첫 번째 샘플을 반환합니다.
    pub fn first(&self) -> Option<&PricePoint> {
        self.0.first()
    }

    /// 마지막 샘플을 반환합니다.
    pub fn last(&self) -> Option<&PricePoint> {
        self.0.last()
    }

    /// 샘플 반복자를 반환합니다.
    pub fn iter(&self) -> std::slice::Iter<'_, PricePoint> {
        self.0.iter()
    }

    /// 첫 샘플과 마지막 샘플 사이의 경과 연수를 반환합니다.
    ///
    /// `(마지막 시각 - 첫 시각) / 365.25일`로 계산합니다.
    /// 샘플이 2개 미만이면 0.0을 반환합니다.
    pub fn elapsed_years(&self) -> f64 {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => {
                let seconds = (last.timestamp - first.timestamp).num_seconds();
                seconds as f64 / (DAYS_PER_YEAR * 86_400.0)
            }
            _ => 0.0,
        }
    }
}

impl<'a> IntoIterator for &'a PriceSeries {
    type Item = &'a PricePoint;
    type IntoIter = std::slice::Iter<'a, PricePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn point(days: i64, price: Decimal) -> PricePoint {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        PricePoint::new(base + chrono::Duration::days(days), price)
    }

    #[test]
    fn new_rejects_out_of_order_timestamps() {
        let points = vec![point(1, dec!(100)), point(0, dec!(90))];
        let result = PriceSeries::new(points);

        assert!(matches!(result, Err(StatError::InvalidInput(_))));
    }

    #[test]
    fn new_rejects_duplicate_timestamps() {
        let points = vec![point(0, dec!(100)), point(0, dec!(101))];

        assert!(PriceSeries::new(points).is_err());
    }

    #[test]
    fn from_unordered_sorts_and_keeps_last_duplicate() {
        let points = vec![
            point(2, dec!(300)),
            point(0, dec!(100)),
            point(1, dec!(150)),
            point(1, dec!(200)),
        ];
        let series = PriceSeries::from_unordered(points);

        assert_eq!(series.len(), 3);
        assert_eq!(series.points()[1].price, dec!(200));
        assert_eq!(series.last().unwrap().price, dec!(300));
    }

    #[test]
    fn elapsed_years_spans_full_range() {
        // 365.25일 = 정확히 1년
        let base = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let points = vec![
            PricePoint::new(base, dec!(100)),
            PricePoint::new(base + chrono::Duration::hours(365 * 24 + 6), dec!(200)),
        ];
        let series = PriceSeries::new(points).unwrap();

        assert!((series.elapsed_years() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn elapsed_years_is_zero_for_single_point() {
        let series = PriceSeries::new(vec![point(0, dec!(100))]).unwrap();

        assert_eq!(series.elapsed_years(), 0.0);
    }
}
