//! DCA(적립식 투자) 시뮬레이션 모듈.
//!
//! 월말 가격으로 리샘플링한 시계열에 대해 매월 고정 금액을
//! 투자했을 때의 누적 결과를 계산합니다.
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! use btcstat_analytics::{resample_monthly, DcaResult};
//! use rust_decimal_macros::dec;
//!
//! let monthly = resample_monthly(&series);
//! let result = DcaResult::simulate(&monthly, dec!(350))?;
//! println!("ROI: {:.2}%", result.roi_pct);
//! ```

use chrono::Datelike;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use btcstat_core::{PriceSeries, StatError, StatResult};

/// 적립식 투자 시뮬레이션 결과.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DcaResult {
    /// 총 투자 금액 (적립 횟수 × 월 적립 금액)
    pub total_invested: Decimal,
    /// 누적 취득 수량
    pub total_units: Decimal,
    /// 현재 평가액 (누적 수량 × 마지막 월말 가격)
    pub current_value: Decimal,
    /// 평가 손익
    pub profit_loss: Decimal,
    /// 수익률 (%)
    pub roi_pct: f64,
    /// 연율화 수익률 (%). 월간 시계열의 경과 기간이 0이면 None
    pub annualized_roi_pct: Option<f64>,
    /// 적립 횟수 (개월)
    pub months: usize,
}

impl DcaResult {
    /// 월간 시계열에 대해 적립식 투자를 시뮬레이션합니다.
    ///
    /// 매월 `contribution / 월말 가격` 만큼 수량을 취득하고,
    /// 마지막 월말 가격으로 평가액을 계산합니다.
    ///
    /// # 에러
    ///
    /// - 빈 시계열 → `InsufficientData`
    /// - `contribution <= 0` 또는 0 이하의 가격 → `InvalidInput`
    pub fn simulate(monthly: &PriceSeries, contribution: Decimal) -> StatResult<Self> {
        if contribution <= Decimal::ZERO {
            return Err(StatError::InvalidInput(format!(
                "contribution must be positive, got {}",
                contribution
            )));
        }

        let Some(last) = monthly.last() else {
            return Err(StatError::InsufficientData(
                "DCA simulation requires at least one month".to_string(),
            ));
        };

        let mut total_invested = Decimal::ZERO;
        let mut total_units = Decimal::ZERO;

        for point in monthly {
            if point.price <= Decimal::ZERO {
                return Err(StatError::InvalidInput(format!(
                    "non-positive monthly price {} at {}",
                    point.price, point.timestamp
                )));
            }
            total_units += contribution / point.price;
            total_invested += contribution;
        }

        let current_value = total_units * last.price;
        let profit_loss = current_value - total_invested;

        let growth = (current_value / total_invested)
            .to_f64()
            .ok_or_else(|| StatError::InvalidInput("value ratio out of range".to_string()))?;
        let roi_pct = (growth - 1.0) * 100.0;

        let years = monthly.elapsed_years();
        let annualized_roi_pct = if years > 0.0 {
            Some((growth.powf(1.0 / years) - 1.0) * 100.0)
        } else {
            None
        };

        Ok(Self {
            total_invested,
            total_units,
            current_value,
            profit_loss,
            roi_pct,
            annualized_roi_pct,
            months: monthly.len(),
        })
    }
}

/// 일별 시계열을 월간 시계열로 리샘플링합니다.
///
/// 달력 월마다 마지막 관측 가격 하나만 남깁니다 (월말 종가 의미).
/// 입력이 시각 오름차순이므로 출력도 오름차순입니다.
pub fn resample_monthly(series: &PriceSeries) -> PriceSeries {
    let mut monthly = Vec::new();
    let mut current_month: Option<(i32, u32)> = None;

    for point in series {
        let key = (point.timestamp.year(), point.timestamp.month());
        match monthly.last_mut() {
            // 같은 달이면 마지막 관측으로 교체
            Some(last) if current_month == Some(key) => *last = *point,
            _ => {
                monthly.push(*point);
                current_month = Some(key);
            }
        }
    }

    PriceSeries::from_unordered(monthly)
}
