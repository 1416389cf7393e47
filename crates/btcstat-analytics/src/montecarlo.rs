//! 몬테카를로 DCA 전망 모듈.
//!
//! 과거 월간 수익률 분포(평균/표준편차)로 파라미터화한 로그정규
//! 가격 경로를 다수 생성하고, 각 경로에 대해 적립식 투자를
//! 시뮬레이션하여 최종 평가액의 분포를 요약합니다.

use rand::Rng;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use btcstat_core::{StatError, StatResult};

use crate::distribution::ReturnMoments;

/// 몬테카를로 전망 입력 파라미터.
#[derive(Debug, Clone)]
pub struct DcaProjectionConfig {
    /// 투자 기간 (개월)
    pub months: u32,
    /// 월 적립 금액
    pub contribution: Decimal,
    /// 시뮬레이션 반복 횟수
    pub iterations: u32,
    /// 월간 로그 수익률 평균
    pub monthly_mean: f64,
    /// 월간 로그 수익률 표준편차
    pub monthly_std_dev: f64,
    /// 시작 가격
    pub start_price: f64,
}

impl DcaProjectionConfig {
    /// 과거 월간 시계열의 분포 모멘트에서 파라미터를 구성합니다.
    pub fn from_moments(
        moments: &ReturnMoments,
        start_price: f64,
        months: u32,
        contribution: Decimal,
        iterations: u32,
    ) -> Self {
        Self {
            months,
            contribution,
            iterations,
            monthly_mean: moments.mean,
            monthly_std_dev: moments.std_dev,
            start_price,
        }
    }
}

/// 몬테카를로 DCA 전망 결과.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DcaProjection {
    /// 투자 기간 (개월)
    pub months: u32,
    /// 반복 횟수
    pub iterations: u32,
    /// 총 투자 금액
    pub total_invested: f64,
    /// 최종 평가액 평균
    pub mean_final_value: f64,
    /// 최종 평가액 백분위 (5/25/50/75/95)
    pub percentiles: [f64; 5],
    /// 원금 이상으로 끝나는 경로의 비율 (0.0~1.0)
    pub break_even_probability: f64,
}

impl DcaProjection {
    /// 몬테카를로 시뮬레이션을 실행합니다.
    ///
    /// 월별 가격 전이는 `price *= exp(mean + std * z)` (z ~ N(0,1))이며,
    /// 표준정규 표본은 Box-Muller 변환으로 생성합니다.
    /// 재현성이 필요하면 시드 고정 RNG를 전달하면 됩니다.
    ///
    /// # 에러
    ///
    /// 기간/반복 횟수가 0이거나, 적립 금액 또는 시작 가격이 0 이하이거나,
    /// 표준편차가 음수이면 `InvalidInput`을 반환합니다.
    pub fn run<R: Rng>(config: &DcaProjectionConfig, rng: &mut R) -> StatResult<Self> {
        if config.months == 0 || config.iterations == 0 {
            return Err(StatError::InvalidInput(
                "projection months and iterations must be positive".to_string(),
            ));
        }
        if config.contribution <= Decimal::ZERO {
            return Err(StatError::InvalidInput(format!(
                "contribution must be positive, got {}",
                config.contribution
            )));
        }
        if config.start_price <= 0.0 || !config.start_price.is_finite() {
            return Err(StatError::InvalidInput(format!(
                "start price must be positive, got {}",
                config.start_price
            )));
        }
        if config.monthly_std_dev < 0.0 {
            return Err(StatError::InvalidInput(
                "standard deviation must not be negative".to_string(),
            ));
        }

        let contribution = config
            .contribution
            .to_f64()
            .ok_or_else(|| StatError::InvalidInput("contribution out of range".to_string()))?;
        let total_invested = contribution * config.months as f64;

        let mut final_values = Vec::with_capacity(config.iterations as usize);
        let mut break_even_count = 0usize;

        for _ in 0..config.iterations {
            let mut price = config.start_price;
            let mut units = 0.0;

            for _ in 0..config.months {
                units += contribution / price;
                let z = standard_normal(rng);
                price *= (config.monthly_mean + config.monthly_std_dev * z).exp();
            }

            let final_value = units * price;
            if final_value > total_invested {
                break_even_count += 1;
            }
            final_values.push(final_value);
        }

        final_values.sort_by(|a, b| a.total_cmp(b));

        let mean_final_value = final_values.iter().sum::<f64>() / final_values.len() as f64;
        let percentiles = [
            percentile(&final_values, 0.05),
            percentile(&final_values, 0.25),
            percentile(&final_values, 0.50),
            percentile(&final_values, 0.75),
            percentile(&final_values, 0.95),
        ];

        debug!(
            "Monte Carlo: {} paths over {} months, median {:.0}",
            config.iterations, config.months, percentiles[2]
        );

        Ok(Self {
            months: config.months,
            iterations: config.iterations,
            total_invested,
            mean_final_value,
            percentiles,
            break_even_probability: break_even_count as f64 / final_values.len() as f64,
        })
    }
}

/// 정렬된 표본에서 백분위 값을 반환합니다.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let index = ((sorted.len() as f64 * p) as usize).min(sorted.len() - 1);
    sorted[index]
}

/// Box-Muller 변환으로 표준정규 표본을 생성합니다.
fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(f64::MIN_POSITIVE);
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rust_decimal_macros::dec;

    fn test_config() -> DcaProjectionConfig {
        DcaProjectionConfig {
            months: 24,
            contribution: dec!(350),
            iterations: 2000,
            monthly_mean: 0.02,
            monthly_std_dev: 0.15,
            start_price: 30000.0,
        }
    }

    #[test]
    fn seeded_projection_is_reproducible() {
        let config = test_config();

        let first = DcaProjection::run(&config, &mut StdRng::seed_from_u64(42)).unwrap();
        let second = DcaProjection::run(&config, &mut StdRng::seed_from_u64(42)).unwrap();

        assert_eq!(first.percentiles, second.percentiles);
        assert_eq!(first.mean_final_value, second.mean_final_value);
        assert_eq!(first.break_even_probability, second.break_even_probability);
    }

    #[test]
    fn percentiles_are_monotonic() {
        let config = test_config();
        let projection = DcaProjection::run(&config, &mut StdRng::seed_from_u64(7)).unwrap();

        for pair in projection.percentiles.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        assert!(projection.break_even_probability >= 0.0);
        assert!(projection.break_even_probability <= 1.0);
        assert_eq!(projection.total_invested, 350.0 * 24.0);
    }

    #[test]
    fn zero_volatility_path_is_deterministic() {
        let config = DcaProjectionConfig {
            monthly_std_dev: 0.0,
            monthly_mean: 0.0,
            iterations: 10,
            ..test_config()
        };
        let projection = DcaProjection::run(&config, &mut StdRng::seed_from_u64(1)).unwrap();

        // 가격이 변하지 않으면 최종 평가액은 정확히 투자 원금
        assert!((projection.mean_final_value - projection.total_invested).abs() < 1e-6);
        assert_eq!(projection.percentiles[0], projection.percentiles[4]);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let mut config = test_config();
        config.months = 0;
        assert!(DcaProjection::run(&config, &mut StdRng::seed_from_u64(0)).is_err());

        let mut config = test_config();
        config.contribution = Decimal::ZERO;
        assert!(DcaProjection::run(&config, &mut StdRng::seed_from_u64(0)).is_err());

        let mut config = test_config();
        config.start_price = -1.0;
        assert!(DcaProjection::run(&config, &mut StdRng::seed_from_u64(0)).is_err());

        let mut config = test_config();
        config.monthly_std_dev = -0.1;
        assert!(DcaProjection::run(&config, &mut StdRng::seed_from_u64(0)).is_err());
    }
}
