//! 설정 관리.
//!
//! 이 모듈은 애플리케이션 설정을 정의하고 관리합니다.
//!
//! 원본 진단 스크립트의 하드코딩 값(코인 id, 통화, 조회 일수,
//! 월 적립 금액)은 모두 이름 있는 설정 필드로 노출되며,
//! 파일과 `BTCSTAT` 접두사 환경 변수로 오버라이드할 수 있습니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{StatError, StatResult};

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 데이터 제공자 설정
    #[serde(default)]
    pub provider: ProviderConfig,
    /// 분석 대상/파라미터 설정
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 데이터 제공자 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// CoinGecko API 기본 URL
    pub base_url: String,
    /// CoinGecko 데모 API 키 (x-cg-demo-api-key 헤더, 비어 있으면 미전송)
    #[serde(default)]
    pub api_key: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.coingecko.com/api/v3".to_string(),
            api_key: String::new(),
            timeout_secs: 30,
        }
    }
}

/// 분석 대상/파라미터 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// CoinGecko 코인 식별자
    pub coin_id: String,
    /// Yahoo Finance 심볼
    pub yahoo_symbol: String,
    /// 시세 조회 대상 통화 목록
    pub vs_currencies: Vec<String>,
    /// 차트 통계에 사용할 통화
    pub chart_currency: String,
    /// 단기 차트 조회 일수
    pub chart_days: u32,
    /// DCA 월 적립 금액
    pub dca_contribution: Decimal,
    /// 몬테카를로 투자 기간 (개월)
    pub projection_months: u32,
    /// 몬테카를로 반복 횟수
    pub projection_iterations: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            coin_id: "bitcoin".to_string(),
            yahoo_symbol: "BTC-EUR".to_string(),
            vs_currencies: vec!["eur".to_string(), "usd".to_string()],
            chart_currency: "eur".to_string(),
            chart_days: 30,
            dca_contribution: Decimal::from(350),
            projection_months: 120,
            projection_iterations: 10_000,
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 기본값 → 파일 → 환경 변수 순으로 레이어링되므로
    /// 파일과 환경 변수는 바꿀 필드만 지정하면 됩니다.
    pub fn load<P: AsRef<Path>>(path: P) -> StatResult<Self> {
        let defaults = config::Config::try_from(&Self::default())?;
        let builder = config::Config::builder()
            // 기본값으로 시작
            .add_source(defaults)
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()))
            // 환경 변수로 오버라이드 (예: BTCSTAT__PROVIDER__API_KEY)
            .add_source(
                config::Environment::with_prefix("BTCSTAT")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 기본 경로에서 설정을 로드합니다.
    ///
    /// `config/default.toml`이 없으면 기본값에 환경 변수만 적용합니다.
    pub fn load_default() -> StatResult<Self> {
        let default_path = Path::new("config/default.toml");
        if default_path.exists() {
            return Self::load(default_path);
        }

        let defaults = config::Config::try_from(&Self::default())?;
        let builder = config::Config::builder().add_source(defaults).add_source(
            config::Environment::with_prefix("BTCSTAT")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 설정 값의 유효성을 검증합니다.
    pub fn validate(&self) -> StatResult<()> {
        if self.provider.base_url.is_empty() {
            return Err(StatError::Config("provider.base_url is empty".to_string()));
        }
        if self.provider.timeout_secs == 0 {
            return Err(StatError::Config(
                "provider.timeout_secs must be positive".to_string(),
            ));
        }
        if self.analysis.vs_currencies.is_empty() {
            return Err(StatError::Config(
                "analysis.vs_currencies must not be empty".to_string(),
            ));
        }
        if self.analysis.dca_contribution <= Decimal::ZERO {
            return Err(StatError::Config(
                "analysis.dca_contribution must be positive".to_string(),
            ));
        }
        if self.analysis.projection_iterations == 0 {
            return Err(StatError::Config(
                "analysis.projection_iterations must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.analysis.coin_id, "bitcoin");
        assert_eq!(config.analysis.dca_contribution, dec!(350));
    }

    #[test]
    fn validate_rejects_non_positive_contribution() {
        let mut config = AppConfig::default();
        config.analysis.dca_contribution = Decimal::ZERO;

        assert!(matches!(config.validate(), Err(StatError::Config(_))));
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = AppConfig::default();
        config.provider.timeout_secs = 0;

        assert!(config.validate().is_err());
    }
}
