//! 코인 시장 정보 타입.
//!
//! CoinGecko 프로필/스냅샷 응답에서 추출한 필드를 담는 구조체입니다.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 특정 통화 기준의 현재 시세 스냅샷.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyQuote {
    /// 통화 코드 (예: "eur", "usd")
    pub currency: String,
    /// 현재 가격
    pub price: Decimal,
    /// 시가총액
    pub market_cap: Option<Decimal>,
    /// 24시간 변동률 (%)
    pub change_24h_pct: Option<f64>,
}

/// 여러 통화 기준의 현재 시세 모음.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// 코인 식별자 (예: "bitcoin")
    pub coin_id: String,
    /// 통화별 시세 (통화 코드 오름차순)
    pub quotes: Vec<CurrencyQuote>,
}

/// 통화별 시장 지표 (프로필 조회용).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketFigures {
    /// 통화 코드
    pub currency: String,
    /// 현재 가격
    pub current_price: Option<Decimal>,
    /// 시가총액
    pub market_cap: Option<Decimal>,
    /// 24시간 총 거래대금
    pub total_volume: Option<Decimal>,
    /// 역대 최고가
    pub ath: Option<Decimal>,
    /// 역대 최고가 기록 시각
    pub ath_date: Option<DateTime<Utc>>,
}

/// 코인 기본 프로필.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinProfile {
    /// 코인 이름 (예: "Bitcoin")
    pub name: String,
    /// 심볼 (예: "btc")
    pub symbol: String,
    /// 제네시스 블록 날짜
    pub genesis_date: Option<NaiveDate>,
    /// 시가총액 순위
    pub market_cap_rank: Option<u32>,
    /// 통화별 시장 지표
    pub figures: Vec<MarketFigures>,
}

impl CoinProfile {
    /// 특정 통화의 시장 지표를 찾습니다.
    pub fn figures_for(&self, currency: &str) -> Option<&MarketFigures> {
        self.figures.iter().find(|f| f.currency == currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn figures_lookup_by_currency() {
        let profile = CoinProfile {
            name: "Bitcoin".to_string(),
            symbol: "btc".to_string(),
            genesis_date: None,
            market_cap_rank: Some(1),
            figures: vec![MarketFigures {
                currency: "eur".to_string(),
                current_price: Some(dec!(60000)),
                market_cap: None,
                total_volume: None,
                ath: None,
                ath_date: None,
            }],
        };

        assert!(profile.figures_for("eur").is_some());
        assert!(profile.figures_for("usd").is_none());
    }
}
