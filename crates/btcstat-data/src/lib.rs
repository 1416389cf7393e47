//! # BTC Stats Data
//!
//! 외부 제공자에서 가격 데이터를 조회하는 클라이언트를 제공합니다:
//! - **CoinGecko**: 현재 시세, 코인 프로필, 기간별 가격 차트
//! - **Yahoo Finance**: 전체 일봉 히스토리 (종가 기준)
//!
//! 모든 조회는 1회 시도이며 캐싱이나 재시도 정책은 없습니다.
//! 실패는 `StatError::Provider`(요청/전송 실패) 또는
//! `StatError::DataUnavailable`(빈 응답)로 분류됩니다.

pub mod coingecko;
pub mod yahoo;

pub use coingecko::{ChartRange, CoinGeckoClient};
pub use yahoo::YahooProvider;
