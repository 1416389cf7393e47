//! CLI 도구 모음.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - CoinGecko 진단 리포트 (현재 시세, 프로필, 차트 통계)
//! - Yahoo Finance 진단 리포트 (히스토리 통계, DCA 시뮬레이션, 전망)

pub mod commands;

pub use commands::*;
