//! # BTC Stats Core
//!
//! 비트코인 가격 통계 도구의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 시스템 전반에서 사용되는 기본 타입을 제공합니다:
//! - 가격 시계열 구조체 (`PricePoint`, `PriceSeries`)
//! - 코인 프로필 및 시장 스냅샷 타입
//! - 에러 분류 체계 (`StatError`)
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
