//! # BTC Stats Analytics
//!
//! 가격 시계열에서 파생 통계를 계산하는 순수 함수 모음입니다:
//! - 로그 수익률 기반 수익/위험 지표 (CAGR, 연율화 변동성, 샤프 비율)
//! - 수익률 분포 모멘트 (평균, 표준편차, 왜도, 첨도)
//! - 월말 리샘플링과 DCA(적립식 투자) 시뮬레이션
//! - 몬테카를로 DCA 전망
//!
//! 모든 계산은 `&PriceSeries`를 받아 입력을 수정하지 않습니다.

pub mod dca;
pub mod distribution;
pub mod montecarlo;
pub mod returns;

pub use dca::{resample_monthly, DcaResult};
pub use distribution::ReturnMoments;
pub use montecarlo::{DcaProjection, DcaProjectionConfig};
pub use returns::{ReturnStats, TRADING_PERIODS_PER_YEAR};
