//! 도메인 모델.
//!
//! 가격 시계열과 코인 시장 정보에 대한 공용 타입을 제공합니다.

pub mod market;
pub mod series;

pub use market::*;
pub use series::*;
