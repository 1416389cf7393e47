//! 통계 도구의 에러 타입.
//!
//! 이 모듈은 데이터 조회와 통계 계산 전반에서 사용되는 에러 분류를 정의합니다.

use thiserror::Error;

/// 핵심 통계 에러.
#[derive(Debug, Error)]
pub enum StatError {
    /// 제공자 요청 실패 (네트워크 오류, 비정상 상태 코드, 파싱 불가 응답)
    #[error("Provider error: {0}")]
    Provider(String),

    /// 요청은 성공했으나 응답에 데이터가 없음
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    /// 계산에 필요한 최소 데이터 포인트 부족
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// 잘못된 입력 (예: 0 이하의 적립 금액)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// 설정 에러
    #[error("Configuration error: {0}")]
    Config(String),
}

/// 통계 작업을 위한 Result 타입.
pub type StatResult<T> = Result<T, StatError>;

impl StatError {
    /// 외부 제공자 쪽 문제인지 확인합니다.
    ///
    /// 제공자 장애는 입력을 고쳐도 해결되지 않으므로
    /// 호출자가 블록을 건너뛰고 계속 진행할 때 참고할 수 있습니다.
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            StatError::Provider(_) | StatError::DataUnavailable(_)
        )
    }

    /// 호출자의 입력/데이터 문제인지 확인합니다.
    pub fn is_input_failure(&self) -> bool {
        matches!(
            self,
            StatError::InsufficientData(_) | StatError::InvalidInput(_)
        )
    }
}

impl From<reqwest::Error> for StatError {
    fn from(err: reqwest::Error) -> Self {
        StatError::Provider(err.to_string())
    }
}

impl From<serde_json::Error> for StatError {
    fn from(err: serde_json::Error) -> Self {
        StatError::Provider(err.to_string())
    }
}

impl From<config::ConfigError> for StatError {
    fn from(err: config::ConfigError) -> Self {
        StatError::Config(err.to_string())
    }
}
