//! 진단 명령어 모듈.

pub mod coingecko;
pub mod yahoo;

use btcstat_core::StatResult;

/// 블록 결과를 출력에 반영합니다.
///
/// 실패한 블록은 `Error: <메시지>` 한 줄로 보고하고 실행을 계속합니다.
/// 개별 블록의 실패가 전체 리포트를 중단시키지 않습니다.
pub(crate) fn finish_block(result: StatResult<()>) {
    if let Err(error) = result {
        println!("Error: {}", error);
    }
}

/// 구분선을 출력합니다.
pub(crate) fn print_rule() {
    println!("{}", "=".repeat(60));
}
