//! 배관 유량 및 열량 기반 유량 산정 모듈.
//! 장비 정격 용량에서 권장 유량을 구하고, 배관 내경/유속에서 실제 유량을 구한다.

pub mod pipe_flow;
pub mod thermal;

use thiserror::Error;

pub use pipe_flow::*;
pub use thermal::*;

/// 유량 계산 입력 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HydraulicsError {
    /// 입력값 오류
    #[error("입력 오류: {0}")]
    InvalidInput(&'static str),
}
