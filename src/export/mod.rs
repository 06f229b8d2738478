//! 결과 내보내기: 유량표 CSV, 텍스트 보고서.

pub mod report;
pub mod table_export;

use thiserror::Error;

pub use report::*;
pub use table_export::*;

/// 내보내기 오류.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV 쓰기 오류: {0}")]
    Csv(#[from] csv::Error),
    /// 보고서에 넣을 DN 이 없음
    #[error("보고서를 만들 DN이 없습니다.")]
    NoDnAvailable,
}
