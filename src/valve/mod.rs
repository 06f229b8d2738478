//! 밸브 설정값 추천 모듈 모음.

pub mod advisor;
pub mod band;
pub mod capacity;
pub mod setting;
pub mod table;

pub use advisor::*;
pub use band::*;
pub use capacity::*;
pub use setting::*;
pub use table::*;
