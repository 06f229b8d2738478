//! 유량 계산에 쓰는 단위 정의 및 변환 모듈 모음.

pub mod flow;
pub mod length;
pub mod mass_flow;
pub mod power;

pub use flow::{convert_volume_flow, lph_to_m3h, m3h_to_lph, m3s_to_m3h, VolumeFlowUnit};
pub use length::{convert_length, LengthUnit};
pub use mass_flow::{convert_mass_flow, mass_flow_kg_per_h, MassFlowUnit};
pub use power::{convert_power, PowerUnit, KW_PER_BTU_H};
