use thiserror::Error;

use crate::quantity::QuantityKind;
use crate::units::*;

/// 단위 변환 시 발생 가능한 오류.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// 알 수 없는 단위 문자열
    #[error("알 수 없는 단위: {0}")]
    UnknownUnit(String),
    /// 지원하지 않는 물리량
    #[error("지원하지 않는 물리량: {0}")]
    UnsupportedQuantity(String),
}

/// 문자열로 전달된 단위명을 enum으로 변환한 뒤 지정된 단위로 환산한다.
///
/// 단위 문자열 예시는 `m3/h`, `L/h`, `kg/s`, `Btu/h`, `kW`, `mm` 등을 사용할 수 있다.
pub fn convert(
    kind: QuantityKind,
    value: f64,
    from_unit_str: &str,
    to_unit_str: &str,
) -> Result<f64, ConversionError> {
    match kind {
        QuantityKind::VolumeFlow => {
            let from = parse_volume_flow_unit(from_unit_str)?;
            let to = parse_volume_flow_unit(to_unit_str)?;
            Ok(convert_volume_flow(value, from, to))
        }
        QuantityKind::MassFlow => {
            let from = parse_mass_flow_unit(from_unit_str)?;
            let to = parse_mass_flow_unit(to_unit_str)?;
            Ok(convert_mass_flow(value, from, to))
        }
        QuantityKind::Power => {
            let from = parse_power_unit(from_unit_str)?;
            let to = parse_power_unit(to_unit_str)?;
            Ok(convert_power(value, from, to))
        }
        QuantityKind::Length => {
            let from = parse_length_unit(from_unit_str)?;
            let to = parse_length_unit(to_unit_str)?;
            Ok(convert_length(value, from, to))
        }
    }
}

/// 물리량 이름과 단위 문자열을 모두 문자열로 받아 변환한다.
pub fn convert_named(
    kind_str: &str,
    value: f64,
    from_unit_str: &str,
    to_unit_str: &str,
) -> Result<f64, ConversionError> {
    let kind = QuantityKind::parse(kind_str)
        .ok_or_else(|| ConversionError::UnsupportedQuantity(kind_str.to_string()))?;
    convert(kind, value, from_unit_str, to_unit_str)
}

fn parse_volume_flow_unit(s: &str) -> Result<VolumeFlowUnit, ConversionError> {
    match s.to_lowercase().as_str() {
        "m3/h" | "m^3/h" | "m³/h" | "cmh" => Ok(VolumeFlowUnit::CubicMeterPerHour),
        "l/h" | "lph" => Ok(VolumeFlowUnit::LiterPerHour),
        "m3/s" | "m^3/s" | "m³/s" => Ok(VolumeFlowUnit::CubicMeterPerSecond),
        "l/s" | "lps" => Ok(VolumeFlowUnit::LiterPerSecond),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

fn parse_mass_flow_unit(s: &str) -> Result<MassFlowUnit, ConversionError> {
    match s.to_lowercase().as_str() {
        "kg/h" => Ok(MassFlowUnit::KilogramPerHour),
        "kg/s" => Ok(MassFlowUnit::KilogramPerSecond),
        "lb/h" | "lbm/h" => Ok(MassFlowUnit::PoundPerHour),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

fn parse_power_unit(s: &str) -> Result<PowerUnit, ConversionError> {
    match s.to_lowercase().as_str() {
        "w" | "watt" => Ok(PowerUnit::Watt),
        "kw" | "kilowatt" => Ok(PowerUnit::Kilowatt),
        "btu/h" | "btuh" | "btu/hr" => Ok(PowerUnit::BtuPerHour),
        "tr" | "rt" | "ton" => Ok(PowerUnit::RefrigerationTon),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

/// 길이 단위 이름("m", "mm", "in")을 해석한다. 배관 내경 입력에도 쓴다.
pub fn parse_length_unit(s: &str) -> Result<LengthUnit, ConversionError> {
    match s.to_lowercase().as_str() {
        "m" | "meter" | "metre" => Ok(LengthUnit::Meter),
        "mm" => Ok(LengthUnit::Millimeter),
        "in" | "inch" => Ok(LengthUnit::Inch),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}
