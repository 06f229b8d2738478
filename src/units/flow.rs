use serde::{Deserialize, Serialize};

/// 체적 유량 단위. 내부 기준은 m³/h 이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeFlowUnit {
    CubicMeterPerHour,
    LiterPerHour,
    CubicMeterPerSecond,
    LiterPerSecond,
}

const LITERS_PER_CUBIC_METER: f64 = 1000.0;
const SECONDS_PER_HOUR: f64 = 3600.0;

fn to_m3_per_h(value: f64, unit: VolumeFlowUnit) -> f64 {
    match unit {
        VolumeFlowUnit::CubicMeterPerHour => value,
        VolumeFlowUnit::LiterPerHour => value / LITERS_PER_CUBIC_METER,
        VolumeFlowUnit::CubicMeterPerSecond => value * SECONDS_PER_HOUR,
        VolumeFlowUnit::LiterPerSecond => value * SECONDS_PER_HOUR / LITERS_PER_CUBIC_METER,
    }
}

fn from_m3_per_h(value: f64, unit: VolumeFlowUnit) -> f64 {
    match unit {
        VolumeFlowUnit::CubicMeterPerHour => value,
        VolumeFlowUnit::LiterPerHour => value * LITERS_PER_CUBIC_METER,
        VolumeFlowUnit::CubicMeterPerSecond => value / SECONDS_PER_HOUR,
        VolumeFlowUnit::LiterPerSecond => value * LITERS_PER_CUBIC_METER / SECONDS_PER_HOUR,
    }
}

/// 체적 유량을 변환한다.
pub fn convert_volume_flow(value: f64, from: VolumeFlowUnit, to: VolumeFlowUnit) -> f64 {
    let base = to_m3_per_h(value, from);
    from_m3_per_h(base, to)
}

/// L/h → m³/h
pub fn lph_to_m3h(flow_l_per_h: f64) -> f64 {
    flow_l_per_h / LITERS_PER_CUBIC_METER
}

/// m³/h → L/h
pub fn m3h_to_lph(flow_m3_per_h: f64) -> f64 {
    flow_m3_per_h * LITERS_PER_CUBIC_METER
}

/// m³/s → m³/h
pub fn m3s_to_m3h(flow_m3_per_s: f64) -> f64 {
    flow_m3_per_s * SECONDS_PER_HOUR
}
