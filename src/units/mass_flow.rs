use serde::{Deserialize, Serialize};

/// 질량 유량 단위. 내부 기준은 kg/h 이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MassFlowUnit {
    KilogramPerHour,
    KilogramPerSecond,
    PoundPerHour,
}

fn to_kg_per_h(value: f64, unit: MassFlowUnit) -> f64 {
    match unit {
        MassFlowUnit::KilogramPerHour => value,
        MassFlowUnit::KilogramPerSecond => value * 3600.0,
        MassFlowUnit::PoundPerHour => value * 0.453_592_37,
    }
}

fn from_kg_per_h(value: f64, unit: MassFlowUnit) -> f64 {
    match unit {
        MassFlowUnit::KilogramPerHour => value,
        MassFlowUnit::KilogramPerSecond => value / 3600.0,
        MassFlowUnit::PoundPerHour => value / 0.453_592_37,
    }
}

/// 질량 유량을 변환한다.
pub fn convert_mass_flow(value: f64, from: MassFlowUnit, to: MassFlowUnit) -> f64 {
    let base = to_kg_per_h(value, from);
    from_kg_per_h(base, to)
}

/// 체적 유량(m³/h)과 밀도(kg/m³)로 질량 유량(kg/h)을 구한다.
pub fn mass_flow_kg_per_h(flow_m3_per_h: f64, density_kg_per_m3: f64) -> f64 {
    flow_m3_per_h * density_kg_per_m3
}
