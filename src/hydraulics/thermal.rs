use serde::{Deserialize, Serialize};

use super::HydraulicsError;
use crate::units::{m3h_to_lph, m3s_to_m3h, KW_PER_BTU_H};

/// 열량 → 유량 환산에 쓰는 고정 상수.
///
/// 정온도차(ΔT) 순환 루프의 에너지 보존 `Q = ṁ·cp·ΔT` 를 가정한다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThermalConstants {
    /// Btu/h → kW 환산 계수
    pub btu_h_to_kw: f64,
    /// 물 비열 [J/(kg·K)]
    pub specific_heat_j_per_kg_k: f64,
    /// 설계 온도차 [K]
    pub delta_t_k: f64,
    /// 물 밀도 [kg/m³]
    pub water_density_kg_per_m3: f64,
}

impl Default for ThermalConstants {
    fn default() -> Self {
        Self {
            btu_h_to_kw: KW_PER_BTU_H,
            specific_heat_j_per_kg_k: 4186.0,
            delta_t_k: 5.5,
            water_density_kg_per_m3: 1000.0,
        }
    }
}

/// 정격 용량에서 유도한 장비측 유량.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalFlow {
    /// 정격 용량 [Btu/h]
    pub capacity_btu_h: f64,
    /// 열출력 [kW]
    pub power_kw: f64,
    /// 질량 유량 [kg/s]
    pub mass_flow_kg_per_s: f64,
    /// 체적 유량 [m³/s]
    pub flow_m3_per_s: f64,
    /// 체적 유량 [m³/h]
    pub flow_m3_per_h: f64,
    /// 체적 유량 [L/h]
    pub flow_l_per_h: f64,
}

/// 정격 용량 [Btu/h] 을 순환수 유량으로 환산한다.
pub fn thermal_to_hydraulic(
    capacity_btu_h: f64,
    constants: &ThermalConstants,
) -> Result<ThermalFlow, HydraulicsError> {
    if !(capacity_btu_h > 0.0 && capacity_btu_h.is_finite()) {
        return Err(HydraulicsError::InvalidInput("용량은 0보다 커야 합니다."));
    }
    let heat_capacity_rate = constants.specific_heat_j_per_kg_k * constants.delta_t_k;
    if !(heat_capacity_rate > 0.0) || !(constants.water_density_kg_per_m3 > 0.0) {
        return Err(HydraulicsError::InvalidInput(
            "비열, 온도차, 밀도는 0보다 커야 합니다.",
        ));
    }

    let power_kw = capacity_btu_h * constants.btu_h_to_kw;
    let mass_flow_kg_per_s = power_kw * 1000.0 / heat_capacity_rate;
    let flow_m3_per_s = mass_flow_kg_per_s / constants.water_density_kg_per_m3;
    let flow_m3_per_h = m3s_to_m3h(flow_m3_per_s);

    Ok(ThermalFlow {
        capacity_btu_h,
        power_kw,
        mass_flow_kg_per_s,
        flow_m3_per_s,
        flow_m3_per_h,
        flow_l_per_h: m3h_to_lph(flow_m3_per_h),
    })
}
