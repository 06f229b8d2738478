use crate::units::{convert_length, m3h_to_lph, mass_flow_kg_per_h, LengthUnit};

/// 배관 내경/유속 기반 유량 계산 입력.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeFlowInput {
    /// 배관 내경 [mm]
    pub inner_diameter_mm: f64,
    /// 평균 유속 [m/s]
    pub velocity_m_per_s: f64,
    /// 유체 밀도 [kg/m³]
    pub density_kg_per_m3: f64,
}

impl PipeFlowInput {
    /// 임의 길이 단위의 내경으로 입력을 만든다.
    pub fn new(
        inner_diameter: f64,
        diameter_unit: LengthUnit,
        velocity_m_per_s: f64,
        density_kg_per_m3: f64,
    ) -> Self {
        Self {
            inner_diameter_mm: convert_length(inner_diameter, diameter_unit, LengthUnit::Millimeter),
            velocity_m_per_s,
            density_kg_per_m3,
        }
    }

    /// 물(1000 kg/m³) 기준 입력을 만든다.
    pub fn water(inner_diameter_mm: f64, velocity_m_per_s: f64) -> Self {
        Self {
            inner_diameter_mm,
            velocity_m_per_s,
            density_kg_per_m3: 1000.0,
        }
    }
}

/// 배관 유량 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeFlowResult {
    /// 단면적 [m²]
    pub area_m2: f64,
    /// 체적 유량 [m³/h]
    pub flow_m3_per_h: f64,
    /// 체적 유량 [L/h]
    pub flow_l_per_h: f64,
    /// 질량 유량 [kg/h]
    pub mass_flow_kg_per_h: f64,
}

/// 내경 [mm] 으로 원형 단면적 [m²] 을 구한다.
pub fn cross_section_area_m2(inner_diameter_mm: f64) -> f64 {
    let radius_m = inner_diameter_mm / 1000.0 / 2.0;
    std::f64::consts::PI * radius_m * radius_m
}

/// 내경과 유속으로 체적/질량 유량을 계산한다.
///
/// 내경이나 유속이 0 이하(또는 숫자가 아님)이거나 밀도가 음수이면 계산하지 않고
/// `None` 을 돌려준다. 입력 대기 상태로 취급한다.
pub fn pipe_flow(input: PipeFlowInput) -> Option<PipeFlowResult> {
    let d = input.inner_diameter_mm;
    let v = input.velocity_m_per_s;
    let rho = input.density_kg_per_m3;
    if !(d > 0.0 && v > 0.0 && d.is_finite() && v.is_finite()) {
        return None;
    }
    if !(rho >= 0.0 && rho.is_finite()) {
        return None;
    }
    let area_m2 = cross_section_area_m2(d);
    let flow_m3_per_h = area_m2 * v * 3600.0;
    Some(PipeFlowResult {
        area_m2,
        flow_m3_per_h,
        flow_l_per_h: m3h_to_lph(flow_m3_per_h),
        mass_flow_kg_per_h: mass_flow_kg_per_h(flow_m3_per_h, rho),
    })
}

/// 목표 유속을 만족하는 배관 내경 [mm] 을 계산한다.
pub fn diameter_for_velocity_mm(
    flow_m3_per_h: f64,
    target_velocity_m_per_s: f64,
) -> Result<f64, super::HydraulicsError> {
    if !(flow_m3_per_h > 0.0 && target_velocity_m_per_s > 0.0) {
        return Err(super::HydraulicsError::InvalidInput(
            "유량과 유속은 0보다 커야 합니다.",
        ));
    }
    let flow_m3_s = flow_m3_per_h / 3600.0;
    let area = flow_m3_s / target_velocity_m_per_s;
    let diameter_m = (4.0 * area / std::f64::consts::PI).sqrt();
    Ok(diameter_m * 1000.0)
}
