//! 목표 유량에 가장 가까운 밸브 설정값을 찾는다.
//! 보간하지 않고 표의 한 행을 그대로 고른다.

use thiserror::Error;

use super::table::ValveCurve;
use crate::units::{lph_to_m3h, m3h_to_lph};

/// 설정값 계산 오류. 요청 단위 오류이므로 프로그램은 계속 동작한다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingError {
    /// 유량표에 없는 DN
    #[error("유량표에 '{0}' DN이 없습니다.")]
    UnknownDn(String),
    /// DN 열에 유효한 유량이 하나도 없음
    #[error("'{0}' DN에 유효한 유량 값이 없어 권장 설정값을 계산할 수 없습니다.")]
    NoData(String),
}

/// 0보다 큰 목표 유량 [L/h]. 0 이하나 NaN 은 만들 수 없다.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TargetFlow(f64);

impl TargetFlow {
    pub fn from_l_per_h(flow_l_per_h: f64) -> Option<Self> {
        (flow_l_per_h > 0.0 && flow_l_per_h.is_finite()).then_some(Self(flow_l_per_h))
    }

    pub fn from_m3_per_h(flow_m3_per_h: f64) -> Option<Self> {
        Self::from_l_per_h(m3h_to_lph(flow_m3_per_h))
    }

    pub fn l_per_h(self) -> f64 {
        self.0
    }

    pub fn m3_per_h(self) -> f64 {
        lph_to_m3h(self.0)
    }
}

/// 권장 설정값과 그 설정에서 표가 제공하는 실제 유량.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationResult {
    pub setting_percent: i32,
    /// 표의 유량 [L/h] (요청 유량이 아님)
    pub flow_l_per_h: f64,
    pub flow_m3_per_h: f64,
}

/// `dn` 열에서 |유량 - 목표| 가 최소인 행을 고른다.
///
/// 결측 칸은 후보에서 빠지며, 거리가 같으면 표에서 먼저 나온 행을 쓴다.
pub fn nearest_setting(
    curve: &ValveCurve,
    dn: &str,
    target: TargetFlow,
) -> Result<CalibrationResult, SettingError> {
    let col = curve
        .dn_index(dn)
        .ok_or_else(|| SettingError::UnknownDn(dn.to_string()))?;

    let mut best: Option<(f64, i32, f64)> = None;
    for row in curve.rows() {
        let Some(flow) = row.flows_l_per_h[col] else {
            continue;
        };
        let distance = (flow - target.l_per_h()).abs();
        // 같은 거리면 앞 행 유지
        if best.map_or(true, |(best_distance, _, _)| distance < best_distance) {
            best = Some((distance, row.setting_percent, flow));
        }
    }

    let (_, setting_percent, flow_l_per_h) =
        best.ok_or_else(|| SettingError::NoData(dn.to_string()))?;
    Ok(CalibrationResult {
        setting_percent,
        flow_l_per_h,
        flow_m3_per_h: lph_to_m3h(flow_l_per_h),
    })
}
