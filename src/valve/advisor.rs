//! 요청 한 건을 처리하는 조합 계층.
//!
//! 용량 → DN 자동 선택 → 권장 설정값 → 허용 범위 판정 순서로 계산하며,
//! 결과(`Advice`)는 매 요청마다 새로 만든다. 이전 결과를 들고 있지 않는다.

use thiserror::Error;
use tracing::{debug, info, warn};

use super::band::{BandFactors, BandStatus, ToleranceBand};
use super::capacity::{CapacityToDnMap, DnResolution};
use super::setting::{nearest_setting, CalibrationResult, SettingError, TargetFlow};
use super::table::ValveCurve;
use crate::hydraulics::{
    pipe_flow, thermal_to_hydraulic, PipeFlowInput, PipeFlowResult, ThermalConstants, ThermalFlow,
};

/// 요청 검증 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdviceError {
    /// 장비 용량 목록에 없는 용량
    #[error("장비 용량 목록에 없는 용량입니다: {0} Btu/h")]
    UnknownCapacity(u32),
    /// 유량표에 없는 DN
    #[error("유량표에 없는 DN입니다: {0}")]
    UnknownDn(String),
}

/// 사용자 입력 한 묶음. UI 세션 상태 대신 이 값을 통째로 넘긴다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvisorRequest {
    /// 선택한 장비 정격 용량 [Btu/h]
    pub capacity_btu_h: Option<u32>,
    /// 직접 선택한 DN (자동 선택이 실패했을 때 사용)
    pub dn: Option<String>,
    /// 설계 유량 [m³/h]
    pub target_flow_m3_per_h: Option<f64>,
    /// 배관 내경/유속/밀도 직접 입력
    pub pipe: Option<PipeFlowInput>,
}

/// 계산에 쓸 DN 이 어떻게 정해졌는지.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DnSelection {
    /// 용량 매핑으로 자동 선택
    Automatic { target: String, column: String },
    /// 사용자가 직접 선택. `auto` 는 자동 선택을 시도했다면 그 결과.
    Manual {
        column: String,
        auto: Option<DnResolution>,
    },
    /// 선택된 DN 없음
    NotSelected { auto: Option<DnResolution> },
}

impl DnSelection {
    pub fn column(&self) -> Option<&str> {
        match self {
            DnSelection::Automatic { column, .. } | DnSelection::Manual { column, .. } => {
                Some(column.as_str())
            }
            DnSelection::NotSelected { .. } => None,
        }
    }
}

/// 계산을 시작하지 못한 이유.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingInput {
    Dn,
    TargetFlow,
}

/// 권장 설정값 상태.
#[derive(Debug, Clone, PartialEq)]
pub enum Recommendation {
    /// 입력 대기. 표시할 결과 없음.
    Idle(MissingInput),
    Ready(CalibrationResult),
    /// DN 에 유효 데이터가 없어 계산 불가
    Unavailable(SettingError),
}

impl Recommendation {
    pub fn result(&self) -> Option<&CalibrationResult> {
        match self {
            Recommendation::Ready(result) => Some(result),
            _ => None,
        }
    }
}

/// 정격 용량에서 유도한 장비측 유량과 허용 범위 [L/h].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MachineFlow {
    pub thermal: ThermalFlow,
    pub band: ToleranceBand,
}

/// 요청 한 건의 계산 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct Advice {
    pub dn: DnSelection,
    pub recommendation: Recommendation,
    pub machine: Option<MachineFlow>,
    pub pipe: Option<PipeFlowResult>,
    /// 설계 유량의 장비측 범위 판정
    pub target_status: Option<BandStatus>,
    /// 권장 설정 유량의 장비측 범위 판정
    pub calibrated_status: Option<BandStatus>,
    /// 배관 유량의 장비측 범위 판정
    pub pipe_status: Option<BandStatus>,
}

/// 읽기 전용 참조 데이터를 빌려 요청을 처리한다.
#[derive(Debug, Clone, Copy)]
pub struct Advisor<'a> {
    curve: &'a ValveCurve,
    capacity_map: &'a CapacityToDnMap,
    thermal: ThermalConstants,
    band: BandFactors,
    known_capacities: Option<&'a [u32]>,
}

impl<'a> Advisor<'a> {
    pub fn new(curve: &'a ValveCurve, capacity_map: &'a CapacityToDnMap) -> Self {
        Self {
            curve,
            capacity_map,
            thermal: ThermalConstants::default(),
            band: BandFactors::default(),
            known_capacities: None,
        }
    }

    pub fn with_thermal(mut self, thermal: ThermalConstants) -> Self {
        self.thermal = thermal;
        self
    }

    pub fn with_band(mut self, band: BandFactors) -> Self {
        self.band = band;
        self
    }

    /// 장비 용량 목록을 주면 요청 용량이 목록에 있는지 검사한다.
    pub fn with_known_capacities(mut self, capacities: &'a [u32]) -> Self {
        self.known_capacities = Some(capacities);
        self
    }

    pub fn curve(&self) -> &'a ValveCurve {
        self.curve
    }

    /// DN 을 정한다. 자동 선택이 성공하면 직접 입력한 DN 보다 우선한다.
    pub fn select_dn(&self, request: &AdvisorRequest) -> Result<DnSelection, AdviceError> {
        let auto = match request.capacity_btu_h {
            Some(capacity) => {
                if let Some(known) = self.known_capacities {
                    if !known.contains(&capacity) {
                        return Err(AdviceError::UnknownCapacity(capacity));
                    }
                }
                Some(self.capacity_map.resolve(capacity, self.curve.dn_labels()))
            }
            None => None,
        };

        if let Some(DnResolution::Matched { target, column }) = &auto {
            if let Some(manual) = request.dn.as_deref() {
                if manual != column {
                    info!(manual, auto = %column, "자동 선택 DN 사용, 직접 입력 무시");
                }
            }
            return Ok(DnSelection::Automatic {
                target: target.clone(),
                column: column.clone(),
            });
        }

        if let Some(DnResolution::Unresolved { target }) = &auto {
            warn!(dn = %target, "자동 DN을 찾지 못함, 직접 선택 필요");
        }

        match request.dn.as_deref() {
            Some(dn) if self.curve.contains_dn(dn) => Ok(DnSelection::Manual {
                column: dn.to_string(),
                auto,
            }),
            Some(dn) => Err(AdviceError::UnknownDn(dn.to_string())),
            None => Ok(DnSelection::NotSelected { auto }),
        }
    }

    /// 요청을 처음부터 다시 계산한다.
    pub fn advise(&self, request: &AdvisorRequest) -> Result<Advice, AdviceError> {
        let dn = self.select_dn(request)?;

        let target = request
            .target_flow_m3_per_h
            .and_then(TargetFlow::from_m3_per_h);
        let recommendation = match (dn.column(), target) {
            (None, _) => Recommendation::Idle(MissingInput::Dn),
            (Some(_), None) => Recommendation::Idle(MissingInput::TargetFlow),
            (Some(column), Some(target)) => match nearest_setting(self.curve, column, target) {
                Ok(result) => {
                    debug!(
                        dn = column,
                        setting = result.setting_percent,
                        flow_l_h = result.flow_l_per_h,
                        "권장 설정값 계산"
                    );
                    Recommendation::Ready(result)
                }
                Err(err) => {
                    warn!(dn = column, error = %err, "권장 설정값 계산 불가");
                    Recommendation::Unavailable(err)
                }
            },
        };

        let machine = match request.capacity_btu_h {
            Some(capacity) => match thermal_to_hydraulic(f64::from(capacity), &self.thermal) {
                Ok(thermal) => {
                    let band = ToleranceBand::around(thermal.flow_l_per_h, &self.band);
                    Some(MachineFlow { thermal, band })
                }
                Err(err) => {
                    warn!(capacity, error = %err, "장비 유량 환산 불가, 범위 판정 생략");
                    None
                }
            },
            None => None,
        };

        let pipe = request.pipe.and_then(pipe_flow);

        let classify = |value: Option<f64>| machine.map(|m| m.band.classify_opt(value));
        let target_status = classify(target.map(TargetFlow::l_per_h));
        let calibrated_status = classify(recommendation.result().map(|r| r.flow_l_per_h));
        let pipe_status = classify(pipe.map(|p| p.flow_l_per_h));

        Ok(Advice {
            dn,
            recommendation,
            machine,
            pipe,
            target_status,
            calibrated_status,
            pipe_status,
        })
    }
}
