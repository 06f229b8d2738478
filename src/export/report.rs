//! 보고서: 선택한 DN 곡선들, 곡선별 권장점, 메모, 생성 시각.
//! 차트 이미지는 만들지 않고 곡선 데이터를 표 형태의 텍스트로 쓴다.

use std::fmt;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Local};
use tracing::{info, warn};

use super::ExportError;
use crate::valve::{nearest_setting, CalibrationResult, TargetFlow, ValveCurve};

pub const DEFAULT_REPORT_TITLE: &str = "AB-QM Valve Report";

/// 보고서 작성 요청.
#[derive(Debug, Clone, Default)]
pub struct ReportRequest<'a> {
    /// 비교용으로 고른 DN 목록
    pub compare: &'a [String],
    /// 현재 선택된 DN. 비교 목록이 비었을 때 사용한다.
    pub selected: Option<&'a str>,
    /// 권장 유량 [L/h]. 있으면 곡선마다 가장 가까운 점을 표시한다.
    pub recommended_flow_l_per_h: Option<f64>,
    pub notes: Option<&'a str>,
}

/// 보고서에 들어갈 곡선 하나.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveSeries {
    pub dn: String,
    /// 설정값 순서를 따르는 유량 [L/h]
    pub flows_l_per_h: Vec<Option<f64>>,
    pub recommended: Option<CalibrationResult>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub title: String,
    pub settings: Vec<i32>,
    pub curves: Vec<CurveSeries>,
    pub notes: Option<String>,
    pub generated_at: DateTime<Local>,
}

/// 보고서에 넣을 DN 을 정한다.
///
/// 비교 목록 중 유량표에 있는 DN → 없으면 선택된 DN → 그것도 없으면 오류.
pub fn report_dns(
    curve: &ValveCurve,
    compare: &[String],
    selected: Option<&str>,
) -> Result<Vec<String>, ExportError> {
    let mut dns: Vec<String> = Vec::new();
    for dn in compare {
        if !curve.contains_dn(dn) {
            warn!(dn = %dn, "유량표에 없는 DN은 보고서에서 제외");
            continue;
        }
        if !dns.contains(dn) {
            dns.push(dn.clone());
        }
    }
    if !dns.is_empty() {
        return Ok(dns);
    }
    match selected {
        Some(dn) if curve.contains_dn(dn) => Ok(vec![dn.to_string()]),
        _ => Err(ExportError::NoDnAvailable),
    }
}

/// 보고서 데이터를 만든다.
pub fn build_report(
    curve: &ValveCurve,
    title: &str,
    request: &ReportRequest<'_>,
    generated_at: DateTime<Local>,
) -> Result<Report, ExportError> {
    let dns = report_dns(curve, request.compare, request.selected)?;
    let target = request
        .recommended_flow_l_per_h
        .and_then(TargetFlow::from_l_per_h);

    let curves = dns
        .into_iter()
        .filter_map(|dn| {
            let flows_l_per_h = curve
                .curve(&dn)?
                .into_iter()
                .map(|(_, flow)| flow)
                .collect();
            let recommended = target.and_then(|t| nearest_setting(curve, &dn, t).ok());
            Some(CurveSeries {
                dn,
                flows_l_per_h,
                recommended,
            })
        })
        .collect();

    Ok(Report {
        title: title.to_string(),
        settings: curve.rows().iter().map(|r| r.setting_percent).collect(),
        curves,
        notes: request
            .notes
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string),
        generated_at,
    })
}

impl Report {
    /// 텍스트 보고서를 파일로 쓴다.
    pub fn write_to_path(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let path = path.as_ref();
        fs::write(path, self.to_string())?;
        info!(path = %path.display(), curves = self.curves.len(), "보고서 저장");
        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.chars().count()))?;
        writeln!(f)?;

        let setting_header = "Setting (%)";
        let widths: Vec<usize> = self
            .curves
            .iter()
            .map(|c| c.dn.chars().count().max(10))
            .collect();

        write!(f, "{setting_header:>11}")?;
        for (curve, width) in self.curves.iter().zip(&widths) {
            write!(f, " | {:>width$}", curve.dn, width = *width)?;
        }
        writeln!(f)?;

        for (row, setting) in self.settings.iter().enumerate() {
            write!(f, "{setting:>11}")?;
            for (curve, width) in self.curves.iter().zip(&widths) {
                let marked = curve
                    .recommended
                    .is_some_and(|r| r.setting_percent == *setting);
                let cell = match curve.flows_l_per_h.get(row).copied().flatten() {
                    Some(flow) if marked => format!("*{flow:.0}"),
                    Some(flow) => format!("{flow:.0}"),
                    None => "-".to_string(),
                };
                write!(f, " | {cell:>width$}", width = *width)?;
            }
            writeln!(f)?;
        }
        writeln!(f)?;

        for curve in &self.curves {
            match curve.recommended {
                Some(r) => writeln!(
                    f,
                    "* {}: 권장 설정 {}% → {:.0} L/h ({:.2} m³/h)",
                    curve.dn, r.setting_percent, r.flow_l_per_h, r.flow_m3_per_h
                )?,
                None => writeln!(f, "  {}: 권장점 없음", curve.dn)?,
            }
        }

        if let Some(notes) = &self.notes {
            writeln!(f)?;
            writeln!(f, "메모: {notes}")?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "생성 시각: {}",
            self.generated_at.format("%d/%m/%Y %H:%M:%S")
        )
    }
}
