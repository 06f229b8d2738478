use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::info;

use super::ExportError;
use crate::valve::{CalibrationResult, ValveCurve};

pub const SUMMARY_SETTING_HEADER: &str = "Recommended Setting (%)";
pub const SUMMARY_FLOW_HEADER: &str = "Recommended Flow (L/h)";

/// 원본 유량표에 권장값 요약 두 열을 덧붙여 CSV 로 쓴다.
///
/// 요약 값은 표 전체에 대한 것이므로 첫 데이터 행에만 채우고 나머지는 비운다.
/// 결측 칸은 빈 칸으로 쓴다.
pub fn write_table_export<W: Write>(
    curve: &ValveCurve,
    result: &CalibrationResult,
    writer: W,
) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec![curve.setting_column().to_string()];
    header.extend(curve.dn_labels().iter().cloned());
    header.push(SUMMARY_SETTING_HEADER.to_string());
    header.push(SUMMARY_FLOW_HEADER.to_string());
    wtr.write_record(&header)?;

    for (idx, row) in curve.rows().iter().enumerate() {
        let mut record = vec![row.setting_percent.to_string()];
        record.extend(
            row.flows_l_per_h
                .iter()
                .map(|flow| flow.map(|f| f.to_string()).unwrap_or_default()),
        );
        if idx == 0 {
            record.push(result.setting_percent.to_string());
            record.push(format!("{:.2}", result.flow_l_per_h));
        } else {
            record.push(String::new());
            record.push(String::new());
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// 파일로 내보낸다.
pub fn export_table_to_path(
    curve: &ValveCurve,
    result: &CalibrationResult,
    path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    let path = path.as_ref();
    write_table_export(curve, result, File::create(path)?)?;
    info!(path = %path.display(), "유량표 내보내기 완료");
    Ok(())
}
