//! 밸브 설정값(%)별 DN 유량표. 한 번 로드한 뒤에는 읽기 전용으로 쓴다.

use std::collections::{BTreeSet, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

/// 설정값 열의 기본 머리글.
pub const DEFAULT_SETTING_COLUMN: &str = "Setting (%)";

/// 유량표/장비 용량표 로드 오류. 어느 경우든 계산을 시작하지 않는다.
#[derive(Debug, Error)]
pub enum TableError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// CSV 형식 오류
    #[error("CSV 파싱 오류: {0}")]
    Csv(#[from] csv::Error),
    /// 필수 열이 없음
    #[error("표에 '{0}' 열이 없습니다.")]
    MissingColumn(String),
    /// DN 열이 하나도 없음
    #[error("표에 DN 열이 없습니다.")]
    NoDnColumns,
    /// 설정값을 숫자로 읽을 수 없음
    #[error("{row}행 설정값 '{raw}' 을(를) 해석할 수 없습니다.")]
    InvalidSetting { row: usize, raw: String },
    /// 같은 설정값이 두 번 나옴
    #[error("설정값 {0}% 이(가) 중복되었습니다.")]
    DuplicateSetting(i32),
    /// 행의 열 개수가 DN 개수와 다름
    #[error("{row}행의 유량 개수({found})가 DN 개수({expected})와 다릅니다.")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// 설정값 한 줄. `flows` 는 DN 열 순서를 따르며 비어 있거나 숫자가 아닌 칸은 `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct ValveRow {
    pub setting_percent: i32,
    pub flows_l_per_h: Vec<Option<f64>>,
}

/// 설정값(%) × DN 유량(L/h) 참조표.
#[derive(Debug, Clone, PartialEq)]
pub struct ValveCurve {
    setting_column: String,
    dn_labels: Vec<String>,
    rows: Vec<ValveRow>,
}

impl ValveCurve {
    /// 메모리 상의 값으로 표를 만든다. 행 폭과 설정값 중복을 검사한다.
    pub fn new(dn_labels: Vec<String>, rows: Vec<ValveRow>) -> Result<Self, TableError> {
        Self::with_setting_column(DEFAULT_SETTING_COLUMN, dn_labels, rows)
    }

    fn with_setting_column(
        setting_column: &str,
        dn_labels: Vec<String>,
        rows: Vec<ValveRow>,
    ) -> Result<Self, TableError> {
        if dn_labels.is_empty() {
            return Err(TableError::NoDnColumns);
        }
        let mut seen = HashSet::new();
        for (idx, row) in rows.iter().enumerate() {
            if row.flows_l_per_h.len() != dn_labels.len() {
                return Err(TableError::RowWidth {
                    row: idx + 1,
                    expected: dn_labels.len(),
                    found: row.flows_l_per_h.len(),
                });
            }
            if !seen.insert(row.setting_percent) {
                return Err(TableError::DuplicateSetting(row.setting_percent));
            }
        }
        Ok(Self {
            setting_column: setting_column.to_string(),
            dn_labels,
            rows,
        })
    }

    /// CSV 파일에서 표를 로드한다.
    pub fn from_path(path: impl AsRef<Path>, setting_column: &str) -> Result<Self, TableError> {
        let path = path.as_ref();
        let curve = Self::from_reader(File::open(path)?, setting_column)?;
        info!(
            path = %path.display(),
            rows = curve.rows.len(),
            dns = curve.dn_labels.len(),
            "밸브 유량표 로드"
        );
        Ok(curve)
    }

    /// CSV 소스에서 표를 읽는다. 설정값 열을 제외한 모든 열을 DN 유량 열로 본다.
    pub fn from_reader<R: Read>(reader: R, setting_column: &str) -> Result<Self, TableError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = rdr.headers()?.clone();
        let setting_idx = headers
            .iter()
            .position(|h| h == setting_column)
            .ok_or_else(|| TableError::MissingColumn(setting_column.to_string()))?;

        let dn_columns: Vec<(usize, String)> = headers
            .iter()
            .enumerate()
            .filter(|(idx, h)| *idx != setting_idx && !h.is_empty())
            .map(|(idx, h)| (idx, h.to_string()))
            .collect();

        let mut rows = Vec::new();
        // 유량 칸은 UTF-8 이 아니어도 결측으로 읽는다. 설정값 칸만 엄격하다.
        for (line, record) in rdr.byte_records().enumerate() {
            let record = record?;
            let raw_setting = record.get(setting_idx).unwrap_or(b"");
            let setting_percent = std::str::from_utf8(raw_setting)
                .ok()
                .and_then(parse_setting)
                .ok_or_else(|| TableError::InvalidSetting {
                    row: line + 1,
                    raw: String::from_utf8_lossy(raw_setting).into_owned(),
                })?;
            let flows_l_per_h = dn_columns
                .iter()
                .map(|(idx, _)| {
                    record
                        .get(*idx)
                        .and_then(|cell| std::str::from_utf8(cell).ok())
                        .and_then(parse_flow_cell)
                })
                .collect();
            rows.push(ValveRow {
                setting_percent,
                flows_l_per_h,
            });
        }

        let dn_labels = dn_columns.into_iter().map(|(_, label)| label).collect();
        Self::with_setting_column(setting_column, dn_labels, rows)
    }

    /// 설정값 열 머리글.
    pub fn setting_column(&self) -> &str {
        &self.setting_column
    }

    /// DN 열 이름 (표 순서).
    pub fn dn_labels(&self) -> &[String] {
        &self.dn_labels
    }

    pub fn rows(&self) -> &[ValveRow] {
        &self.rows
    }

    /// DN 이름으로 열 위치를 찾는다. 정확히 일치해야 한다.
    pub fn dn_index(&self, dn: &str) -> Option<usize> {
        self.dn_labels.iter().position(|label| label == dn)
    }

    pub fn contains_dn(&self, dn: &str) -> bool {
        self.dn_index(dn).is_some()
    }

    /// 한 DN 의 (설정값, 유량) 곡선. 결측 칸도 `None` 으로 그대로 포함한다.
    pub fn curve(&self, dn: &str) -> Option<Vec<(i32, Option<f64>)>> {
        let col = self.dn_index(dn)?;
        Some(
            self.rows
                .iter()
                .map(|row| (row.setting_percent, row.flows_l_per_h[col]))
                .collect(),
        )
    }

    /// 결측을 뺀 유효 점만 돌려준다.
    pub fn valid_points(&self, dn: &str) -> Option<Vec<(i32, f64)>> {
        let points = self.curve(dn)?;
        Some(
            points
                .into_iter()
                .filter_map(|(setting, flow)| flow.map(|f| (setting, f)))
                .collect(),
        )
    }
}

/// 퍼센트 표기 설정값("35%", "35.0", "12.5 %")을 정수 %로 바꾼다.
///
/// 반올림은 짝수 쪽으로 맞춘다(12.5 → 12, 13.5 → 14).
pub fn parse_setting(raw: &str) -> Option<i32> {
    let cleaned = raw.replace('%', "");
    let value: f64 = cleaned.trim().parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    let rounded = value.round_ties_even();
    if rounded < i32::MIN as f64 || rounded > i32::MAX as f64 {
        return None;
    }
    Some(rounded as i32)
}

/// 유량 칸을 숫자로 바꾼다. 빈 칸, 숫자가 아닌 값, 무한대/NaN 은 결측이다.
pub fn parse_flow_cell(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

/// 장비 용량 기록에서 중복 없는 정격 용량 목록을 오름차순으로 읽는다.
///
/// 비어 있거나 숫자가 아닌 칸, 1 Btu/h 미만인 칸은 건너뛰고, 소수점 이하는 버린다.
pub fn load_capacities<R: Read>(reader: R, column: &str) -> Result<Vec<u32>, TableError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();
    let idx = headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| TableError::MissingColumn(column.to_string()))?;

    let mut capacities = BTreeSet::new();
    for record in rdr.records() {
        let record = record?;
        let Some(value) = record.get(idx).and_then(parse_flow_cell) else {
            continue;
        };
        if !(value >= 1.0) || value > u32::MAX as f64 {
            debug!(value, "범위를 벗어난 용량 무시");
            continue;
        }
        capacities.insert(value.trunc() as u32);
    }
    Ok(capacities.into_iter().collect())
}

/// 파일에서 장비 용량 목록을 읽는다.
pub fn load_capacities_from_path(
    path: impl AsRef<Path>,
    column: &str,
) -> Result<Vec<u32>, TableError> {
    let path = path.as_ref();
    let capacities = load_capacities(File::open(path)?, column)?;
    info!(path = %path.display(), count = capacities.len(), "장비 용량 목록 로드");
    Ok(capacities)
}
