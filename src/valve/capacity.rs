//! 장비 정격 용량 → DN 자동 선택.
//!
//! 매핑표의 DN 이름은 실제 유량표 머리글과 표기가 조금씩 다를 수 있으므로
//! 정규화한 뒤 포함 관계로 맞춘다. 예) 매핑 "DN 15 HF" ↔ 머리글 "DN15-HF".

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// 매핑표 한 항목. config.toml 의 `[[capacity_map]]` 과 1:1 대응한다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityMapping {
    /// 정격 용량 [Btu/h]
    pub capacity_btu_h: u32,
    /// 의도한 DN 이름
    pub dn: String,
}

/// 자동 선택 결과. `Matched` 외의 경우는 수동 DN 선택으로 넘어간다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DnResolution {
    /// 유량표 열을 찾음
    Matched { target: String, column: String },
    /// 매핑표에 없는 용량
    NotMapped,
    /// 제외 규칙에 걸린 DN 이름
    Excluded { target: String },
    /// 일치하는 열이 없음
    Unresolved { target: String },
}

impl DnResolution {
    /// 찾은 열 이름.
    pub fn column(&self) -> Option<&str> {
        match self {
            DnResolution::Matched { column, .. } => Some(column.as_str()),
            _ => None,
        }
    }
}

/// 정격 용량 → DN 매핑과 자동 선택 제외 규칙.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityToDnMap {
    entries: BTreeMap<u32, String>,
    excluded_tokens: Vec<String>,
}

impl CapacityToDnMap {
    pub fn new(entries: impl IntoIterator<Item = (u32, String)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
            excluded_tokens: Vec::new(),
        }
    }

    /// 설정 파일의 매핑 항목으로 만든다. 같은 용량이 반복되면 뒤 항목이 이긴다.
    pub fn from_mappings(mappings: &[CapacityMapping]) -> Self {
        Self::new(mappings.iter().map(|m| (m.capacity_btu_h, m.dn.clone())))
    }

    /// DN 이름에 이 문자열이 들어 있으면 자동 선택하지 않는다(대소문자 구분).
    pub fn with_excluded_tokens(mut self, tokens: impl IntoIterator<Item = String>) -> Self {
        self.excluded_tokens = tokens.into_iter().collect();
        self
    }

    pub fn target_label(&self, capacity_btu_h: u32) -> Option<&str> {
        self.entries.get(&capacity_btu_h).map(String::as_str)
    }

    pub fn is_excluded(&self, target: &str) -> bool {
        self.excluded_tokens
            .iter()
            .any(|token| !token.is_empty() && target.contains(token.as_str()))
    }

    /// 설정된 제외 규칙으로 자동 선택한다.
    pub fn resolve(&self, capacity_btu_h: u32, columns: &[String]) -> DnResolution {
        self.resolve_with(capacity_btu_h, columns, |target| self.is_excluded(target))
    }

    /// 제외 판단을 호출자가 넘기는 자동 선택. 제외 판단은 정규화 전에 한다.
    pub fn resolve_with<F>(
        &self,
        capacity_btu_h: u32,
        columns: &[String],
        is_excluded: F,
    ) -> DnResolution
    where
        F: Fn(&str) -> bool,
    {
        let Some(target) = self.target_label(capacity_btu_h) else {
            debug!(capacity_btu_h, "매핑되지 않은 용량");
            return DnResolution::NotMapped;
        };
        if is_excluded(target) {
            debug!(capacity_btu_h, dn = target, "자동 선택 제외 DN");
            return DnResolution::Excluded {
                target: target.to_string(),
            };
        }
        match find_matching_column(target, columns) {
            Some(column) => DnResolution::Matched {
                target: target.to_string(),
                column: column.to_string(),
            },
            None => DnResolution::Unresolved {
                target: target.to_string(),
            },
        }
    }
}

/// 소문자로 바꾸고 ASCII 영숫자 외 문자를 모두 지운다.
pub fn normalize_label(label: &str) -> String {
    label
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// 정규화한 머리글이 정규화한 대상 이름을 포함하는 첫 열을 돌려준다.
///
/// 대상이 정규화 후 빈 문자열이면 어떤 열과도 맞추지 않는다.
pub fn find_matching_column<'a>(target: &str, columns: &'a [String]) -> Option<&'a str> {
    let key = normalize_label(target);
    if key.is_empty() {
        return None;
    }
    columns
        .iter()
        .find(|col| normalize_label(col).contains(&key))
        .map(String::as_str)
}
