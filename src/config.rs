use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::export::DEFAULT_REPORT_TITLE;
use crate::hydraulics::ThermalConstants;
use crate::valve::{BandFactors, CapacityMapping, CapacityToDnMap, DEFAULT_SETTING_COLUMN};

/// 기본 설정 파일 이름.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 참조 데이터 위치와 열 이름.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSources {
    /// 밸브 유량표 CSV
    pub valve_table: PathBuf,
    /// 장비 용량 기록 CSV (없으면 용량 목록 검사를 하지 않는다)
    pub machine_capacities: Option<PathBuf>,
    pub setting_column: String,
    pub capacity_column: String,
}

impl Default for DataSources {
    fn default() -> Self {
        Self {
            valve_table: PathBuf::from("valve_table.csv"),
            machine_capacities: None,
            setting_column: DEFAULT_SETTING_COLUMN.to_string(),
            capacity_column: "Capacity (Btu/h)".to_string(),
        }
    }
}

/// 보고서 설정.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub title: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            title: DEFAULT_REPORT_TITLE.to_string(),
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataSources,
    /// DN 이름에 이 문자열이 있으면 자동 선택하지 않는다.
    pub exclusion_tokens: Vec<String>,
    pub band: BandFactors,
    pub thermal: ThermalConstants,
    pub report: ReportSettings,
    /// 정격 용량 → DN 매핑
    pub capacity_map: Vec<CapacityMapping>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataSources::default(),
            exclusion_tokens: vec!["LF".to_string()],
            band: BandFactors::default(),
            thermal: ThermalConstants::default(),
            report: ReportSettings::default(),
            capacity_map: default_capacity_map(),
        }
    }
}

/// 기본 용량 → DN 매핑.
pub fn default_capacity_map() -> Vec<CapacityMapping> {
    [
        (10_000, "DN 15"),
        (12_000, "DN 15 HF"),
        (16_000, "DN 15 HF"),
        (20_000, "DN 15 HF"),
        (24_000, "DN 15 HF"),
        (25_000, "DN 15 HF"),
        (32_000, "DN 20 HF"),
        (36_000, "DN 20 HF"),
        (42_000, "DN 32"),
        (44_000, "DN 32"),
        (55_000, "DN 32"),
    ]
    .into_iter()
    .map(|(capacity_btu_h, dn)| CapacityMapping {
        capacity_btu_h,
        dn: dn.to_string(),
    })
    .collect()
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Serde(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        info!(path = %path.display(), "설정 로드");
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save(path)?;
        info!(path = %path.display(), "기본 설정 생성");
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 파일에 저장한다.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 설정의 매핑과 제외 규칙으로 자동 선택기를 만든다.
    pub fn capacity_to_dn_map(&self) -> CapacityToDnMap {
        CapacityToDnMap::from_mappings(&self.capacity_map)
            .with_excluded_tokens(self.exclusion_tokens.iter().cloned())
    }
}
