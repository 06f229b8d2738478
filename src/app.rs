use thiserror::Error;
use tracing::debug;

use crate::config::{Config, ConfigError};
use crate::conversion::ConversionError;
use crate::export::ExportError;
use crate::hydraulics::HydraulicsError;
use crate::ui_cli::{self, Cli, Command};
use crate::valve::{self, AdviceError, Advisor, CapacityToDnMap, TableError, ValveCurve};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 참조 데이터 로드 오류
    #[error("데이터 오류: {0}")]
    Table(#[from] TableError),
    /// 단위 변환 오류
    #[error("단위 변환 오류: {0}")]
    Conversion(#[from] ConversionError),
    /// 유량 계산 오류
    #[error("유량 계산 오류: {0}")]
    Hydraulics(#[from] HydraulicsError),
    /// 요청 입력 오류
    #[error("입력 오류: {0}")]
    Advice(#[from] AdviceError),
    /// 내보내기 오류
    #[error("내보내기 오류: {0}")]
    Export(#[from] ExportError),
}

/// 한 번 로드한 읽기 전용 참조 데이터.
#[derive(Debug)]
pub struct Session {
    pub config: Config,
    pub curve: ValveCurve,
    pub capacities: Option<Vec<u32>>,
    pub capacity_map: CapacityToDnMap,
}

impl Session {
    /// 유량표와 장비 용량 목록을 로드한다. 실패하면 어떤 계산도 하지 않는다.
    pub fn load(config: &Config) -> Result<Self, AppError> {
        let data = &config.data;
        let curve = ValveCurve::from_path(&data.valve_table, &data.setting_column)?;
        let capacities = match &data.machine_capacities {
            Some(path) => Some(valve::load_capacities_from_path(
                path,
                &data.capacity_column,
            )?),
            None => None,
        };
        Ok(Self::from_parts(config.clone(), curve, capacities))
    }

    pub fn from_parts(config: Config, curve: ValveCurve, capacities: Option<Vec<u32>>) -> Self {
        let capacity_map = config.capacity_to_dn_map();
        Self {
            config,
            curve,
            capacities,
            capacity_map,
        }
    }

    pub fn advisor(&self) -> Advisor<'_> {
        let advisor = Advisor::new(&self.curve, &self.capacity_map)
            .with_thermal(self.config.thermal)
            .with_band(self.config.band);
        match &self.capacities {
            Some(list) => advisor.with_known_capacities(list),
            None => advisor,
        }
    }
}

/// 하위 명령을 실행한다. 유량표가 필요한 명령만 데이터를 로드한다.
pub fn run(cli: &Cli, config: &Config) -> Result<(), AppError> {
    debug!(command = ?cli.command, "명령 실행");
    match &cli.command {
        Command::Thermal { capacity, velocity } => {
            ui_cli::handle_thermal(config, *capacity, *velocity)
        }
        Command::PipeFlow {
            diameter,
            velocity,
            unit,
            density,
        } => ui_cli::handle_pipe_flow(*diameter, unit, *velocity, *density),
        Command::Classify { value, reference } => {
            ui_cli::handle_classify(config, *value, *reference);
            Ok(())
        }
        Command::Convert {
            kind,
            value,
            from,
            to,
        } => ui_cli::handle_convert(kind, *value, from, to),
        Command::InitConfig { force } => ui_cli::handle_init_config(&cli.config, *force),
        Command::Recommend(args) => {
            let session = Session::load(config)?;
            ui_cli::handle_recommend(&session, args)
        }
        Command::Dns => {
            let session = Session::load(config)?;
            ui_cli::handle_dns(&session);
            Ok(())
        }
        Command::Capacities => {
            let session = Session::load(config)?;
            ui_cli::handle_capacities(&session);
            Ok(())
        }
        Command::Export { request, out } => {
            let session = Session::load(config)?;
            ui_cli::handle_export(&session, request, out)
        }
        Command::Report {
            request,
            compare,
            notes,
            out,
        } => {
            let session = Session::load(config)?;
            ui_cli::handle_report(&session, request, compare, notes.as_deref(), out.as_deref())
        }
    }
}
