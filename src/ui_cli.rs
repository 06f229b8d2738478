use std::path::{Path, PathBuf};

use chrono::Local;
use clap::{Args, Parser, Subcommand};

use crate::app::{AppError, Session};
use crate::config::{Config, DEFAULT_CONFIG_PATH};
use crate::conversion::{self, ConversionError};
use crate::export::{self, ReportRequest};
use crate::hydraulics::{self, PipeFlowInput, PipeFlowResult};
use crate::units::{convert_length, LengthUnit};
use crate::valve::{
    Advice, AdvisorRequest, BandStatus, DnResolution, DnSelection, MissingInput, Recommendation,
    ToleranceBand,
};

/// AB-QM 밸브 설정값 추천 도구.
#[derive(Debug, Parser)]
#[command(name = "valve_setting_advisor", version, about)]
pub struct Cli {
    /// 설정 파일 경로
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
    #[command(subcommand)]
    pub command: Command,
}

/// 하위 명령.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// 권장 설정값 계산
    Recommend(RequestArgs),
    /// 유량표의 DN 목록
    Dns,
    /// 장비 용량 목록과 자동 선택 DN
    Capacities,
    /// 정격 용량 → 순환수 유량 환산
    Thermal {
        /// 정격 용량 [Btu/h]
        capacity: f64,
        /// 설계 유속 [m/s]. 주면 권장 내경도 계산한다.
        #[arg(long)]
        velocity: Option<f64>,
    },
    /// 배관 내경/유속으로 유량 계산
    PipeFlow {
        /// 내경 (`--unit` 단위, 기본 mm)
        diameter: f64,
        /// 유속 [m/s]
        velocity: f64,
        /// 내경 단위 (m, mm, in)
        #[arg(long, default_value = "mm")]
        unit: String,
        /// 밀도 [kg/m³]
        #[arg(long, default_value_t = 1000.0)]
        density: f64,
    },
    /// 값을 기준 유량의 허용 범위와 비교
    Classify { value: f64, reference: f64 },
    /// 단위 변환 (flow, mass, power, length)
    Convert {
        kind: String,
        value: f64,
        from: String,
        to: String,
    },
    /// 유량표 + 권장값 요약을 CSV 로 내보내기
    Export {
        #[command(flatten)]
        request: RequestArgs,
        #[arg(long, default_value = "valve_result.csv")]
        out: PathBuf,
    },
    /// DN 곡선 보고서
    Report {
        #[command(flatten)]
        request: RequestArgs,
        /// 비교할 DN (여러 번 지정 가능)
        #[arg(long = "compare")]
        compare: Vec<String>,
        #[arg(long)]
        notes: Option<String>,
        /// 지정하지 않으면 표준 출력에 쓴다.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// 기본 설정 파일 쓰기
    InitConfig {
        /// 기존 파일을 덮어쓴다.
        #[arg(long)]
        force: bool,
    },
}

/// 권장값 계산 입력.
#[derive(Debug, Clone, Args)]
pub struct RequestArgs {
    /// 장비 정격 용량 [Btu/h]
    #[arg(long)]
    pub capacity: Option<u32>,
    /// DN 직접 선택
    #[arg(long)]
    pub dn: Option<String>,
    /// 설계 유량 [m³/h]
    #[arg(long = "flow")]
    pub flow_m3h: Option<f64>,
    /// 배관 내경 (`--diameter-unit` 단위)
    #[arg(long)]
    pub diameter: Option<f64>,
    /// 배관 내경 단위 (m, mm, in)
    #[arg(long, default_value = "mm")]
    pub diameter_unit: String,
    /// 배관 유속 [m/s]
    #[arg(long)]
    pub velocity: Option<f64>,
    /// 유체 밀도 [kg/m³]
    #[arg(long, default_value_t = 1000.0)]
    pub density: f64,
}

impl RequestArgs {
    pub fn to_request(&self) -> Result<AdvisorRequest, ConversionError> {
        let unit = conversion::parse_length_unit(&self.diameter_unit)?;
        let pipe = self
            .diameter
            .zip(self.velocity)
            .map(|(diameter, velocity)| {
                PipeFlowInput::new(diameter, unit, velocity, self.density)
            });
        Ok(AdvisorRequest {
            capacity_btu_h: self.capacity,
            dn: self.dn.clone(),
            target_flow_m3_per_h: self.flow_m3h,
            pipe,
        })
    }
}

/// 권장 설정값 명령을 처리한다.
pub fn handle_recommend(session: &Session, args: &RequestArgs) -> Result<(), AppError> {
    let advice = session.advisor().advise(&args.to_request()?)?;
    print_advice(&advice);
    Ok(())
}

/// DN 목록을 출력한다.
pub fn handle_dns(session: &Session) {
    println!("\n-- DN 목록 --");
    for dn in session.curve.dn_labels() {
        let valid = session
            .curve
            .valid_points(dn)
            .map_or(0, |points| points.len());
        println!("{dn} ({valid}개 유효 설정값)");
    }
}

/// 장비 용량 목록과 자동 선택 결과를 출력한다.
pub fn handle_capacities(session: &Session) {
    println!("\n-- 장비 용량 --");
    let capacities: Vec<u32> = match &session.capacities {
        Some(list) => list.clone(),
        None => {
            println!("장비 용량 파일이 설정되지 않아 매핑표의 용량을 표시합니다.");
            session.config.capacity_map.iter().map(|m| m.capacity_btu_h).collect()
        }
    };
    for capacity in capacities {
        let resolution = session
            .capacity_map
            .resolve(capacity, session.curve.dn_labels());
        println!("{capacity} Btu/h → {}", describe_resolution(&resolution));
    }
}

/// 정격 용량 환산 명령을 처리한다.
pub fn handle_thermal(
    config: &Config,
    capacity: f64,
    velocity: Option<f64>,
) -> Result<(), AppError> {
    let flow = hydraulics::thermal_to_hydraulic(capacity, &config.thermal)?;
    let band = ToleranceBand::around(flow.flow_l_per_h, &config.band);
    println!("\n-- 열량 기반 유량 --");
    println!("열출력: {:.3} kW", flow.power_kw);
    println!("질량 유량: {:.4} kg/s", flow.mass_flow_kg_per_s);
    println!(
        "체적 유량: {:.4} m³/h | {:.1} L/h",
        flow.flow_m3_per_h, flow.flow_l_per_h
    );
    println!("허용 범위: {:.1} ~ {:.1} L/h", band.minimum, band.maximum);
    if let Some(v) = velocity {
        let d = hydraulics::diameter_for_velocity_mm(flow.flow_m3_per_h, v)?;
        let d_in = convert_length(d, LengthUnit::Millimeter, LengthUnit::Inch);
        println!("유속 {v:.2} m/s 기준 권장 내경: {d:.1} mm ({d_in:.2} in)");
    }
    Ok(())
}

/// 배관 유량 명령을 처리한다.
pub fn handle_pipe_flow(
    diameter: f64,
    unit: &str,
    velocity: f64,
    density: f64,
) -> Result<(), AppError> {
    let unit = conversion::parse_length_unit(unit)?;
    let input = PipeFlowInput::new(diameter, unit, velocity, density);
    match hydraulics::pipe_flow(input) {
        Some(result) => print_pipe_flow(&result),
        None => println!("내경과 유속을 0보다 크게 입력하세요."),
    }
    Ok(())
}

/// 허용 범위 판정 명령을 처리한다.
pub fn handle_classify(config: &Config, value: f64, reference: f64) {
    let band = ToleranceBand::around(reference, &config.band);
    println!(
        "범위 {:.3} ~ {:.3}: {}",
        band.minimum,
        band.maximum,
        describe_status(band.classify(value))
    );
}

/// 단위 변환 명령을 처리한다.
pub fn handle_convert(kind: &str, value: f64, from: &str, to: &str) -> Result<(), AppError> {
    let result = conversion::convert_named(kind, value, from, to)?;
    println!("변환 결과: {result} {to}");
    Ok(())
}

/// 내보내기 명령을 처리한다. 권장값이 없으면 파일을 만들지 않는다.
pub fn handle_export(
    session: &Session,
    args: &RequestArgs,
    out: &Path,
) -> Result<(), AppError> {
    let advice = session.advisor().advise(&args.to_request()?)?;
    match advice.recommendation.result() {
        Some(result) => {
            export::export_table_to_path(&session.curve, result, out)?;
            println!("내보내기 완료: {}", out.display());
        }
        None => {
            print_recommendation(&advice.recommendation);
            println!("권장 설정값이 없어 내보내지 않습니다.");
        }
    }
    Ok(())
}

/// 보고서 명령을 처리한다.
pub fn handle_report(
    session: &Session,
    args: &RequestArgs,
    compare: &[String],
    notes: Option<&str>,
    out: Option<&Path>,
) -> Result<(), AppError> {
    let advice = session.advisor().advise(&args.to_request()?)?;
    let request = ReportRequest {
        compare,
        selected: advice.dn.column(),
        recommended_flow_l_per_h: advice.recommendation.result().map(|r| r.flow_l_per_h),
        notes,
    };
    let report = match export::build_report(
        &session.curve,
        &session.config.report.title,
        &request,
        Local::now(),
    ) {
        Ok(report) => report,
        Err(export::ExportError::NoDnAvailable) => {
            println!("보고서를 만들 DN이 없습니다.");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };
    match out {
        Some(path) => {
            report.write_to_path(path)?;
            println!("보고서 저장: {}", path.display());
        }
        None => print!("{report}"),
    }
    Ok(())
}

/// 기본 설정 파일을 쓴다.
pub fn handle_init_config(path: &Path, force: bool) -> Result<(), AppError> {
    if path.exists() && !force {
        println!("{} 이(가) 이미 있습니다. 덮어쓰려면 --force", path.display());
        return Ok(());
    }
    Config::default().save(path)?;
    println!("기본 설정 저장: {}", path.display());
    Ok(())
}

fn print_advice(advice: &Advice) {
    println!("\n-- 권장 설정값 --");
    match &advice.dn {
        DnSelection::Automatic { column, .. } => println!("DN 자동 선택: {column}"),
        DnSelection::Manual { column, auto } => {
            if let Some(auto) = auto {
                println!("자동 선택 실패: {}", describe_resolution(auto));
            }
            println!("DN 직접 선택: {column}");
        }
        DnSelection::NotSelected { auto } => {
            if let Some(auto) = auto {
                println!("자동 선택 실패: {}", describe_resolution(auto));
            }
            println!("DN을 --dn 으로 선택하세요.");
        }
    }
    print_recommendation(&advice.recommendation);

    if let Some(machine) = &advice.machine {
        println!(
            "장비측 유량: {:.4} m³/h | {:.1} L/h ({:.3} kW)",
            machine.thermal.flow_m3_per_h, machine.thermal.flow_l_per_h, machine.thermal.power_kw
        );
        println!(
            "허용 범위: {:.1} ~ {:.1} L/h",
            machine.band.minimum, machine.band.maximum
        );
    }
    if let Some(status) = advice.target_status {
        println!("설계 유량 판정: {}", describe_status(status));
    }
    if let Some(status) = advice.calibrated_status {
        println!("권장 설정 유량 판정: {}", describe_status(status));
    }
    if let Some(pipe) = &advice.pipe {
        print_pipe_flow(pipe);
    }
    if let Some(status) = advice.pipe_status {
        println!("배관 유량 판정: {}", describe_status(status));
    }
}

fn print_recommendation(recommendation: &Recommendation) {
    match recommendation {
        Recommendation::Ready(r) => {
            println!("유량: {:.2} m³/h", r.flow_m3_per_h);
            println!(
                "권장 설정값: {}% → ({:.0} L/h)",
                r.setting_percent, r.flow_l_per_h
            );
        }
        Recommendation::Idle(MissingInput::Dn) => println!("DN이 선택되지 않았습니다."),
        Recommendation::Idle(MissingInput::TargetFlow) => {
            println!("설계 유량(m³/h)을 0보다 크게 입력하세요.")
        }
        Recommendation::Unavailable(err) => println!("{err}"),
    }
}

fn print_pipe_flow(result: &PipeFlowResult) {
    println!("단면적: {:.6} m²", result.area_m2);
    println!(
        "체적 유량: {:.2} m³/h | {:.0} L/h",
        result.flow_m3_per_h, result.flow_l_per_h
    );
    println!("질량 유량: {:.2} kg/h", result.mass_flow_kg_per_h);
}

fn describe_resolution(resolution: &DnResolution) -> String {
    match resolution {
        DnResolution::Matched { column, .. } => column.clone(),
        DnResolution::NotMapped => "매핑 없음 (직접 선택)".to_string(),
        DnResolution::Excluded { target } => format!("'{target}' 자동 선택 제외 (직접 선택)"),
        DnResolution::Unresolved { target } => format!("'{target}' 열 없음 (직접 선택)"),
    }
}

fn describe_status(status: BandStatus) -> &'static str {
    match status {
        BandStatus::Below => "범위 미만",
        BandStatus::Within => "범위 이내",
        BandStatus::Above => "범위 초과",
        BandStatus::Undefined => "판정 불가",
    }
}
