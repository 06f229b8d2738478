use clap::Parser;
use tracing_subscriber::EnvFilter;
use valve_setting_advisor::config::{self, Config};
use valve_setting_advisor::{
    app,
    ui_cli::{Cli, Command},
};

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 하위 명령을 실행한다.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = try_run() {
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

fn try_run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    // 설정 파일이 깨졌어도 init-config 는 동작해야 한다
    let cfg = match cli.command {
        Command::InitConfig { .. } => Config::default(),
        _ => config::load_or_default(&cli.config)?,
    };
    app::run(&cli, &cfg)?;
    Ok(())
}
