//! config.toml 로드/저장.
use valve_setting_advisor::config::{self, Config};
use valve_setting_advisor::valve::DnResolution;

#[test]
fn default_config_round_trips_through_toml() {
    let cfg = Config::default();
    let text = toml::to_string_pretty(&cfg).expect("serialize");
    let back: Config = toml::from_str(&text).expect("parse");
    assert_eq!(back, cfg);
    assert_eq!(back.capacity_map.len(), 11);
}

#[test]
fn partial_config_fills_defaults() {
    let text = r#"
exclusion_tokens = []

[band]
lower = 0.9

[data]
valve_table = "tabela_valvulas.csv"

[[capacity_map]]
capacity_btu_h = 9000
dn = "DN 15 LF"
"#;
    let cfg: Config = toml::from_str(text).expect("parse");
    assert_eq!(cfg.band.lower, 0.9);
    assert_eq!(cfg.band.upper, 1.2);
    assert_eq!(cfg.thermal.delta_t_k, 5.5);
    assert_eq!(cfg.data.setting_column, "Setting (%)");
    assert_eq!(cfg.capacity_map.len(), 1);

    // 제외 규칙을 비웠으므로 LF 도 자동 선택된다
    let map = cfg.capacity_to_dn_map();
    let cols = vec!["DN 15 LF".to_string()];
    assert!(matches!(map.resolve(9_000, &cols), DnResolution::Matched { .. }));
}

#[test]
fn load_or_default_creates_missing_file() {
    let path = std::env::temp_dir().join(format!(
        "valve_setting_advisor_cfg_{}.toml",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    let created = config::load_or_default(&path).expect("create");
    assert!(path.exists());
    let loaded = config::load_or_default(&path).expect("load");
    assert_eq!(created, loaded);

    std::fs::remove_file(&path).expect("cleanup");
}
