//! 용량 → DN 자동 선택과 머리글 정규화.
use valve_setting_advisor::config::Config;
use valve_setting_advisor::valve::{
    find_matching_column, normalize_label, CapacityToDnMap, DnResolution,
};

fn columns(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|s| s.to_string()).collect()
}

#[test]
fn normalization_drops_case_spacing_and_punctuation() {
    assert_eq!(normalize_label("DN 15 HF"), "dn15hf");
    assert_eq!(normalize_label("dn-15/HF"), "dn15hf");
    assert_eq!(normalize_label("DN 15 L/h"), "dn15lh");
    assert_eq!(normalize_label("  ñ DN°20  "), "dn20");
    // 소문자로 바꾼 뒤 걸러내므로 켈빈 기호(K)는 k 로 남는다
    assert_eq!(normalize_label("DN 15 \u{212A}"), "dn15k");
}

#[test]
fn containment_match_tolerates_naming_variants() {
    let cols = columns(&["DN 32", "DN 15 HF"]);
    assert_eq!(find_matching_column("dn15hf", &cols), Some("DN 15 HF"));
    assert_eq!(find_matching_column("DN15", &cols), Some("DN 15 HF"));
    assert_eq!(find_matching_column("dn15hf", &columns(&["DN 32"])), None);
}

#[test]
fn first_column_wins_on_multiple_matches() {
    let cols = columns(&["DN 15 LF", "DN 15 HF"]);
    assert_eq!(find_matching_column("DN 15", &cols), Some("DN 15 LF"));
}

#[test]
fn blank_target_matches_nothing() {
    let cols = columns(&["DN 15 HF"]);
    assert_eq!(find_matching_column(" - ", &cols), None);
}

#[test]
fn default_map_resolves_against_table_columns() {
    let map = Config::default().capacity_to_dn_map();
    let cols = columns(&["DN 15 LF", "DN 15 HF", "DN 20 HF", "DN 32"]);

    assert_eq!(map.resolve(12_000, &cols).column(), Some("DN 15 HF"));
    assert_eq!(map.resolve(36_000, &cols).column(), Some("DN 20 HF"));
    assert_eq!(map.resolve(55_000, &cols).column(), Some("DN 32"));
    // "DN 15" 은 먼저 나오는 열을 고른다
    assert_eq!(map.resolve(10_000, &cols).column(), Some("DN 15 LF"));
}

#[test]
fn unmapped_capacity_needs_manual_selection() {
    let map = Config::default().capacity_to_dn_map();
    let cols = columns(&["DN 15 HF"]);
    assert_eq!(map.resolve(99_999, &cols), DnResolution::NotMapped);
}

#[test]
fn missing_column_is_unresolved() {
    let map = Config::default().capacity_to_dn_map();
    let cols = columns(&["DN 15 HF"]);
    assert_eq!(
        map.resolve(42_000, &cols),
        DnResolution::Unresolved {
            target: "DN 32".to_string()
        }
    );
}

#[test]
fn excluded_token_blocks_automatic_selection() {
    let map = CapacityToDnMap::new([(9_000, "DN 15 LF".to_string())])
        .with_excluded_tokens(["LF".to_string()]);
    let cols = columns(&["DN 15 LF"]);
    assert_eq!(
        map.resolve(9_000, &cols),
        DnResolution::Excluded {
            target: "DN 15 LF".to_string()
        }
    );
}

#[test]
fn custom_exclusion_predicate_runs_before_matching() {
    let map = CapacityToDnMap::new([(20_000, "DN 20 HF".to_string())]);
    let cols = columns(&["DN 20 HF"]);
    let res = map.resolve_with(20_000, &cols, |target| target.ends_with("HF"));
    assert!(matches!(res, DnResolution::Excluded { .. }));
    let res = map.resolve_with(20_000, &cols, |_| false);
    assert_eq!(res.column(), Some("DN 20 HF"));
}
