//! 최근접 설정값 탐색: 정확성, 동점 처리, 결측 제외.
use valve_setting_advisor::valve::{
    nearest_setting, SettingError, TargetFlow, ValveCurve, ValveRow,
};

fn single_dn(points: &[(i32, Option<f64>)]) -> ValveCurve {
    let rows = points
        .iter()
        .map(|&(setting_percent, flow)| ValveRow {
            setting_percent,
            flows_l_per_h: vec![flow],
        })
        .collect();
    ValveCurve::new(vec!["X".to_string()], rows).expect("curve")
}

fn lph(flow: f64) -> TargetFlow {
    TargetFlow::from_l_per_h(flow).expect("positive target")
}

#[test]
fn picks_row_with_smallest_distance() {
    let curve = single_dn(&[(10, Some(100.0)), (20, Some(150.0)), (30, Some(300.0))]);
    let result = nearest_setting(&curve, "X", lph(160.0)).expect("result");
    assert_eq!(result.setting_percent, 20);
    assert_eq!(result.flow_l_per_h, 150.0);
    assert!((result.flow_m3_per_h - 0.15).abs() < 1e-12);
}

#[test]
fn repeated_calls_give_identical_results() {
    let curve = single_dn(&[(10, Some(100.0)), (20, Some(150.0)), (30, Some(300.0))]);
    let first = nearest_setting(&curve, "X", lph(222.0));
    let second = nearest_setting(&curve, "X", lph(222.0));
    assert_eq!(first, second);
}

#[test]
fn ties_resolve_to_first_row() {
    let curve = single_dn(&[(10, Some(100.0)), (20, Some(100.0))]);
    for _ in 0..3 {
        let result = nearest_setting(&curve, "X", lph(100.0)).expect("result");
        assert_eq!(result.setting_percent, 10);
    }

    // 양쪽으로 같은 거리
    let curve = single_dn(&[(10, Some(100.0)), (20, Some(200.0))]);
    let result = nearest_setting(&curve, "X", lph(150.0)).expect("result");
    assert_eq!(result.setting_percent, 10);
}

#[test]
fn missing_rows_are_never_selected() {
    let csv = "Setting (%),X\n10%,100\n20%,n/a\n30%,300\n";
    let curve = ValveCurve::from_reader(csv.as_bytes(), "Setting (%)").expect("curve");
    let result = nearest_setting(&curve, "X", lph(190.0)).expect("result");
    assert_eq!(result.setting_percent, 10);
    assert_eq!(result.flow_l_per_h, 100.0);

    let curve = single_dn(&[(10, Some(100.0)), (20, None), (30, Some(300.0))]);
    let result = nearest_setting(&curve, "X", lph(210.0)).expect("result");
    assert_eq!(result.setting_percent, 30);
}

#[test]
fn result_carries_table_flow_not_request() {
    let curve = single_dn(&[(10, Some(100.0)), (20, Some(150.0))]);
    let result = nearest_setting(&curve, "X", lph(149.0)).expect("result");
    assert_eq!(result.flow_l_per_h, 150.0);
}

#[test]
fn dn_without_valid_rows_reports_no_data() {
    let curve = single_dn(&[(10, None), (20, None)]);
    let err = nearest_setting(&curve, "X", lph(100.0)).unwrap_err();
    assert_eq!(err, SettingError::NoData("X".to_string()));
}

#[test]
fn unknown_dn_is_reported() {
    let curve = single_dn(&[(10, Some(100.0))]);
    let err = nearest_setting(&curve, "DN 99", lph(100.0)).unwrap_err();
    assert_eq!(err, SettingError::UnknownDn("DN 99".to_string()));
}

#[test]
fn non_positive_target_is_not_a_target() {
    assert!(TargetFlow::from_m3_per_h(0.0).is_none());
    assert!(TargetFlow::from_m3_per_h(-0.5).is_none());
    assert!(TargetFlow::from_m3_per_h(f64::NAN).is_none());
    let t = TargetFlow::from_m3_per_h(0.16).expect("target");
    assert!((t.l_per_h() - 160.0).abs() < 1e-9);
}
