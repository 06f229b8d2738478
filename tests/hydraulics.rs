//! 단위 환산, 열량 → 유량, 배관 유량 회귀 테스트.
use approx::assert_relative_eq;
use valve_setting_advisor::conversion::{self, ConversionError};
use valve_setting_advisor::hydraulics::{
    cross_section_area_m2, diameter_for_velocity_mm, pipe_flow, thermal_to_hydraulic,
    HydraulicsError, PipeFlowInput, ThermalConstants,
};
use valve_setting_advisor::quantity::QuantityKind;
use valve_setting_advisor::units::{lph_to_m3h, m3h_to_lph, LengthUnit};

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1e-12);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {rel_tol})"
    );
}

#[test]
fn liters_and_cubic_meters_round_trip() {
    for x in [0.001, 0.16, 1.0, 12.5, 987.654] {
        assert_relative_eq!(lph_to_m3h(m3h_to_lph(x)), x, max_relative = 1e-12);
    }
    assert_relative_eq!(m3h_to_lph(0.45), 450.0, max_relative = 1e-12);
}

#[test]
fn thermal_derivation_for_10000_btu_h() {
    let flow = thermal_to_hydraulic(10_000.0, &ThermalConstants::default()).expect("flow");
    assert_close("power_kw", flow.power_kw, 2.93, 1e-9);
    assert_close("mass_kg_s", flow.mass_flow_kg_per_s, 0.1272, 5e-3);
    assert_close("flow_m3_h", flow.flow_m3_per_h, 0.4577, 5e-3);
    assert_close("flow_l_h", flow.flow_l_per_h, 457.7, 5e-3);
    // 식 그대로: 2.93 kW * 1000 / (4186 * 5.5)
    assert_close(
        "mass_exact",
        flow.mass_flow_kg_per_s,
        2930.0 / (4186.0 * 5.5),
        1e-12,
    );
    assert_close("m3s", flow.flow_m3_per_s, flow.mass_flow_kg_per_s / 1000.0, 1e-12);
}

#[test]
fn thermal_derivation_rejects_non_positive_capacity() {
    let c = ThermalConstants::default();
    assert!(matches!(
        thermal_to_hydraulic(0.0, &c),
        Err(HydraulicsError::InvalidInput(_))
    ));
    let bad = ThermalConstants {
        delta_t_k: 0.0,
        ..c
    };
    assert!(thermal_to_hydraulic(10_000.0, &bad).is_err());
}

#[test]
fn pipe_flow_from_diameter_and_velocity() {
    let result = pipe_flow(PipeFlowInput::water(20.0, 1.0)).expect("flow");
    assert_close("area", result.area_m2, std::f64::consts::PI * 0.01 * 0.01, 1e-12);
    assert_close("m3h", result.flow_m3_per_h, 1.130_973_355, 1e-8);
    assert_close("lph", result.flow_l_per_h, 1130.973_355, 1e-8);
    assert_close("kgh", result.mass_flow_kg_per_h, 1130.973_355, 1e-8);

    let oil = PipeFlowInput {
        density_kg_per_m3: 850.0,
        ..PipeFlowInput::water(20.0, 1.0)
    };
    let result = pipe_flow(oil).expect("flow");
    assert_close("kgh oil", result.mass_flow_kg_per_h, 1.130_973_355 * 850.0, 1e-8);
}

#[test]
fn pipe_flow_idle_without_geometry() {
    assert!(pipe_flow(PipeFlowInput::water(0.0, 1.0)).is_none());
    assert!(pipe_flow(PipeFlowInput::water(20.0, 0.0)).is_none());
    assert!(pipe_flow(PipeFlowInput::water(f64::NAN, 1.0)).is_none());
}

#[test]
fn diameter_for_velocity_inverts_pipe_flow() {
    let flow = pipe_flow(PipeFlowInput::water(25.0, 1.2)).expect("flow");
    let d = diameter_for_velocity_mm(flow.flow_m3_per_h, 1.2).expect("diameter");
    assert_relative_eq!(d, 25.0, max_relative = 1e-9);
    assert_relative_eq!(cross_section_area_m2(d), flow.area_m2, max_relative = 1e-9);
    assert!(diameter_for_velocity_mm(1.0, 0.0).is_err());
}

#[test]
fn named_unit_conversion() {
    let lph = conversion::convert(QuantityKind::VolumeFlow, 0.5, "m3/h", "L/h").expect("flow");
    assert_relative_eq!(lph, 500.0, max_relative = 1e-12);

    let m3h = conversion::convert_named("flow", 1.0, "l/s", "m3/h").expect("flow");
    assert_relative_eq!(m3h, 3.6, max_relative = 1e-12);

    let kgs = conversion::convert_named("mass", 3600.0, "kg/h", "kg/s").expect("mass");
    assert_relative_eq!(kgs, 1.0, max_relative = 1e-12);

    let kw = conversion::convert_named("power", 12_000.0, "Btu/h", "kW").expect("power");
    assert_relative_eq!(kw, 3.516, max_relative = 1e-9);

    let tr = conversion::convert_named("power", 12_000.0, "btu/h", "TR").expect("power");
    assert_relative_eq!(tr, 1.0, max_relative = 1e-9);

    let inch = conversion::convert_named("length", 25.4, "mm", "in").expect("length");
    assert_relative_eq!(inch, 1.0, max_relative = 1e-12);
}

#[test]
fn unknown_units_and_quantities_are_errors() {
    assert!(matches!(
        conversion::convert_named("flow", 1.0, "gpm", "L/h"),
        Err(ConversionError::UnknownUnit(u)) if u == "gpm"
    ));
    assert!(matches!(
        conversion::convert_named("pressure", 1.0, "bar", "psi"),
        Err(ConversionError::UnsupportedQuantity(_))
    ));
}

#[test]
fn pipe_diameter_accepts_length_units() {
    let inch = PipeFlowInput::new(1.0, LengthUnit::Inch, 1.0, 1000.0);
    assert_relative_eq!(inch.inner_diameter_mm, 25.4, max_relative = 1e-12);
    let metric = PipeFlowInput::new(0.0254, LengthUnit::Meter, 1.0, 1000.0);
    let a = pipe_flow(inch).expect("flow");
    let b = pipe_flow(metric).expect("flow");
    assert_relative_eq!(a.flow_l_per_h, b.flow_l_per_h, max_relative = 1e-12);
    let mm = PipeFlowInput::new(20.0, LengthUnit::Millimeter, 1.0, 1000.0);
    assert_relative_eq!(mm.inner_diameter_mm, 20.0, max_relative = 1e-12);

    assert_eq!(
        conversion::parse_length_unit("IN").expect("unit"),
        LengthUnit::Inch
    );
    assert!(matches!(
        conversion::parse_length_unit("ft"),
        Err(ConversionError::UnknownUnit(_))
    ));
}
