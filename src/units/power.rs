use serde::{Deserialize, Serialize};

/// 1 Btu/h 에 해당하는 kW. 장비 용량 환산에 쓰는 고정 계수.
pub const KW_PER_BTU_H: f64 = 0.000293;

/// 열출력(용량) 단위. 내부 기준은 kW 이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUnit {
    Watt,
    Kilowatt,
    BtuPerHour,
    /// 냉동톤(12,000 Btu/h)
    RefrigerationTon,
}

fn to_kw(value: f64, unit: PowerUnit) -> f64 {
    match unit {
        PowerUnit::Watt => value / 1000.0,
        PowerUnit::Kilowatt => value,
        PowerUnit::BtuPerHour => value * KW_PER_BTU_H,
        PowerUnit::RefrigerationTon => value * 12_000.0 * KW_PER_BTU_H,
    }
}

fn from_kw(value: f64, unit: PowerUnit) -> f64 {
    match unit {
        PowerUnit::Watt => value * 1000.0,
        PowerUnit::Kilowatt => value,
        PowerUnit::BtuPerHour => value / KW_PER_BTU_H,
        PowerUnit::RefrigerationTon => value / (12_000.0 * KW_PER_BTU_H),
    }
}

/// 열출력을 변환한다.
pub fn convert_power(value: f64, from: PowerUnit, to: PowerUnit) -> f64 {
    let kw = to_kw(value, from);
    from_kw(kw, to)
}
