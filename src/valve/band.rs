use serde::{Deserialize, Serialize};

/// 허용 운전 범위 배율. 기본은 기준값의 ±20%.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandFactors {
    pub lower: f64,
    pub upper: f64,
}

impl Default for BandFactors {
    fn default() -> Self {
        Self {
            lower: 0.8,
            upper: 1.2,
        }
    }
}

/// 기준 유량 주변의 허용 범위. 양 끝 값을 포함한다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToleranceBand {
    pub minimum: f64,
    pub maximum: f64,
}

/// 허용 범위 판정 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandStatus {
    Below,
    Within,
    Above,
    /// 값이 없거나 숫자가 아님
    Undefined,
}

impl ToleranceBand {
    /// 기준값에 배율을 곱해 범위를 만든다.
    pub fn around(reference: f64, factors: &BandFactors) -> Self {
        let a = reference * factors.lower;
        let b = reference * factors.upper;
        Self {
            minimum: a.min(b),
            maximum: a.max(b),
        }
    }

    /// 기본 배율(0.8, 1.2)로 범위를 만든다.
    pub fn from_reference(reference: f64) -> Self {
        Self::around(reference, &BandFactors::default())
    }

    pub fn classify(&self, value: f64) -> BandStatus {
        classify(value, self.minimum, self.maximum)
    }

    /// 값이 없으면 `Undefined`.
    pub fn classify_opt(&self, value: Option<f64>) -> BandStatus {
        value.map_or(BandStatus::Undefined, |v| self.classify(v))
    }
}

/// 값을 [minimum, maximum] 범위와 비교한다.
pub fn classify(value: f64, minimum: f64, maximum: f64) -> BandStatus {
    if value.is_nan() {
        BandStatus::Undefined
    } else if value < minimum {
        BandStatus::Below
    } else if value > maximum {
        BandStatus::Above
    } else {
        BandStatus::Within
    }
}
