/// 단위 변환기가 다루는 물리량 종류를 나타낸다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityKind {
    VolumeFlow,
    MassFlow,
    Power,
    Length,
}

impl QuantityKind {
    /// CLI 에서 받은 물리량 이름을 해석한다.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "flow" | "volume-flow" | "volume_flow" => Some(QuantityKind::VolumeFlow),
            "mass" | "mass-flow" | "mass_flow" => Some(QuantityKind::MassFlow),
            "power" | "capacity" => Some(QuantityKind::Power),
            "length" | "diameter" => Some(QuantityKind::Length),
            _ => None,
        }
    }
}
