use serde::{Deserialize, Serialize};

pub type ProbeId = u32;
pub type MeasurementId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeInfo {
    pub id: ProbeId,
}

/// Anchors are probes with a stable address, they are numbered separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorInfo {
    pub id: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementInfo {
    pub id: MeasurementId,
}
