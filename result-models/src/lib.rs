use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

pub mod object;
pub mod outcome;

pub use object::{AnchorInfo, MeasurementInfo, ProbeInfo};
pub use outcome::Outcome;

/// Category of objects produced by one command, used to check up-front whether
/// an output formatter is able to handle them.
#[derive(
    Eq, PartialEq, Hash, Debug, Clone, Copy, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum ObjectKind {
    #[strum(serialize = "probe")]
    #[serde(rename = "probe")]
    Probe,
    #[strum(serialize = "anchor")]
    #[serde(rename = "anchor")]
    Anchor,
    #[strum(to_string = "msm", serialize = "measurement")]
    #[serde(rename = "msm", alias = "measurement")]
    Measurement,
    #[strum(serialize = "result")]
    #[serde(rename = "result")]
    Result,
}

/// One item of a result stream. Identifier-bearing objects and measurement
/// outcomes share one stream so that formatters can be driven uniformly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "object")]
pub enum ResultItem {
    #[serde(rename = "probe")]
    Probe(ProbeInfo),
    #[serde(rename = "anchor")]
    Anchor(AnchorInfo),
    #[serde(rename = "msm", alias = "measurement")]
    Measurement(MeasurementInfo),
    #[serde(rename = "result")]
    Outcome(Outcome),
}

impl ResultItem {
    pub fn kind(&self) -> ObjectKind {
        match self {
            ResultItem::Probe(_) => ObjectKind::Probe,
            ResultItem::Anchor(_) => ObjectKind::Anchor,
            ResultItem::Measurement(_) => ObjectKind::Measurement,
            ResultItem::Outcome(_) => ObjectKind::Result,
        }
    }

    /// Numeric identifier of the object, if this is an identifier-bearing object.
    pub fn id(&self) -> Option<u64> {
        match self {
            ResultItem::Probe(it) => Some(it.id.into()),
            ResultItem::Anchor(it) => Some(it.id.into()),
            ResultItem::Measurement(it) => Some(it.id),
            ResultItem::Outcome(_) => None,
        }
    }
}

impl From<Outcome> for ResultItem {
    fn from(value: Outcome) -> Self {
        ResultItem::Outcome(value)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use assertor::{assert_that, EqualityAssertion, OptionAssertion, ResultAssertion};

    use super::*;

    #[test]
    fn kind_parses_aliases() {
        // when, then
        assert_that!(ObjectKind::from_str("msm")).is_equal_to(Ok(ObjectKind::Measurement));
        assert_that!(ObjectKind::from_str("measurement")).is_equal_to(Ok(ObjectKind::Measurement));
        assert_that!(ObjectKind::from_str("Probe")).is_equal_to(Ok(ObjectKind::Probe));
        assert_that!(ObjectKind::from_str("dns")).is_err();
    }

    #[test]
    fn kind_displays_short_name() {
        assert_that!(ObjectKind::Measurement.to_string()).is_equal_to("msm".to_string());
        assert_that!(ObjectKind::Result.to_string()).is_equal_to("result".to_string());
    }

    #[test]
    fn probe_object_from_json() -> Result<(), serde_json::Error> {
        // given
        let raw = r#"{"object": "probe", "id": 6001}"#;

        // when
        let item: ResultItem = serde_json::from_str(raw)?;

        // then
        assert_that!(item.kind()).is_equal_to(ObjectKind::Probe);
        assert_that!(item.id()).has_value(6001);
        Ok(())
    }

    #[test]
    fn measurement_object_accepts_long_tag() -> Result<(), serde_json::Error> {
        // given
        let raw = r#"{"object": "measurement", "id": 10001}"#;

        // when
        let item: ResultItem = serde_json::from_str(raw)?;

        // then
        assert_that!(item).is_equal_to(ResultItem::Measurement(MeasurementInfo { id: 10001 }));
        Ok(())
    }

    #[test]
    fn outcome_has_no_id() -> Result<(), serde_json::Error> {
        // given
        let raw = r#"{"object": "result", "type": "dns", "probe_id": 12}"#;

        // when
        let item: ResultItem = serde_json::from_str(raw)?;

        // then
        assert_that!(item.kind()).is_equal_to(ObjectKind::Result);
        assert_that!(item.id()).is_none();
        Ok(())
    }
}
