use std::fmt;
use std::net::IpAddr;

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::object::ProbeId;

/// Structured outcome of running one network diagnostic from one probe.
///
/// Result types without a model of their own (http, ntp, ...) are kept as
/// [Outcome::Unknown] so that formatters can still report them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Outcome {
    Ping(PingOutcome),
    Traceroute(TracerouteOutcome),
    /// Declared for completeness, no formatter renders these yet.
    Dns(DnsOutcome),
    /// Cannot be serialised again, the original payload is not kept.
    #[serde(skip_serializing)]
    Unknown(UnknownOutcome),
}

impl Outcome {
    pub fn probe_id(&self) -> ProbeId {
        match self {
            Outcome::Ping(it) => it.probe_id,
            Outcome::Traceroute(it) => it.probe_id,
            Outcome::Dns(it) => it.probe_id,
            Outcome::Unknown(it) => it.probe_id,
        }
    }

    /// Lowercase name of the result type, as found in the `type` field.
    pub fn type_name(&self) -> &str {
        match self {
            Outcome::Ping(_) => "ping",
            Outcome::Traceroute(_) => "traceroute",
            Outcome::Dns(_) => "dns",
            Outcome::Unknown(it) => &it.kind,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum KnownOutcome {
    Ping(PingOutcome),
    Traceroute(TracerouteOutcome),
    Dns(DnsOutcome),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OutcomeRepr {
    Known(KnownOutcome),
    Other(UnknownOutcome),
}

const KNOWN_TYPES: [&str; 3] = ["ping", "traceroute", "dns"];

impl<'de> Deserialize<'de> for Outcome {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match OutcomeRepr::deserialize(deserializer)? {
            OutcomeRepr::Known(KnownOutcome::Ping(it)) => Ok(Outcome::Ping(it)),
            OutcomeRepr::Known(KnownOutcome::Traceroute(it)) => Ok(Outcome::Traceroute(it)),
            OutcomeRepr::Known(KnownOutcome::Dns(it)) => Ok(Outcome::Dns(it)),
            // a known type that failed to parse as such is malformed, not unknown
            OutcomeRepr::Other(it) if KNOWN_TYPES.contains(&it.kind.as_str()) => Err(
                D::Error::custom(format!("malformed {} result from probe {}", it.kind, it.probe_id)),
            ),
            OutcomeRepr::Other(it) => Ok(Outcome::Unknown(it)),
        }
    }
}

/// Result of a type that is not modelled here, only identified by its `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnknownOutcome {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub probe_id: ProbeId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PingOutcome {
    pub probe_id: ProbeId,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub destination_name: String,
    pub destination_addr: IpAddr,
    /// Size of the sent packets in bytes, including the 8 byte ICMP header.
    pub packet_size: u32,
    pub sent: u32,
    pub received: u32,
    #[serde(default)]
    pub replies: Vec<PingReply>,
    /// Round-trip time statistics in milliseconds, as computed upstream.
    pub min_rtt: f64,
    pub avg_rtt: f64,
    pub median_rtt: f64,
    pub max_rtt: f64,
}

impl PingOutcome {
    pub fn destination(&self) -> String {
        destination_or_addr(&self.destination_name, &self.destination_addr)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PingReply {
    pub source: IpAddr,
    pub ttl: u8,
    /// milliseconds
    pub rtt: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TracerouteOutcome {
    pub probe_id: ProbeId,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub destination_name: String,
    pub destination_addr: IpAddr,
    pub packet_size: u32,
    /// Ascending by hop number.
    #[serde(default)]
    pub hops: Vec<Hop>,
}

impl TracerouteOutcome {
    pub fn destination(&self) -> String {
        destination_or_addr(&self.destination_name, &self.destination_addr)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hop {
    pub hop_number: u8,
    /// In order of arrival, not sorted.
    #[serde(default)]
    pub responses: Vec<HopResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HopResponse {
    #[serde(default)]
    pub from: Option<IpAddr>,
    /// milliseconds, meaningless for timeouts and late arrivals
    #[serde(default)]
    pub rtt: f64,
    #[serde(default)]
    pub timeout: bool,
    /// The response arrived after the probe had already given up on it.
    #[serde(default)]
    pub late: bool,
}

impl HopResponse {
    /// Address of the responder, or [None] if there was no usable reply.
    pub fn replied_from(&self) -> Option<IpAddr> {
        if self.timeout {
            None
        } else {
            self.from
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnsOutcome {
    pub probe_id: ProbeId,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub destination_addr: Option<IpAddr>,
}

fn destination_or_addr(name: &str, addr: &IpAddr) -> String {
    if name.is_empty() {
        addr.to_string()
    } else {
        name.to_owned()
    }
}
