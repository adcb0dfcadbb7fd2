use std::net::IpAddr;

use itertools::Itertools;
use result_models::outcome::{
    DnsOutcome, Hop, HopResponse, PingOutcome, PingReply, TracerouteOutcome,
};
use result_models::Outcome;

pub fn addr(input: &str) -> IpAddr {
    input.parse().expect(input)
}

pub fn text(written: Vec<u8>) -> String {
    String::from_utf8(written).expect("formatters to write UTF-8")
}

pub fn reply(source: &str, ttl: u8, rtt: f64) -> PingReply {
    PingReply {
        source: addr(source),
        ttl,
        rtt,
    }
}

/// Ping from probe 1001 to ping.example.net with statistics derived from the replies.
pub fn ping(sent: u32, received: u32, replies: Vec<PingReply>) -> PingOutcome {
    let rtts = replies.iter().map(|it| it.rtt).sorted_by(f64::total_cmp).collect_vec();
    let (min_rtt, avg_rtt, median_rtt, max_rtt) = if rtts.is_empty() {
        (0.0, 0.0, 0.0, 0.0)
    } else {
        (
            rtts[0],
            rtts.iter().sum::<f64>() / rtts.len() as f64,
            rtts[rtts.len() / 2],
            rtts[rtts.len() - 1],
        )
    };
    PingOutcome {
        probe_id: 1001,
        timestamp: None,
        destination_name: "ping.example.net".to_string(),
        destination_addr: addr("192.0.2.7"),
        packet_size: 48,
        sent,
        received,
        replies,
        min_rtt,
        avg_rtt,
        median_rtt,
        max_rtt,
    }
}

pub fn dns_outcome(probe_id: u32) -> Outcome {
    Outcome::Dns(DnsOutcome {
        probe_id,
        timestamp: None,
        destination_addr: None,
    })
}

/// Traceroute from probe 2002 to trace.example.net
pub fn traceroute(hops: Vec<Hop>) -> TracerouteOutcome {
    TracerouteOutcome {
        probe_id: 2002,
        timestamp: None,
        destination_name: "trace.example.net".to_string(),
        destination_addr: addr("198.51.100.9"),
        packet_size: 48,
        hops,
    }
}

pub fn hop(hop_number: u8, responses: Vec<HopResponse>) -> Hop {
    Hop {
        hop_number,
        responses,
    }
}

pub fn answer(from: &str, rtt: f64) -> HopResponse {
    HopResponse {
        from: Some(addr(from)),
        rtt,
        timeout: false,
        late: false,
    }
}

pub fn late(from: &str) -> HopResponse {
    HopResponse {
        late: true,
        ..answer(from, 0.0)
    }
}

pub fn timeout() -> HopResponse {
    HopResponse {
        from: None,
        rtt: 0.0,
        timeout: true,
        late: false,
    }
}
