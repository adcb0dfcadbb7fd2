use std::io::{self, Write};
use std::net::IpAddr;

use result_models::outcome::{Hop, TracerouteOutcome};

/// Shown in the header only, results don't carry the configured limit.
const MAX_HOPS: u8 = 255;

/// Lines for further responders of the same hop are aligned below the first one.
const CONTINUATION_INDENT: &str = "     ";

pub fn render(res: &TracerouteOutcome, out: &mut dyn Write) -> io::Result<()> {
    writeln!(
        out,
        "PROBE {} traceroute to {} ({}): {} hops max, {} byte packets",
        res.probe_id,
        res.destination(),
        res.destination_addr,
        MAX_HOPS,
        res.packet_size,
    )?;
    for hop in res.hops.iter() {
        render_hop(hop, out)?;
    }
    Ok(())
}

/// Prints one hop, starting a new indented line whenever the responder changes.
/// Repeated responses from the same address only print their timing.
fn render_hop(hop: &Hop, out: &mut dyn Write) -> io::Result<()> {
    if hop.responses.is_empty() {
        return Ok(());
    }
    write!(out, "{:3}  ", hop.hop_number)?;
    let mut last_from: Option<IpAddr> = None;
    for (i, response) in hop.responses.iter().enumerate() {
        if i > 0 {
            write!(out, " ")?;
        }
        let Some(from) = response.replied_from() else {
            write!(out, "*")?;
            continue;
        };
        if last_from != Some(from) {
            if last_from.is_some() {
                write!(out, "\n{}", CONTINUATION_INDENT)?;
            }
            write!(out, "{} ({})", from, from)?;
        }
        if response.late {
            write!(out, " LATE")?;
        } else {
            write!(out, " {:.3} ms", response.rtt)?;
        }
        last_from = Some(from);
    }
    writeln!(out)
}
