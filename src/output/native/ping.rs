use std::io::{self, Write};

use result_models::outcome::PingOutcome;

/// Bytes of each packet that belong to the ICMP header rather than the payload.
const ICMP_HEADER_BYTES: u32 = 8;

pub fn render(res: &PingOutcome, out: &mut dyn Write) -> io::Result<()> {
    writeln!(
        out,
        "PROBE {} PING {} ({}): {} data bytes",
        res.probe_id,
        res.destination(),
        res.destination_addr,
        payload_size(res.packet_size),
    )?;
    // sequence numbers are not part of the result, the position is all we know
    for (seq, reply) in res.replies.iter().enumerate() {
        writeln!(
            out,
            "{} bytes from {}: icmp_seq={} ttl={} time={:.3} ms",
            res.packet_size, reply.source, seq, reply.ttl, reply.rtt,
        )?;
    }
    writeln!(out, "--- {} ping statistics ---", res.destination())?;
    writeln!(
        out,
        "{} packets transmitted, {} packets received, {:.1}% packet loss",
        res.sent,
        res.received,
        loss_percent(res.sent, res.received),
    )?;
    writeln!(
        out,
        "round-trip min/avg/med/max = {:.3}/{:.3}/{:.3}/{:.3} ms",
        res.min_rtt, res.avg_rtt, res.median_rtt, res.max_rtt,
    )?;
    writeln!(out)
}

fn payload_size(packet_size: u32) -> u32 {
    packet_size.saturating_sub(ICMP_HEADER_BYTES)
}

/// Share of sent packets without a reply, in percent.
fn loss_percent(sent: u32, received: u32) -> f64 {
    if received == 0 || sent == 0 {
        return 100.0;
    }
    let lost = sent.saturating_sub(received);
    f64::from(lost) * 100.0 / f64::from(sent)
}

#[cfg(test)]
mod tests {
    use std::io;

    use assertor::{assert_that, EqualityAssertion};

    use crate::test_utils::{ping, reply, text};

    use super::{loss_percent, payload_size, render};

    #[test]
    fn loss_without_replies_is_total() {
        assert_that!(loss_percent(5, 0)).is_equal_to(100.0);
        assert_that!(loss_percent(0, 0)).is_equal_to(100.0);
    }

    #[test]
    fn loss_uses_fractional_ratio() {
        assert_that!(loss_percent(10, 9)).is_equal_to(10.0);
        assert_that!(loss_percent(4, 1)).is_equal_to(75.0);
        assert_that!(loss_percent(3, 3)).is_equal_to(0.0);
    }

    #[test]
    fn loss_one_of_three_formats_rounded() {
        assert_that!(format!("{:.1}", loss_percent(3, 2))).is_equal_to("33.3".to_string());
    }

    #[test]
    fn payload_excludes_header() {
        assert_that!(payload_size(40)).is_equal_to(32);
        assert_that!(payload_size(3)).is_equal_to(0);
    }

    #[test]
    fn three_replies_all_received() -> io::Result<()> {
        // given
        let res = ping(
            3,
            3,
            vec![
                reply("192.0.2.7", 54, 10.0),
                reply("192.0.2.7", 54, 12.5),
                reply("192.0.2.7", 55, 11.2),
            ],
        );
        let mut out = vec![];

        // when
        render(&res, &mut out)?;

        // then
        assert_that!(text(out)).is_equal_to(
            "PROBE 1001 PING ping.example.net (192.0.2.7): 40 data bytes\n\
            48 bytes from 192.0.2.7: icmp_seq=0 ttl=54 time=10.000 ms\n\
            48 bytes from 192.0.2.7: icmp_seq=1 ttl=54 time=12.500 ms\n\
            48 bytes from 192.0.2.7: icmp_seq=2 ttl=55 time=11.200 ms\n\
            --- ping.example.net ping statistics ---\n\
            3 packets transmitted, 3 packets received, 0.0% packet loss\n\
            round-trip min/avg/med/max = 10.000/11.233/11.200/12.500 ms\n\
            \n"
            .to_string(),
        );
        Ok(())
    }

    #[test]
    fn no_replies_at_all() -> io::Result<()> {
        // given
        let mut res = ping(5, 0, vec![]);
        res.packet_size = 40;
        res.destination_name = String::new();
        let mut out = vec![];

        // when
        render(&res, &mut out)?;

        // then
        assert_that!(text(out)).is_equal_to(
            "PROBE 1001 PING 192.0.2.7 (192.0.2.7): 32 data bytes\n\
            --- 192.0.2.7 ping statistics ---\n\
            5 packets transmitted, 0 packets received, 100.0% packet loss\n\
            round-trip min/avg/med/max = 0.000/0.000/0.000/0.000 ms\n\
            \n"
            .to_string(),
        );
        Ok(())
    }

    #[test]
    fn partial_loss_in_footer() -> io::Result<()> {
        // given
        let replies = (0..9).map(|_| reply("192.0.2.7", 60, 1.0)).collect();
        let res = ping(10, 9, replies);
        let mut out = vec![];

        // when
        render(&res, &mut out)?;

        // then
        let text = text(out);
        assert_that!(text.lines().nth(11).map(str::to_owned)).is_equal_to(Some(
            "10 packets transmitted, 9 packets received, 10.0% packet loss".to_string(),
        ));
        assert_that!(text.lines().filter(|it| it.contains("icmp_seq=")).count()).is_equal_to(9);
        Ok(())
    }
}
