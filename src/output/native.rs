//! Output resembling the native command line tools (ping, traceroute), for humans.
//! Structurally similar to what those tools print, not byte-identical.

use std::io;

use log::{debug, warn};
use result_models::{ObjectKind, Outcome, ResultItem};

use super::{write_unsupported_object, Channels, Formatter, Tally};

mod ping;
mod traceroute;

pub const NAME: &str = "native";

#[derive(Debug, Default)]
pub struct NativeFormatter {
    tally: Tally,
}

impl Formatter for NativeFormatter {
    fn supports(&self, kind: ObjectKind) -> bool {
        kind == ObjectKind::Result
    }

    fn setup(&mut self, verbose: bool) {
        self.tally = Tally::new(verbose);
    }

    fn process(&mut self, item: &ResultItem, out: &mut Channels<'_>) -> io::Result<()> {
        self.tally.count();
        match item {
            ResultItem::Outcome(Outcome::Ping(res)) => ping::render(res, out.data),
            ResultItem::Outcome(Outcome::Traceroute(res)) => traceroute::render(res, out.data),
            ResultItem::Outcome(other) => {
                warn!(
                    "Cannot render {} result from probe {} natively, skipping it.",
                    other,
                    other.probe_id()
                );
                writeln!(out.diag, "No output formatter defined for result type '{}'", other)
            }
            _ => write_unsupported_object(out.diag, item),
        }
    }

    fn finish(&mut self, out: &mut Channels<'_>) -> io::Result<()> {
        debug!("Rendered {} results natively", self.tally.total());
        self.tally.write_summary(out.diag)
    }
}
