//! One identifier per line, written as soon as the object arrives.

use std::io;

use log::debug;
use result_models::{ObjectKind, ResultItem};

use super::{write_unsupported_object, Channels, Formatter, Tally};

pub const NAME: &str = "id";

pub(crate) fn supports_ids(kind: ObjectKind) -> bool {
    matches!(
        kind,
        ObjectKind::Probe | ObjectKind::Anchor | ObjectKind::Measurement
    )
}

#[derive(Debug, Default)]
pub struct IdFormatter {
    tally: Tally,
}

impl Formatter for IdFormatter {
    fn supports(&self, kind: ObjectKind) -> bool {
        supports_ids(kind)
    }

    fn setup(&mut self, verbose: bool) {
        self.tally = Tally::new(verbose);
    }

    fn process(&mut self, item: &ResultItem, out: &mut Channels<'_>) -> io::Result<()> {
        self.tally.count();
        match item.id() {
            Some(id) => writeln!(out.data, "{}", id),
            None => write_unsupported_object(out.diag, item),
        }
    }

    fn finish(&mut self, out: &mut Channels<'_>) -> io::Result<()> {
        debug!("Wrote ids of {} objects", self.tally.total());
        self.tally.write_summary(out.diag)
    }
}
