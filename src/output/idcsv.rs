//! All identifiers comma-separated on a single line, written at the end.

use std::io;

use itertools::Itertools;
use log::debug;
use result_models::{ObjectKind, ResultItem};

use super::{id::supports_ids, write_unsupported_object, Channels, Formatter, Tally};

pub const NAME: &str = "idcsv";

#[derive(Debug, Default)]
pub struct IdCsvFormatter {
    tally: Tally,
    ids: Vec<u64>,
}

impl Formatter for IdCsvFormatter {
    fn supports(&self, kind: ObjectKind) -> bool {
        supports_ids(kind)
    }

    fn setup(&mut self, verbose: bool) {
        self.tally = Tally::new(verbose);
        self.ids.clear();
    }

    fn process(&mut self, item: &ResultItem, out: &mut Channels<'_>) -> io::Result<()> {
        self.tally.count();
        match item.id() {
            Some(id) => {
                self.ids.push(id);
                Ok(())
            }
            None => write_unsupported_object(out.diag, item),
        }
    }

    fn finish(&mut self, out: &mut Channels<'_>) -> io::Result<()> {
        debug!("Collected {} ids", self.ids.len());
        if !self.ids.is_empty() {
            writeln!(out.data, "{}", self.ids.iter().join(","))?;
        }
        self.tally.write_summary(out.diag)
    }
}
