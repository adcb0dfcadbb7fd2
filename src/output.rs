//! Output formatters turn a stream of [ResultItem]s into text.
//!
//! Each formatter is registered under a name in a [FormatterRegistry] and follows the same
//! lifecycle: `setup` once, `process` for every incoming item in arrival order, `finish` once
//! at the end (also after an empty or interrupted stream).
//!
//! Rendered data goes to the data channel of [Channels], anything else (unsupported items,
//! summaries) goes to the diagnostic channel so that the data stays machine-readable.

use std::collections::HashMap;
use std::io::{self, Write};

use itertools::Itertools;
use log::{debug, warn};
use result_models::{ObjectKind, ResultItem};

pub mod id;
pub mod idcsv;
pub mod native;

pub trait Formatter {
    /// Whether this formatter is able to render objects of this kind at all.
    fn supports(&self, kind: ObjectKind) -> bool;

    /// Called exactly once, before any item is processed.
    fn setup(&mut self, verbose: bool);

    fn process(&mut self, item: &ResultItem, out: &mut Channels<'_>) -> io::Result<()>;

    fn finish(&mut self, out: &mut Channels<'_>) -> io::Result<()>;
}

/// Where formatters write to.
pub struct Channels<'a> {
    pub data: &'a mut dyn Write,
    pub diag: &'a mut dyn Write,
}

impl<'a> Channels<'a> {
    pub fn new(data: &'a mut dyn Write, diag: &'a mut dyn Write) -> Self {
        Self { data, diag }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.data.flush()?;
        self.diag.flush()
    }
}

/// Maps format names to formatters. Populated once at startup, then only looked up.
///
/// Formatters are not safe for concurrent `process` calls; the registry hands out
/// exclusive access through `&mut self`.
#[derive(Default)]
pub struct FormatterRegistry {
    formats: HashMap<String, Box<dyn Formatter>>,
}

impl FormatterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with all formatters shipped in this crate.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(id::NAME, Box::<id::IdFormatter>::default());
        registry.register(idcsv::NAME, Box::<idcsv::IdCsvFormatter>::default());
        registry.register(native::NAME, Box::<native::NativeFormatter>::default());
        registry
    }

    /// Binds `formatter` to `name`. If the name was taken already, the new formatter replaces
    /// the old one, which is returned.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        formatter: Box<dyn Formatter>,
    ) -> Option<Box<dyn Formatter>> {
        let name = name.into();
        let previous = self.formats.insert(name.clone(), formatter);
        if previous.is_some() {
            warn!("Output formatter {} was registered twice, replacing it.", name);
        } else {
            debug!("Registered output formatter {}", name);
        }
        previous
    }

    pub fn verify(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// False for unknown names as well.
    pub fn supports_kind(&self, name: &str, kind: ObjectKind) -> bool {
        self.formats
            .get(name)
            .map(|it| it.supports(kind))
            .unwrap_or(false)
    }

    pub fn names(&self) -> Vec<&str> {
        self.formats.keys().map(String::as_str).sorted().collect_vec()
    }

    /// Panics if `name` is not registered; callers need to [Self::verify] user input first.
    pub fn setup(&mut self, name: &str, verbose: bool) {
        self.bound(name).setup(verbose)
    }

    /// Panics if `name` is not registered; callers need to [Self::verify] user input first.
    pub fn process(
        &mut self,
        name: &str,
        item: &ResultItem,
        out: &mut Channels<'_>,
    ) -> io::Result<()> {
        self.bound(name).process(item, out)
    }

    /// Panics if `name` is not registered; callers need to [Self::verify] user input first.
    pub fn finish(&mut self, name: &str, out: &mut Channels<'_>) -> io::Result<()> {
        self.bound(name).finish(out)?;
        out.flush()
    }

    fn bound(&mut self, name: &str) -> &mut dyn Formatter {
        match self.formats.get_mut(name) {
            Some(formatter) => formatter.as_mut(),
            // not a user error; verify() must be checked before any other call
            None => panic!("Unknown formatter {} was called", name),
        }
    }
}

/// Counts processed items and reports the total at the end if asked to.
#[derive(Debug, Default)]
pub struct Tally {
    verbose: bool,
    total: u64,
}

impl Tally {
    pub fn new(verbose: bool) -> Self {
        Self { verbose, total: 0 }
    }

    pub fn count(&mut self) {
        self.total += 1;
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Writes `# <total> results`, only in verbose mode.
    pub fn write_summary(&self, diag: &mut dyn Write) -> io::Result<()> {
        if self.verbose {
            writeln!(diag, "# {} results", self.total)?;
        }
        Ok(())
    }
}

pub(crate) fn write_unsupported_object(
    diag: &mut dyn Write,
    item: &ResultItem,
) -> io::Result<()> {
    debug!("Skipping {} object, not supported by this formatter", item.kind());
    writeln!(diag, "No output formatter defined for object type '{}'", item.kind())
}
