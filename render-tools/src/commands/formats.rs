use std::io::{self, Write};

use anyhow::{Context, Result};
use itertools::Itertools;
use probe_render::output::FormatterRegistry;
use result_models::ObjectKind;
use strum::IntoEnumIterator;

pub fn handle() -> Result<()> {
    let registry = FormatterRegistry::with_builtin();
    let mut stdout = io::stdout().lock();
    write_listing(&registry, &mut stdout).context("Failed to write format listing")
}

fn write_listing(registry: &FormatterRegistry, out: &mut dyn Write) -> io::Result<()> {
    for name in registry.names() {
        let kinds = ObjectKind::iter()
            .filter(|kind| registry.supports_kind(name, *kind))
            .join(", ");
        writeln!(out, "{:<8} {}", name, kinds)?;
    }
    Ok(())
}
