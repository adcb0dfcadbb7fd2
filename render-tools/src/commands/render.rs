use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use futures::{executor, pin_mut, Stream, StreamExt};
use itertools::Itertools;
use log::{debug, info, trace, warn};
use probe_render::output::{Channels, FormatterRegistry};
use result_models::{ObjectKind, ResultItem};
use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio_stream::wrappers::LinesStream;

#[derive(Args, Clone)]
pub struct Params {
    /// Output format to render with, see the `formats` command
    #[arg(short, long, default_value = "native", env = "OUTPUT_FORMAT")]
    format: String,

    /// Kind of objects contained in the input
    #[arg(short, long, default_value = "result")]
    kind: ObjectKind,

    /// Report the number of processed results on stderr when done
    #[arg(long)]
    summary: bool,

    /// Newline-delimited JSON results, `-` or absent for stdin
    input: Option<PathBuf>,
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("unknown output format `{name}`, available are: {available}")]
    UnknownFormat { name: String, available: String },

    #[error("output format `{format}` cannot render {kind} objects")]
    UnsupportedKind { format: String, kind: ObjectKind },

    #[error("failed to read results from input")]
    Read { source: io::Error },

    #[error("failed to write rendered output")]
    Write { source: io::Error },
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub rendered: usize,
    pub skipped: usize,
}

pub fn handle(params: Params) -> Result<()> {
    let mut registry = FormatterRegistry::with_builtin();
    let stats = executor::block_on(render_input(&mut registry, params))?;
    info!(
        "Rendered {} results, skipped {} malformed lines",
        stats.rendered, stats.skipped
    );
    Ok(())
}

async fn render_input(registry: &mut FormatterRegistry, params: Params) -> Result<RenderStats> {
    let input = open_input(&params.input).await?;
    let lines = LinesStream::new(BufReader::new(input).lines());

    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr();
    let mut out = Channels::new(&mut stdout, &mut stderr);

    let stats = drive(
        registry,
        &params.format,
        params.kind,
        params.summary,
        lines,
        &mut out,
    )
    .await?;
    Ok(stats)
}

async fn open_input(path: &Option<PathBuf>) -> Result<Box<dyn AsyncRead + Unpin>> {
    match path {
        Some(path) if path.as_os_str() != "-" => {
            debug!("Reading results from {:?}", path);
            let file = File::open(path)
                .await
                .with_context(|| format!("Failed to open input file {:?}", path))?;
            Ok(Box::new(file))
        }
        _ => {
            debug!("Reading results from stdin");
            Ok(Box::new(tokio::io::stdin()))
        }
    }
}

/// Feeds every line of `lines` through the formatter `format`, one at a time. The next line
/// is only pulled once the previous one has been rendered.
///
/// Lines that are not valid results are skipped; only I/O failures end the stream early.
pub async fn drive<S>(
    registry: &mut FormatterRegistry,
    format: &str,
    kind: ObjectKind,
    verbose: bool,
    lines: S,
    out: &mut Channels<'_>,
) -> Result<RenderStats, RenderError>
where
    S: Stream<Item = io::Result<String>>,
{
    if !registry.verify(format) {
        return Err(RenderError::UnknownFormat {
            name: format.to_string(),
            available: registry.names().iter().join(", "),
        });
    }
    if !registry.supports_kind(format, kind) {
        return Err(RenderError::UnsupportedKind {
            format: format.to_string(),
            kind,
        });
    }

    registry.setup(format, verbose);
    let mut stats = RenderStats::default();
    pin_mut!(lines);
    let mut line_no = 0usize;
    while let Some(line) = lines.next().await {
        let line = line.map_err(|source| RenderError::Read { source })?;
        line_no += 1;
        if line.trim().is_empty() {
            continue;
        }
        trace!("[[input line {}]] {}", line_no, line);
        match serde_json::from_str::<ResultItem>(&line) {
            Ok(item) => {
                registry
                    .process(format, &item, out)
                    .map_err(|source| RenderError::Write { source })?;
                stats.rendered += 1;
            }
            Err(e) => {
                warn!("Skipping malformed result on line {}: {}", line_no, e);
                stats.skipped += 1;
            }
        }
    }
    registry
        .finish(format, out)
        .map_err(|source| RenderError::Write { source })?;
    Ok(stats)
}
