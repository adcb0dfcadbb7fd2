use anyhow::Result;
use clap::Subcommand;
use log::debug;

mod formats;
mod render;

pub fn handle(cmd: Commands) -> Result<()> {
    let command_result = match cmd {
        Commands::Render(data) => render::handle(data),
        Commands::Formats => formats::handle(),
    };
    debug!("Finished command execution. Result: {:?}", command_result);
    command_result
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a stream of newline-delimited JSON results with one output format.
    Render(render::Params),
    /// List the available output formats and the object kinds they accept.
    Formats,
}
