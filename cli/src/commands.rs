pub mod configure;

use clap::Parser;

/// Detects the MCP VM and points every MCP client at it.
///
/// Takes no options; everything is compiled in.
#[derive(Parser)]
#[command(name = "mcp-autoconf")]
#[command(version)]
#[command(about = "Find the MCP VM on the network and write its servers into the client configs.")]
pub struct CommandLine {}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
