//! # Run Configuration
//!
//! Everything here is compiled in: the VM hostname, the service table,
//! the client config files to rewrite and the network timeouts.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;

use crate::services::ServiceTable;

/// Hostname the MCP VM is expected to answer to.
pub const VM_HOSTNAME: &str = "mcp-server";
/// Upper bound for each TCP connect during the subnet sweep.
pub const SCAN_TIMEOUT: Duration = Duration::from_millis(500);
/// Upper bound for each `/health` request.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// A client application config file that receives the `mcpServers` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigTarget {
    /// Human readable application name, used in operator messages.
    pub app: String,
    pub path: PathBuf,
}

impl ConfigTarget {
    pub fn new(app: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            app: app.into(),
            path: path.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub hostname: String,
    pub services: ServiceTable,
    pub targets: Vec<ConfigTarget>,
    pub scan_timeout: Duration,
    pub probe_timeout: Duration,
}

impl Config {
    /// Builds the compiled-in configuration, resolving the user's home and
    /// config directories.
    pub fn from_system() -> anyhow::Result<Self> {
        let home: PathBuf = dirs::home_dir().context("could not determine the home directory")?;
        let config_dir: PathBuf = dirs::config_dir().unwrap_or_else(|| home.join(".config"));

        Ok(Self {
            hostname: VM_HOSTNAME.to_string(),
            services: ServiceTable::builtin(),
            targets: default_targets(&home, &config_dir),
            scan_timeout: SCAN_TIMEOUT,
            probe_timeout: PROBE_TIMEOUT,
        })
    }
}

/// The three client files, in the order they are written.
pub fn default_targets(home: &Path, config_dir: &Path) -> Vec<ConfigTarget> {
    vec![
        ConfigTarget::new(
            "Claude Desktop",
            config_dir.join("Claude").join("claude_desktop_config.json"),
        ),
        ConfigTarget::new("Perplexity", home.join(".perplexity").join("mcp.json")),
        ConfigTarget::new("MCP SuperAssistant", home.join("mcpconfig.json")),
    ]
}
