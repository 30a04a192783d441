use std::time::{Duration, Instant};

use anyhow::{Context, bail};
use autoconf_common::{config::Config, success};
use autoconf_core::locator::{Discovery, HostAddress, HostLocator};
use autoconf_core::sync::{ServiceStatus, SyncReport, Synchronizer, server_map};
use autoconf_protocols::http::HealthClient;
use colored::*;
use tracing::{error, info, warn};

use crate::terminal::{colors, format, print, prompt, spinner};

const RESTART_HINT: &str = "All configs updated! Restart Claude Desktop, Perplexity, and reload your browser for ChatGPT MCP SuperAssistant.";

pub async fn configure(cfg: &Config) -> anyhow::Result<()> {
    print::header("detecting mcp vm");
    let host: HostAddress = locate_host(cfg).await?;
    success!("Detected MCP VM at {host}");

    print::header("probing services");
    let probe: HealthClient =
        HealthClient::new(cfg.probe_timeout).context("failed to build the HTTP client")?;
    let sync: Synchronizer<HealthClient> = Synchronizer::new(probe);
    let host: String = host.to_string();
    let statuses: Vec<ServiceStatus> = sync.check_services(&host, &cfg.services).await;

    print::header("updating client configs");
    let report: SyncReport = sync.apply(&cfg.targets, &server_map(&statuses));

    print::header("mcp servers");
    print_services(&statuses);
    print_targets(&report);

    finish(report)
}

async fn locate_host(cfg: &Config) -> anyhow::Result<HostAddress> {
    info!("Detecting MCP VM on network...");
    spinner::start(format!("Resolving {}...", cfg.hostname));

    let locator = HostLocator::system(cfg)
        .on_candidate(|ip| spinner::set_message(format!("Sweeping {ip}...")));
    let start_time: Instant = Instant::now();
    let discovery: Discovery = locator.locate(&cfg.hostname, &cfg.services).await;

    spinner::finish();
    report_discovery(&discovery, &cfg.hostname, start_time.elapsed());

    host_from(&discovery, prompt::ask_for_address)
}

/// Uses the detected address, or falls back to `ask` when nothing answered.
fn host_from(
    discovery: &Discovery,
    ask: impl FnOnce() -> anyhow::Result<HostAddress>,
) -> anyhow::Result<HostAddress> {
    match discovery.addr() {
        Some(ip) => Ok(HostAddress::Detected(ip)),
        None => {
            warn!("Could not auto-detect MCP VM. Please enter the IP manually:");
            ask()
        }
    }
}

fn report_discovery(discovery: &Discovery, hostname: &str, elapsed: Duration) {
    let elapsed: ColoredString = format!("{:.2}s", elapsed.as_secs_f64()).bold().yellow();
    match discovery {
        Discovery::Resolved(ip) => info!("{hostname} resolved to {ip}"),
        Discovery::Scanned(sock) => info!(
            "{} answered on port {} after {elapsed}",
            sock.ip(),
            sock.port()
        ),
        Discovery::NotFound => warn!("No host answered on any MCP port after {elapsed}"),
    }
}

fn print_services(statuses: &[ServiceStatus]) {
    let healthy: usize = statuses.iter().filter(|s| s.health.is_healthy()).count();
    print::tree_head(0, "Services");
    print::as_tree_one_level(statuses.iter().map(format::service_to_detail).collect());

    let summary: String = format!(
        "{} of {} services answered their health check",
        healthy.to_string().bold().green(),
        statuses.len().to_string().bold()
    );
    print::fat_separator();
    print::centerln(&format!("{}", summary.color(colors::TEXT_DEFAULT)));
    print::fat_separator();
}

fn print_targets(report: &SyncReport) {
    print::tree_head(1, "Config files");
    print::as_tree_one_level(
        report
            .outcomes
            .iter()
            .map(|o| format::target_to_detail(&o.target, o.result.is_ok()))
            .collect(),
    );
}

fn finish(report: SyncReport) -> anyhow::Result<()> {
    if report.is_success() {
        success!("{RESTART_HINT}");
        return Ok(());
    }

    let total: usize = report.outcomes.len();
    let failures: Vec<(String, anyhow::Error)> = report
        .outcomes
        .into_iter()
        .filter_map(|o| o.result.err().map(|e| (o.target.app, anyhow::Error::new(e))))
        .collect();
    for (app, err) in &failures {
        error!("{app}: {err:#}");
    }
    bail!("{} of {total} config files could not be updated", failures.len());
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
