//! # Config Synchronizer
//!
//! Turns a resolved VM address into `mcpServers` entries and writes them to
//! every client config file.
//!
//! Each service gets one `/health` request first. The outcome is reported to
//! the operator but never decides whether the service is written: the
//! server map always holds every service of the table.

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use autoconf_common::config::ConfigTarget;
use autoconf_common::services::{Service, ServiceTable};
use autoconf_common::success;
use autoconf_protocols::http::{Health, HealthClient};
use serde::Serialize;
use tracing::{error, warn};

pub mod document;

use document::DocumentError;

/// Service name to connection record, as written under `mcpServers`.
pub type ServerMap = BTreeMap<String, ConnectionRecord>;

/// `{"type": "http", "url": "http://<host>:<port>/"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

impl ConnectionRecord {
    pub fn http(host: &str, port: u16) -> Self {
        Self {
            kind: "http".to_string(),
            url: format!("http://{host}:{port}/"),
        }
    }
}

/// Liveness check for one service.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn probe(&self, host: &str, port: u16) -> Health;
}

#[async_trait]
impl HealthProbe for HealthClient {
    async fn probe(&self, host: &str, port: u16) -> Health {
        self.check(host, port).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceStatus {
    pub service: Service,
    pub health: Health,
    pub record: ConnectionRecord,
}

/// Connection records for every service of `services`, no probing.
pub fn build_server_map(host: &str, services: &ServiceTable) -> ServerMap {
    services
        .iter()
        .map(|s| (s.name.clone(), ConnectionRecord::http(host, s.port)))
        .collect()
}

pub fn server_map(statuses: &[ServiceStatus]) -> ServerMap {
    statuses
        .iter()
        .map(|status| (status.service.name.clone(), status.record.clone()))
        .collect()
}

#[derive(Debug)]
pub struct TargetOutcome {
    pub target: ConfigTarget,
    pub result: Result<(), DocumentError>,
}

/// Per-file results of one [`Synchronizer::apply`] run, in target order.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub outcomes: Vec<TargetOutcome>,
}

impl SyncReport {
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }

    pub fn updated(&self) -> impl Iterator<Item = &ConfigTarget> {
        self.outcomes
            .iter()
            .filter(|o| o.result.is_ok())
            .map(|o| &o.target)
    }

    pub fn failures(&self) -> impl Iterator<Item = (&ConfigTarget, &DocumentError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (&o.target, e)))
    }
}

pub struct Synchronizer<P> {
    probe: P,
}

impl<P: HealthProbe> Synchronizer<P> {
    pub fn new(probe: P) -> Self {
        Self { probe }
    }

    /// Probes every service in table order and builds its record.
    pub async fn check_services(&self, host: &str, services: &ServiceTable) -> Vec<ServiceStatus> {
        let mut statuses: Vec<ServiceStatus> = Vec::with_capacity(services.len());

        for service in services {
            let health: Health = self.probe.probe(host, service.port).await;
            match &health {
                Health::Healthy => {
                    success!("{} MCP detected on port {}", service.name, service.port)
                }
                _ => warn!(
                    "Warning: {} MCP not detected on port {} ({health})",
                    service.name, service.port
                ),
            }

            statuses.push(ServiceStatus {
                service: service.clone(),
                health,
                record: ConnectionRecord::http(host, service.port),
            });
        }
        statuses
    }

    /// Writes `servers` into every target. A failing target does not stop
    /// the ones after it.
    pub fn apply(&self, targets: &[ConfigTarget], servers: &ServerMap) -> SyncReport {
        let outcomes: Vec<TargetOutcome> = targets
            .iter()
            .map(|target| TargetOutcome {
                target: target.clone(),
                result: apply_one(&target.path, servers),
            })
            .collect();

        SyncReport { outcomes }
    }
}

fn apply_one(path: &Path, servers: &ServerMap) -> Result<(), DocumentError> {
    match document::update_config(path, servers) {
        Ok(()) => {
            success!("Updated {}", path.display());
            Ok(())
        }
        Err(e) => {
            error!("Could not update {}: {e}", path.display());
            Err(e)
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
