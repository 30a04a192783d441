//! # Host Locator
//!
//! Finds the IPv4 address of the MCP VM.
//!
//! The hostname is resolved first. Only when that fails is the local /24
//! swept: host octets `.2` to `.254` in ascending order, every service port
//! in table order, stopping at the first port that accepts a connection.
//!
//! Every lookup or connect failure is treated as "try the next candidate".
//! Nothing in here returns an error; a fruitless run ends in
//! [`Discovery::NotFound`] and the caller decides what to do next.
//!
//! The three I/O seams ([`NameResolver`], [`Connector`], [`LocalAddress`])
//! are traits so the sweep can be driven without touching the network.

use std::fmt;
use std::net::{Ipv4Addr, SocketAddrV4};

use async_trait::async_trait;
use autoconf_common::config::Config;
use autoconf_common::network::range::Ipv4Range;
use autoconf_common::services::ServiceTable;
use tracing::debug;

use crate::network::tcp::TcpConnector;

mod local;
mod resolver;

pub use local::InterfaceAddress;
pub use resolver::SystemResolver;

/// Resolves a hostname to an IPv4 address.
#[async_trait]
pub trait NameResolver: Send + Sync {
    async fn resolve(&self, hostname: &str) -> Option<Ipv4Addr>;
}

/// Checks whether something accepts TCP connections at an address.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, addr: SocketAddrV4) -> bool;
}

/// Source of this machine's own IPv4 address.
pub trait LocalAddress: Send + Sync {
    fn local_ipv4(&self) -> Option<Ipv4Addr>;
}

/// Result of a locate run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discovery {
    /// The hostname resolved; no sweep was performed.
    Resolved(Ipv4Addr),
    /// The sweep found a host; carries the port that answered.
    Scanned(SocketAddrV4),
    NotFound,
}

impl Discovery {
    pub fn addr(&self) -> Option<Ipv4Addr> {
        match self {
            Discovery::Resolved(ip) => Some(*ip),
            Discovery::Scanned(sock) => Some(*sock.ip()),
            Discovery::NotFound => None,
        }
    }
}

/// Address the rest of the run talks to.
///
/// A manually entered address is kept verbatim; it is never validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostAddress {
    Detected(Ipv4Addr),
    Manual(String),
}

impl fmt::Display for HostAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostAddress::Detected(ip) => write!(f, "{ip}"),
            HostAddress::Manual(raw) => f.write_str(raw),
        }
    }
}

type CandidateCallback = Box<dyn Fn(Ipv4Addr) + Send + Sync>;

pub struct HostLocator<R, C, L> {
    resolver: R,
    connector: C,
    local: L,
    on_candidate: Option<CandidateCallback>,
}

impl HostLocator<SystemResolver, TcpConnector, InterfaceAddress> {
    /// Locator backed by the system resolver, real TCP connects and the
    /// machine's network interfaces.
    pub fn system(cfg: &Config) -> Self {
        Self::new(
            SystemResolver,
            TcpConnector::new(cfg.scan_timeout),
            InterfaceAddress,
        )
    }
}

impl<R, C, L> HostLocator<R, C, L>
where
    R: NameResolver,
    C: Connector,
    L: LocalAddress,
{
    pub fn new(resolver: R, connector: C, local: L) -> Self {
        Self {
            resolver,
            connector,
            local,
            on_candidate: None,
        }
    }

    /// Registers a callback invoked with each swept address before its
    /// ports are tried.
    pub fn on_candidate(mut self, callback: impl Fn(Ipv4Addr) + Send + Sync + 'static) -> Self {
        self.on_candidate = Some(Box::new(callback));
        self
    }

    pub async fn locate(&self, hostname: &str, services: &ServiceTable) -> Discovery {
        if let Some(ip) = self.resolver.resolve(hostname).await {
            debug!("{hostname} resolved to {ip}");
            return Discovery::Resolved(ip);
        }
        debug!("{hostname} did not resolve, sweeping the local subnet");

        let Some(local_ip) = self.local.local_ipv4() else {
            debug!("no local IPv4 address, skipping the sweep");
            return Discovery::NotFound;
        };

        match self.sweep(Ipv4Range::sweep(local_ip), services).await {
            Some(found) => Discovery::Scanned(found),
            None => Discovery::NotFound,
        }
    }

    /// Tries every candidate of `range` in order and returns the first
    /// address/port pair that accepts a connection.
    pub async fn sweep(&self, range: Ipv4Range, services: &ServiceTable) -> Option<SocketAddrV4> {
        let mut current: Option<Ipv4Addr> = None;

        for candidate in candidates(range, services) {
            if current != Some(*candidate.ip()) {
                current = Some(*candidate.ip());
                if let Some(callback) = &self.on_candidate {
                    callback(*candidate.ip());
                }
            }

            if self.connector.connect(candidate).await {
                debug!("{candidate} accepted a connection");
                return Some(candidate);
            }
        }
        None
    }
}

/// Lazy sequence of `(address, port)` pairs swept by the locator: each
/// address of `range` ascending, each service port in table order.
pub fn candidates<'a>(
    range: Ipv4Range,
    services: &'a ServiceTable,
) -> impl Iterator<Item = SocketAddrV4> + 'a {
    range
        .to_iter()
        .flat_map(move |ip| services.ports().map(move |port| SocketAddrV4::new(ip, port)))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
