use std::net::{Ipv4Addr, SocketAddrV4};
use std::time::Duration;

use async_trait::async_trait;
use autoconf_common::network::range::Ipv4Range;
use autoconf_common::services::ServiceTable;
use autoconf_core::locator::{Discovery, HostLocator, LocalAddress, NameResolver, SystemResolver};
use autoconf_core::network::tcp::TcpConnector;

use crate::utils::{closed_port, silent_listener};

struct NoSuchHost;

#[async_trait]
impl NameResolver for NoSuchHost {
    async fn resolve(&self, _hostname: &str) -> Option<Ipv4Addr> {
        None
    }
}

struct NoLocalAddress;

impl LocalAddress for NoLocalAddress {
    fn local_ipv4(&self) -> Option<Ipv4Addr> {
        None
    }
}

fn connector() -> TcpConnector {
    TcpConnector::new(Duration::from_millis(500))
}

/// A literal address goes through the system resolver and wins over the sweep.
#[tokio::test]
async fn system_resolver_fast_path() {
    let locator = HostLocator::new(SystemResolver, connector(), NoLocalAddress);
    let services: ServiceTable = [("context7", closed_port().await)].into_iter().collect();

    let discovery = locator.locate("127.0.0.1", &services).await;

    assert_eq!(discovery, Discovery::Resolved(Ipv4Addr::LOCALHOST));
}

/// The sweep skips a closed port and stops at the listening one.
#[tokio::test]
async fn sweep_finds_listening_service_on_loopback() {
    let closed = closed_port().await;
    let open = silent_listener().await;
    let services: ServiceTable = [("context7", closed), ("desktop-commander", open)]
        .into_iter()
        .collect();
    let locator = HostLocator::new(NoSuchHost, connector(), NoLocalAddress);
    let range = Ipv4Range::new(Ipv4Addr::LOCALHOST, Ipv4Addr::LOCALHOST);

    let found = locator.sweep(range, &services).await;

    assert_eq!(found, Some(SocketAddrV4::new(Ipv4Addr::LOCALHOST, open)));
}

#[tokio::test]
async fn sweep_with_nothing_listening_is_none() {
    let services: ServiceTable = [("context7", closed_port().await)].into_iter().collect();
    let locator = HostLocator::new(NoSuchHost, connector(), NoLocalAddress);
    let range = Ipv4Range::new(Ipv4Addr::LOCALHOST, Ipv4Addr::LOCALHOST);

    assert_eq!(locator.sweep(range, &services).await, None);
}

#[tokio::test]
async fn unresolvable_host_without_local_address_is_not_found() {
    let locator = HostLocator::new(SystemResolver, connector(), NoLocalAddress);
    let discovery = locator
        .locate("mcp-server.invalid", &ServiceTable::builtin())
        .await;

    assert_eq!(discovery, Discovery::NotFound);
    assert_eq!(discovery.addr(), None);
}
