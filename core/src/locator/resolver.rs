use std::net::{Ipv4Addr, SocketAddr};

use async_trait::async_trait;
use tokio::net::lookup_host;
use tracing::debug;

use super::NameResolver;

/// Standard system hostname lookup, IPv4 answers only.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

#[async_trait]
impl NameResolver for SystemResolver {
    async fn resolve(&self, hostname: &str) -> Option<Ipv4Addr> {
        let addrs = match lookup_host((hostname, 0)).await {
            Ok(addrs) => addrs,
            Err(e) => {
                debug!("lookup of {hostname} failed: {e}");
                return None;
            }
        };

        addrs.into_iter().find_map(|addr| match addr {
            SocketAddr::V4(v4) => Some(*v4.ip()),
            SocketAddr::V6(_) => None,
        })
    }
}
