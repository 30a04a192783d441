use std::net::Ipv4Addr;

use autoconf_common::network::interface;

use super::LocalAddress;

/// Reads the machine's own IPv4 address from its network interfaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterfaceAddress;

impl LocalAddress for InterfaceAddress {
    fn local_ipv4(&self) -> Option<Ipv4Addr> {
        interface::local_ipv4()
    }
}
