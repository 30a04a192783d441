use std::net::{IpAddr, Ipv4Addr, UdpSocket};

use pnet::datalink::NetworkInterface;
use pnet::ipnetwork::IpNetwork;

/// Any routable address works; no packet is sent when "connecting" a UDP socket.
const ROUTE_PROBE_ADDR: (Ipv4Addr, u16) = (Ipv4Addr::new(192, 0, 2, 1), 9);

/// Returns this machine's own IPv4 address on the LAN.
///
/// Interfaces are inspected first. When none qualifies, the address the OS
/// picks for an outbound route is used instead.
pub fn local_ipv4() -> Option<Ipv4Addr> {
    let interfaces: Vec<NetworkInterface> = pnet::datalink::interfaces();
    select_local_ipv4(&interfaces).or_else(routed_ipv4)
}

/// Name prefixes of bridges, tunnels and other virtual links that never
/// carry the LAN the VM sits on.
const VIRTUAL_PREFIXES: &[&str] = &[
    "docker", "br-", "virbr", "veth", "vmnet", "vboxnet", "lxc", "lxd", "cni", "flannel",
    "tun", "tap", "utun", "wg", "zt", "tailscale", "ppp",
];

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ViabilityError {
    /// The interface is operationally down.
    IsDown,
    IsLoopback,
    /// Bridge, tunnel or other virtual link, judged by name.
    NotPhysical,
    NoMacAddress,
    /// No broadcast support, so not an Ethernet-like LAN.
    NotBroadcast,
    /// Point-to-point link, typically a VPN.
    IsPointToPoint,
    NoIpv4,
}

/// Checks that `interface` looks like a real LAN card.
pub fn is_viable_lan_interface(interface: &NetworkInterface) -> Result<(), ViabilityError> {
    if !interface.is_up() {
        return Err(ViabilityError::IsDown);
    }
    if interface.is_loopback() {
        return Err(ViabilityError::IsLoopback);
    }
    if !is_physical(interface) {
        return Err(ViabilityError::NotPhysical);
    }
    if interface.mac.is_none() {
        return Err(ViabilityError::NoMacAddress);
    }
    if !interface.is_broadcast() {
        return Err(ViabilityError::NotBroadcast);
    }
    if interface.is_point_to_point() {
        return Err(ViabilityError::IsPointToPoint);
    }
    if usable_ipv4(interface).next().is_none() {
        return Err(ViabilityError::NoIpv4);
    }
    Ok(())
}

fn is_physical(interface: &NetworkInterface) -> bool {
    let name: String = interface.name.to_ascii_lowercase();
    !VIRTUAL_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
}

fn usable_ipv4(interface: &NetworkInterface) -> impl Iterator<Item = Ipv4Addr> + '_ {
    interface.ips.iter().filter_map(|net| match net {
        IpNetwork::V4(v4) if !v4.ip().is_loopback() && !v4.ip().is_link_local() => Some(v4.ip()),
        _ => None,
    })
}

/// Picks the LAN IPv4 among the viable `interfaces`, private addresses
/// preferred over any other IPv4.
pub fn select_local_ipv4(interfaces: &[NetworkInterface]) -> Option<Ipv4Addr> {
    let candidates: Vec<Ipv4Addr> = interfaces
        .iter()
        .filter(|i| is_viable_lan_interface(i).is_ok())
        .flat_map(usable_ipv4)
        .collect();

    candidates
        .iter()
        .find(|ip| ip.is_private())
        .or(candidates.first())
        .copied()
}

fn routed_ipv4() -> Option<Ipv4Addr> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).ok()?;
    socket.connect(ROUTE_PROBE_ADDR).ok()?;
    match socket.local_addr().ok()?.ip() {
        IpAddr::V4(ip) if !ip.is_unspecified() && !ip.is_loopback() => Some(ip),
        _ => None,
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
