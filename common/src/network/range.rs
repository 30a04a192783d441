use std::net::Ipv4Addr;

/// First host octet tried by the subnet sweep. `.0` is the network and `.1`
/// is usually the gateway.
pub const SWEEP_FIRST_OCTET: u8 = 2;
/// Last host octet tried by the subnet sweep. `.255` is the broadcast.
pub const SWEEP_LAST_OCTET: u8 = 254;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    /// Candidate hosts of the /24 that `local` belongs to, `.2` through `.254`.
    pub fn sweep(local: Ipv4Addr) -> Self {
        let [a, b, c, _] = local.octets();
        Self::new(
            Ipv4Addr::new(a, b, c, SWEEP_FIRST_OCTET),
            Ipv4Addr::new(a, b, c, SWEEP_LAST_OCTET),
        )
    }

    /// Addresses in ascending order, both ends included.
    pub fn to_iter(&self) -> impl Iterator<Item = Ipv4Addr> + use<> {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        (start..=end).map(Ipv4Addr::from)
    }

    pub fn len(&self) -> usize {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        if end < start {
            0
        } else {
            (end - start) as usize + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_covers_host_octets_two_to_254() {
        let range = Ipv4Range::sweep(Ipv4Addr::new(192, 168, 1, 42));
        let addrs: Vec<Ipv4Addr> = range.to_iter().collect();

        assert_eq!(addrs.len(), 253);
        assert_eq!(range.len(), 253);
        assert_eq!(addrs.first(), Some(&Ipv4Addr::new(192, 168, 1, 2)));
        assert_eq!(addrs.last(), Some(&Ipv4Addr::new(192, 168, 1, 254)));
        assert!(addrs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn sweep_ignores_local_host_octet() {
        let low = Ipv4Range::sweep(Ipv4Addr::new(10, 0, 0, 1));
        let high = Ipv4Range::sweep(Ipv4Addr::new(10, 0, 0, 250));
        assert_eq!(low, high);
    }

    #[test]
    fn inverted_range_is_empty() {
        let range = Ipv4Range::new(Ipv4Addr::new(10, 0, 0, 9), Ipv4Addr::new(10, 0, 0, 1));
        assert!(range.is_empty());
        assert_eq!(range.to_iter().count(), 0);
    }
}
