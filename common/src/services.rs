//! # Service Table
//!
//! The fixed set of MCP services expected on the VM, keyed by name.
//!
//! Iteration order is the order services were inserted. The subnet sweep
//! tries ports in this order for every candidate host.

/// Built-in services and their TCP ports.
pub const BUILTIN_SERVICES: &[(&str, u16)] = &[("context7", 7001), ("desktop-commander", 7002)];

/// A single named service listening on a fixed port.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Service {
    pub name: String,
    pub port: u16,
}

impl Service {
    pub fn new(name: impl Into<String>, port: u16) -> Self {
        Self {
            name: name.into(),
            port,
        }
    }
}

/// Ordered mapping from service name to port with unique names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceTable {
    services: Vec<Service>,
}

impl ServiceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The table compiled into the binary.
    pub fn builtin() -> Self {
        BUILTIN_SERVICES.iter().copied().collect()
    }

    /// Adds a service. An existing entry with the same name keeps its
    /// position and takes the new port.
    pub fn insert(&mut self, name: impl Into<String>, port: u16) {
        let name: String = name.into();
        match self.services.iter_mut().find(|s| s.name == name) {
            Some(existing) => existing.port = port,
            None => self.services.push(Service::new(name, port)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Service> {
        self.services.iter()
    }

    pub fn ports(&self) -> impl Iterator<Item = u16> + '_ {
        self.services.iter().map(|s| s.port)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u16)> for ServiceTable {
    fn from_iter<I: IntoIterator<Item = (S, u16)>>(iter: I) -> Self {
        let mut table = ServiceTable::new();
        for (name, port) in iter {
            table.insert(name, port);
        }
        table
    }
}

impl<'a> IntoIterator for &'a ServiceTable {
    type Item = &'a Service;
    type IntoIter = std::slice::Iter<'a, Service>;

    fn into_iter(self) -> Self::IntoIter {
        self.services.iter()
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
