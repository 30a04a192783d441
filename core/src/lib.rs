//! # Host discovery and client config synchronization
//!
//! * [`locator`]: finds the MCP VM, by name first and by subnet sweep second.
//! * [`sync`]: probes the known services and rewrites the client config files.
//! * [`network`]: socket-level helpers shared by both.

pub mod locator;
pub mod network;
pub mod sync;
