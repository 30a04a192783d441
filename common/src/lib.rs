//! Shared building blocks for `mcp-autoconf`.
//!
//! * [`config`]: the compiled-in run configuration.
//! * [`services`]: the static service table.
//! * [`network`]: IPv4 sweep ranges and local interface lookup.

pub mod config;
pub mod macros;
pub mod network;
pub mod services;
