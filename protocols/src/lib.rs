//! Wire-level clients used by `mcp-autoconf`.

pub mod http;
