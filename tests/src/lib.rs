//! Cross-crate tests over real loopback sockets and temporary files.

#[cfg(test)]
mod discovery;
#[cfg(test)]
mod sync;
#[cfg(test)]
mod utils;
