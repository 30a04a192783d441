use std::io::{self, BufRead, Write};

use anyhow::{Context, bail};
use autoconf_core::locator::HostAddress;
use colored::*;

use crate::terminal::colors;

const PROMPT: &str = "VM IP: ";

/// Asks the operator for the VM address on standard input.
///
/// The answer is trimmed and used as typed.
pub fn ask_for_address() -> anyhow::Result<HostAddress> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    read_address(&mut stdin.lock(), &mut stdout)
}

fn read_address<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> anyhow::Result<HostAddress> {
    write!(output, "{}", PROMPT.color(colors::PRIMARY)).context("failed to write the prompt")?;
    output.flush().context("failed to write the prompt")?;

    let mut line: String = String::new();
    let read: usize = input
        .read_line(&mut line)
        .context("failed to read the VM address")?;
    if read == 0 {
        bail!("standard input closed before a VM address was entered");
    }

    Ok(HostAddress::Manual(line.trim().to_string()))
}
