use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICK_INTERVAL: Duration = Duration::from_millis(100);
const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

static SPINNER: OnceLock<ProgressBar> = OnceLock::new();

fn init_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(TICKS);

    pb.set_style(style);
    pb.enable_steady_tick(TICK_INTERVAL);
    pb
}

/// Shows the spinner with `message`. Only the first call creates it.
pub fn start(message: impl Into<String>) {
    let pb: &ProgressBar = SPINNER.get_or_init(init_spinner);
    pb.set_message(message.into());
}

pub fn set_message(message: impl Into<String>) {
    if let Some(pb) = SPINNER.get() {
        pb.set_message(message.into());
    }
}

pub fn finish() {
    if let Some(pb) = SPINNER.get() {
        pb.finish_and_clear();
    }
}

/// Log sink that keeps lines from tearing through the spinner.
pub struct SpinnerWriter;

impl Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match SPINNER.get() {
            Some(pb) => pb.suspend(|| io::stdout().write_all(buf))?,
            None => io::stdout().write_all(buf)?,
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}
