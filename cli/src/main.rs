mod commands;
mod terminal;

use autoconf_common::config::Config;
use commands::{CommandLine, configure};
use terminal::{logging, print};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _commands = CommandLine::parse_args();

    logging::init();
    print::banner();

    let cfg: Config = Config::from_system()?;
    configure::configure(&cfg).await?;

    print::end_of_program();
    Ok(())
}
