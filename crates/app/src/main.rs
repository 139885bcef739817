use clap::Parser;

use weide_app::{Cli, Command};
use weide_infra::{DairyStore, StoreConfig};

fn main() -> anyhow::Result<()> {
    weide_observability::init();

    let cli = Cli::parse();
    let config = StoreConfig::from_env();
    tracing::info!(user = %config.user, seed = config.seed, "starting");

    let mut store = DairyStore::bootstrap(config);
    let command = cli.command.unwrap_or(Command::Dashboard);
    let output = weide_app::run(&command, &mut store)?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
