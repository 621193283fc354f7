use anyhow::Result;
use clap::Parser;

use gymflow::cli::commands::{
    config::ConfigCommand, list::ListCommand, run::RunCommand, show::ShowCommand,
    show_how_to_get_work, Command,
};
use gymflow::cli::{Cli, Commands};
use gymflow::config::{config, init_config, GymflowConfig};
use gymflow::telemetry::{init_telemetry, shutdown_telemetry};

fn main() -> Result<()> {
    let cli = Cli::parse();

    GymflowConfig::load_env_file()?;
    init_config()?;
    init_telemetry(&config()?.observability)?;

    let result = match cli.command {
        None => tokio::runtime::Runtime::new()?.block_on(show_how_to_get_work()),
        Some(Commands::List { dir }) => {
            tokio::runtime::Runtime::new()?.block_on(async { ListCommand::new(dir).execute().await })
        }
        Some(Commands::Show { id, dir }) => tokio::runtime::Runtime::new()?
            .block_on(async { ShowCommand::new(id, dir).execute().await }),
        Some(Commands::Run {
            id,
            dir,
            countdown,
            tick_ms,
            json,
        }) => tokio::runtime::Runtime::new()?.block_on(async {
            RunCommand::new(id, dir)
                .with_countdown(countdown)
                .with_tick_ms(tick_ms)
                .with_json(json)
                .execute()
                .await
        }),
        Some(Commands::Config) => {
            tokio::runtime::Runtime::new()?.block_on(async { ConfigCommand.execute().await })
        }
    };

    shutdown_telemetry();
    result
}
