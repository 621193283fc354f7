use anyhow::Result;

use super::Command;
use crate::config::config;

pub struct ConfigCommand;

impl Command for ConfigCommand {
    async fn execute(&self) -> Result<()> {
        let mut effective = config()?.clone();
        if effective.api.token.is_some() {
            effective.api.token = Some("********".to_string());
        }
        print!("{}", toml::to_string_pretty(&effective)?);
        Ok(())
    }
}
