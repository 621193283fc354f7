use anyhow::{Context, Result};
use std::path::PathBuf;

use super::{workout_source, Command};
use crate::config::config;
use crate::display::render_workout;
use crate::workout::load_workout;

pub struct ShowCommand {
    pub id: String,
    pub dir: Option<PathBuf>,
}

impl ShowCommand {
    pub fn new(id: String, dir: Option<PathBuf>) -> Self {
        Self { id, dir }
    }
}

impl Command for ShowCommand {
    async fn execute(&self) -> Result<()> {
        let config = config()?;
        let source = workout_source(self.dir.as_deref(), &config.api)?;
        let workout = load_workout(source.as_ref(), &self.id)
            .await
            .with_context(|| format!("Failed to load workout '{}'", self.id))?;

        println!("{}", render_workout(&workout));
        Ok(())
    }
}
