use anyhow::Result;
use std::path::PathBuf;

use super::{load_all_workouts, workout_source, Command};
use crate::config::config;
use crate::display::render_workout_list;
use crate::state::AppState;

pub struct ListCommand {
    pub dir: Option<PathBuf>,
}

impl ListCommand {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }
}

impl Command for ListCommand {
    async fn execute(&self) -> Result<()> {
        let config = config()?;
        let mut state = AppState::from_config(&config.account);
        state.require_signed_in()?;

        let source = workout_source(self.dir.as_deref(), &config.api)?;
        let workouts = load_all_workouts(source.as_ref()).await?;
        state.set_workouts(workouts);

        println!("{}", render_workout_list(state.workouts(), state.company_name()));
        Ok(())
    }
}
