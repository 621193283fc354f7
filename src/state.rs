//! Application state shared by the CLI surfaces: who is signed in, the
//! studio branding and the last workout list that was loaded.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::config::AccountConfig;
use crate::workout::Workout;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Viewer,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub user_id: String,
    pub name: String,
    pub role: Role,
}

impl UserSession {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("No user is signed in")]
    NotSignedIn,
}

#[derive(Debug, Default)]
pub struct AppState {
    user: Option<UserSession>,
    company_name: Option<String>,
    workouts: Vec<Workout>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the state the CLI runs with. Without a configured account the
    /// local user is signed in as a guest viewer.
    pub fn from_config(account: &AccountConfig) -> Self {
        let mut state = Self::new();
        state.sign_in(UserSession {
            user_id: account.user_id.clone().unwrap_or_else(|| "local".to_string()),
            name: account.name.clone().unwrap_or_else(|| "Guest".to_string()),
            role: account.role,
        });
        if let Some(company) = &account.company_name {
            state.set_company_name(company);
        }
        state
    }

    pub fn sign_in(&mut self, user: UserSession) {
        info!(user_id = %user.user_id, role = ?user.role, "User signed in");
        self.user = Some(user);
    }

    /// Clears the account and everything loaded on its behalf
    pub fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            info!(user_id = %user.user_id, "User signed out");
        }
        self.workouts.clear();
    }

    pub fn set_company_name(&mut self, name: &str) {
        let trimmed = name.trim();
        self.company_name = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    pub fn set_workouts(&mut self, workouts: Vec<Workout>) {
        self.workouts = workouts;
    }

    pub fn user(&self) -> Option<&UserSession> {
        self.user.as_ref()
    }

    pub fn company_name(&self) -> Option<&str> {
        self.company_name.as_deref()
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn require_signed_in(&self) -> Result<&UserSession, StateError> {
        self.user.as_ref().ok_or(StateError::NotSignedIn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> UserSession {
        UserSession {
            user_id: "u-1".to_string(),
            name: "Robin".to_string(),
            role: Role::Admin,
        }
    }

    #[test]
    fn test_sign_in_and_out() {
        let mut state = AppState::new();
        assert_eq!(state.require_signed_in(), Err(StateError::NotSignedIn));

        state.sign_in(admin());
        assert!(state.require_signed_in().unwrap().is_admin());

        state.set_workouts(vec![crate::workout::Workout {
            id: "w".to_string(),
            name: "W".to_string(),
            description: None,
            exercises: vec![],
        }]);
        state.sign_out();
        assert!(state.user().is_none());
        assert!(state.workouts().is_empty());
    }

    #[test]
    fn test_company_name_is_trimmed() {
        let mut state = AppState::new();
        state.set_company_name("  Iron Works ");
        assert_eq!(state.company_name(), Some("Iron Works"));
        state.set_company_name("   ");
        assert_eq!(state.company_name(), None);
    }

    #[test]
    fn test_from_config_defaults_to_guest_viewer() {
        let state = AppState::from_config(&AccountConfig::default());
        let user = state.require_signed_in().unwrap();
        assert_eq!(user.name, "Guest");
        assert_eq!(user.role, Role::Viewer);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    }
}
