//! Process-wide user session.
//!
//! A [`Session`] is created once at startup and handed by reference to every
//! component that needs to know who is signed in. It owns the saved-location
//! membership list for the signed-in user; network calls that back login,
//! registration, and saving live outside this crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum accepted password length at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("please fill in all fields")]
    MissingFields,

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("please login to save locations")]
    AuthenticationRequired,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Request to send to the save endpoint for a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveAction {
    /// `POST /locations/save`
    Save,
    /// `DELETE /locations/save`
    Unsave,
}

#[derive(Debug, Default)]
pub struct Session {
    user: Option<User>,
    signed_in_at: Option<DateTime<Utc>>,
    saved: Vec<String>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub fn signed_in_at(&self) -> Option<DateTime<Utc>> {
        self.signed_in_at
    }

    /// Greeting name for the home screen; empty when signed out or unnamed.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.user
            .as_ref()
            .and_then(|u| u.name.as_deref())
            .unwrap_or_default()
    }

    /// Records a successful login or registration.
    pub fn sign_in(&mut self, user: User) {
        self.user = Some(user);
        self.signed_in_at = Some(Utc::now());
        self.saved.clear();
    }

    /// Drops the user and everything tied to them.
    pub fn sign_out(&mut self) {
        self.user = None;
        self.signed_in_at = None;
        self.saved.clear();
    }

    /// Replaces the saved-location list with a freshly fetched one.
    ///
    /// Ignored while signed out so a late response cannot resurrect state.
    pub fn set_saved<I>(&mut self, location_ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        if self.user.is_none() {
            return;
        }
        self.saved = location_ids.into_iter().collect();
    }

    #[must_use]
    pub fn saved(&self) -> &[String] {
        &self.saved
    }

    #[must_use]
    pub fn is_saved(&self, location_id: &str) -> bool {
        self.saved.iter().any(|id| id == location_id)
    }

    /// Decides which save request toggles `location_id`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::AuthenticationRequired`] when nobody is signed in.
    pub fn toggle_action(&self, location_id: &str) -> Result<SaveAction, SessionError> {
        if self.user.is_none() {
            return Err(SessionError::AuthenticationRequired);
        }
        Ok(if self.is_saved(location_id) {
            SaveAction::Unsave
        } else {
            SaveAction::Save
        })
    }

    /// Applies a save request that the backend accepted. Ignored while
    /// signed out.
    pub fn apply_save(&mut self, location_id: &str, action: SaveAction) {
        if self.user.is_none() {
            return;
        }
        match action {
            SaveAction::Save => {
                if !self.is_saved(location_id) {
                    self.saved.push(location_id.to_string());
                }
            }
            SaveAction::Unsave => self.saved.retain(|id| id != location_id),
        }
    }
}

/// Checks the login form before any request is made.
///
/// # Errors
///
/// Returns [`SessionError::MissingFields`] if either field is blank.
pub fn validate_login(email: &str, password: &str) -> Result<(), SessionError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(SessionError::MissingFields);
    }
    Ok(())
}

/// Checks the registration form before any request is made.
///
/// # Errors
///
/// Returns the first failing rule: missing fields, mismatched confirmation,
/// then password length.
pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), SessionError> {
    if name.trim().is_empty()
        || email.trim().is_empty()
        || password.is_empty()
        || confirm_password.is_empty()
    {
        return Err(SessionError::MissingFields);
    }
    if password != confirm_password {
        return Err(SessionError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(SessionError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}
