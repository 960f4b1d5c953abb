//! Account model and registration input.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Role granting every clinic capability.
pub const ROLE_VETERINARIAN: &str = "veterinarian";
/// Role limited to registering pets.
pub const ROLE_USER: &str = "user";

/// Role values written by earlier releases that now mean veterinarian.
pub const LEGACY_VETERINARIAN_ROLES: &[&str] = &["employee", "admin"];

/// True when `role` is a pre-migration synonym for veterinarian.
pub fn is_legacy_veterinarian(role: &str) -> bool {
    LEGACY_VETERINARIAN_ROLES.contains(&role)
}

/// A registered clinic user.
///
/// `role` is an open string domain: the canonical values are
/// [`ROLE_VETERINARIAN`] and [`ROLE_USER`], but stored data may still carry
/// legacy synonyms, and registration accepts whatever the form sends.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Sequential id, unique within the account list
    pub id: u32,
    /// Full name (first and last), trimmed
    pub name: String,
    /// Lower-cased, trimmed; unique case-insensitively
    pub email: String,
    /// Stored as given, no hashing
    pub password: String,
    /// Role string keyed into the permission tables
    pub role: String,
    /// Contact phone, trimmed
    pub phone: String,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

impl Account {
    /// Build an account from validated registration input, normalizing the
    /// email and trimming the free-text fields.
    pub fn new(id: u32, input: &NewAccount) -> Self {
        Self {
            id,
            name: input.name.trim().to_string(),
            email: input.email.trim().to_lowercase(),
            password: input.password.clone(),
            role: input.role.clone(),
            phone: input.phone.trim().to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Rewrite a legacy role synonym to "veterinarian".
    ///
    /// Applied to the in-memory view on every load. Loading never writes
    /// back, so the stored value keeps the legacy role until a later
    /// mutation persists the whole list.
    pub fn migrate_legacy_role(&mut self) {
        if is_legacy_veterinarian(&self.role) {
            self.role = ROLE_VETERINARIAN.to_string();
        }
    }
}

/// Raw registration input, exactly as collected by the sign-up form.
#[derive(Debug, Clone, Default)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: String,
    pub phone: String,
}

impl NewAccount {
    /// Field-level validation, in the order the form reports problems.
    /// Email uniqueness is checked by the repository against its list.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty()
            || self.email.is_empty()
            || self.password.is_empty()
            || self.role.is_empty()
            || self.phone.is_empty()
        {
            return Err(ValidationError::MissingFields);
        }
        if self.name.split_whitespace().count() < 2 {
            return Err(ValidationError::NameNeedsSurname);
        }
        if self.password.chars().count() < 6 {
            return Err(ValidationError::PasswordTooShort);
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        if !self.phone.chars().any(|c| c.is_ascii_digit()) {
            return Err(ValidationError::PhoneWithoutDigits);
        }
        Ok(())
    }
}
