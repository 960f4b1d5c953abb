//! Account registry and session handling.

use std::sync::Arc;

use chrono::Utc;

use crate::error::{ClinicError, ClinicResult, ValidationError};
use crate::models::{is_legacy_veterinarian, Account, NewAccount, ROLE_USER, ROLE_VETERINARIAN};
use crate::permissions::{role_allows, role_at_least, Capability};
use crate::storage::LocalStore;

use super::save_json;

const USERS_KEY: &str = "veterinaryUsers";
const SESSION_KEY: &str = "currentUser";

/// Accounts plus the current session.
///
/// The session is a denormalized copy of the account at login time. It is
/// persisted separately under its own key and is not refreshed when the
/// account list changes, so a stale or legacy-role session stays stale
/// until the next login.
pub struct AccountRepository {
    store: Arc<LocalStore>,
    accounts: Vec<Account>,
    current: Option<Account>,
}

impl AccountRepository {
    /// Load the account list, seeding two demonstration accounts when the
    /// store has never held one.
    pub fn open(store: Arc<LocalStore>) -> Self {
        let mut repo = Self {
            store,
            accounts: Vec::new(),
            current: None,
        };
        repo.load_accounts();
        repo
    }

    fn load_accounts(&mut self) {
        let raw = match self.store.load(USERS_KEY) {
            Ok(Some(raw)) => raw,
            // First run: no list was ever persisted.
            Ok(None) => {
                self.seed_default_accounts();
                return;
            }
            Err(err) => {
                log::error!("failed to read {}: {}", USERS_KEY, err);
                return;
            }
        };
        match serde_json::from_str::<Vec<Account>>(&raw) {
            Ok(accounts) => {
                self.accounts = accounts;
                // Legacy roles normalize in memory only; the stored list
                // keeps the old value until something else persists it.
                for account in &mut self.accounts {
                    account.migrate_legacy_role();
                }
            }
            Err(err) => {
                log::warn!("discarding unreadable account list: {}", err);
                self.accounts = Vec::new();
            }
        }
    }

    fn seed_default_accounts(&mut self) {
        let stamp = Utc::now().to_rfc3339();
        self.accounts = vec![
            Account {
                id: 1,
                name: "Dr. García".into(),
                email: "dr.garcia@veterinaria.com".into(),
                password: "veterinario123".into(),
                role: ROLE_VETERINARIAN.into(),
                phone: "+57 300 000 0001".into(),
                created_at: stamp.clone(),
            },
            Account {
                id: 2,
                name: "Juan Pérez".into(),
                email: "juan@email.com".into(),
                password: "usuario123".into(),
                role: ROLE_USER.into(),
                phone: "+57 300 000 0002".into(),
                created_at: stamp,
            },
        ];
        self.persist_accounts();
    }

    fn persist_accounts(&self) {
        save_json(&self.store, USERS_KEY, &self.accounts);
    }

    /// Validate and append a new account.
    ///
    /// The duplicate-email check runs last, after the field validations,
    /// and compares case-insensitively against the stored list.
    pub fn register(&mut self, input: NewAccount) -> ClinicResult<Account> {
        input.validate()?;
        let email = input.email.trim().to_lowercase();
        if self
            .accounts
            .iter()
            .any(|account| account.email.to_lowercase() == email)
        {
            return Err(ValidationError::DuplicateEmail.into());
        }
        let id = self
            .accounts
            .iter()
            .map(|account| account.id)
            .max()
            .map_or(1, |max| max + 1);
        let account = Account::new(id, &input);
        self.accounts.push(account.clone());
        self.persist_accounts();
        Ok(account)
    }

    /// Match credentials and open a session.
    ///
    /// The requested role must equal the stored one, except that asking
    /// for "veterinarian" also matches accounts still carrying a legacy
    /// role value.
    pub fn authenticate(&mut self, email: &str, password: &str, role: &str) -> ClinicResult<Account> {
        let email = email.to_lowercase();
        let account = self
            .accounts
            .iter()
            .find(|account| {
                account.email == email
                    && account.password == password
                    && (account.role == role
                        || (role == ROLE_VETERINARIAN && is_legacy_veterinarian(&account.role)))
            })
            .cloned()
            .ok_or(ClinicError::InvalidCredentials)?;
        self.current = Some(account.clone());
        self.persist_session();
        Ok(account)
    }

    fn persist_session(&self) {
        if let Some(account) = &self.current {
            save_json(&self.store, SESSION_KEY, account);
        }
    }

    /// Clear the session, in memory and in the store.
    pub fn logout(&mut self) {
        self.current = None;
        if let Err(err) = self.store.remove(SESSION_KEY) {
            log::error!("failed to clear stored session: {}", err);
        }
    }

    /// The current session, rehydrating it from the store on first ask.
    ///
    /// A persisted session that no longer parses is removed and treated
    /// as logged out.
    pub fn current_account(&mut self) -> Option<&Account> {
        if self.current.is_none() {
            self.rehydrate_session();
        }
        self.current.as_ref()
    }

    fn rehydrate_session(&mut self) {
        let raw = match self.store.load(SESSION_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return,
            Err(err) => {
                log::error!("failed to read stored session: {}", err);
                return;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(account) => self.current = Some(account),
            Err(err) => {
                log::warn!("discarding corrupt stored session: {}", err);
                if let Err(err) = self.store.remove(SESSION_KEY) {
                    log::error!("failed to clear stored session: {}", err);
                }
            }
        }
    }

    /// Whether a session is held in memory right now. Does not consult
    /// the store.
    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }

    /// Capability check against the in-memory session only.
    ///
    /// Deliberately skips rehydration: with no session loaded this answers
    /// false even if the store still holds one.
    pub fn has_permission(&self, capability: Capability) -> bool {
        self.current
            .as_ref()
            .map_or(false, |account| role_allows(&account.role, capability))
    }

    /// Hierarchy check; unlike [`has_permission`](Self::has_permission)
    /// this one rehydrates the session first.
    pub fn has_role_at_least(&mut self, required: &str) -> bool {
        match self.current_account() {
            Some(account) => role_at_least(&account.role, required),
            None => false,
        }
    }

    /// Every known account, in storage order.
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }
}
