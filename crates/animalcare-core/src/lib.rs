//! AnimalCare Core Library
//!
//! Local-first veterinary clinic management core: accounts, pets and
//! consultations over a single key-value store.
//!
//! # Architecture
//!
//! ```text
//!   Login / Register        Pet registration        Scheduling forms
//!          │                       │                       │
//!          ▼                       ▼                       ▼
//!  AccountRepository         PetRepository       ConsultationRepository
//!   list + session          list + counter          list + counter
//!          │                       │                       │
//!          └───────────────────────┼───────────────────────┘
//!                                  ▼
//!                      ┌───────────────────────┐
//!                      │  LocalStore (SQLite)  │
//!                      │  veterinaryUsers      │
//!                      │  currentUser          │
//!                      │  veterinarySystem     │
//!                      │  veterinaryConsults.  │
//!                      └───────────────────────┘
//! ```
//!
//! # Core Principle
//!
//! **Storage never gates the clinic.** Every mutation writes the whole list
//! back, but a failing store only logs; the in-memory state keeps serving.
//!
//! # Modules
//!
//! - [`storage`]: SQLite-backed key-value store
//! - [`models`]: Domain types (Account, Pet, Consultation, breed catalog)
//! - [`repo`]: Repositories owning the lists and their id counters
//! - [`permissions`]: Role capability table and hierarchy
//! - [`error`]: Validation and clinic error types

pub mod error;
pub mod models;
pub mod permissions;
pub mod repo;
pub mod storage;

// Re-export commonly used types
pub use error::{ClinicError, ClinicResult, ValidationError};
pub use models::{
    Account, Consultation, ConsultationPatch, FamilyType, NewAccount, NewConsultation, Pet,
    PetOptions, PetPatch,
};
pub use permissions::{Capabilities, Capability};
pub use repo::{
    AccountRepository, ConsultationRepository, PetFilters, PetRepository, PetStats,
    VaccinationFilter,
};
pub use storage::{LocalStore, StoreError, StoreResult};

use std::path::Path;
use std::sync::Arc;

// =========================================================================
// Factory Functions
// =========================================================================

/// Open or create a clinic over a database file at the given path.
pub fn open_clinic<P: AsRef<Path>>(path: P) -> StoreResult<Clinic> {
    Ok(Clinic::new(Arc::new(LocalStore::open(path)?)))
}

/// Clinic over an in-memory store (for testing).
pub fn open_clinic_in_memory() -> StoreResult<Clinic> {
    Ok(Clinic::new(Arc::new(LocalStore::open_in_memory()?)))
}

// =========================================================================
// Clinic Identity
// =========================================================================

/// Static identity of the installation, shown in the UI chrome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClinicInfo {
    pub name: String,
    pub version: String,
    pub clinic_name: String,
    pub clinic_address: String,
    pub clinic_phone: String,
}

impl Default for ClinicInfo {
    fn default() -> Self {
        Self {
            name: "Veterinaria AnimalCare".to_string(),
            version: "1.0.0".to_string(),
            clinic_name: "Clínica Veterinaria AnimalCare".to_string(),
            clinic_address: "Calle Principal 123".to_string(),
            clinic_phone: "300-123-4567".to_string(),
        }
    }
}

// =========================================================================
// Main API Object
// =========================================================================

/// Composition root wiring the repositories to one shared store.
///
/// Each repository is created on first access and then reused, so its
/// in-memory list and id counter stay consistent for the life of the
/// clinic. Nothing else constructs repositories.
pub struct Clinic {
    store: Arc<LocalStore>,
    info: ClinicInfo,
    accounts: Option<AccountRepository>,
    pets: Option<PetRepository>,
    consultations: Option<ConsultationRepository>,
}

impl Clinic {
    pub fn new(store: Arc<LocalStore>) -> Self {
        Self {
            store,
            info: ClinicInfo::default(),
            accounts: None,
            pets: None,
            consultations: None,
        }
    }

    /// Installation identity.
    pub fn info(&self) -> &ClinicInfo {
        &self.info
    }

    // =========================================================================
    // Repository Accessors
    // =========================================================================

    /// Account repository, loaded (and seeded if needed) on first access.
    pub fn accounts(&mut self) -> &mut AccountRepository {
        let store = Arc::clone(&self.store);
        self.accounts
            .get_or_insert_with(|| AccountRepository::open(store))
    }

    /// Pet repository, loaded (and seeded if needed) on first access.
    pub fn pets(&mut self) -> &mut PetRepository {
        let store = Arc::clone(&self.store);
        self.pets.get_or_insert_with(|| PetRepository::open(store))
    }

    /// Consultation repository, loaded on first access.
    pub fn consultations(&mut self) -> &mut ConsultationRepository {
        let store = Arc::clone(&self.store);
        self.consultations
            .get_or_insert_with(|| ConsultationRepository::open(store))
    }

    // =========================================================================
    // Cross-Repository Operations
    // =========================================================================

    /// Schedule a consultation attributed to the current session.
    ///
    /// With no session open the record falls back to the default account
    /// attribution.
    pub fn schedule_consultation(&mut self, input: NewConsultation) -> ClinicResult<Consultation> {
        let created_by = self.accounts().current_account().map(|account| account.id);
        self.consultations().create(input, created_by)
    }
}
