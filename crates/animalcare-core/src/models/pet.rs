//! Pet model, builder options and update patch.

use serde::{Deserialize, Serialize};

use super::catalog;

/// Status given to every newly registered pet.
pub const STATUS_ACTIVE: &str = "Activo";
/// Vaccination status until the clinic records a vaccine.
pub const VACCINATION_PENDING: &str = "Pendiente";
/// Vaccination status once the schedule is complete.
pub const VACCINATION_DONE: &str = "Vacunado";

/// Pet family, derived from the animal type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FamilyType {
    Domestic,
    Exotic,
}

impl FamilyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FamilyType::Domestic => "domestic",
            FamilyType::Exotic => "exotic",
        }
    }
}

/// A registered animal.
///
/// `kind` is the machine key ("dog", "cat", ...); `type_name` and
/// `family_type` are derived from it at construction and stored
/// denormalized, exactly as the registration form displays them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    /// Sequential id from the pet repository's own counter
    pub id: u32,
    /// Pet name
    pub name: String,
    /// Age in years
    pub age: u32,
    /// Breed, free text or a catalog entry
    pub breed: String,
    /// Animal type key; unknown values are allowed and get generic labels
    #[serde(rename = "type")]
    pub kind: String,
    /// Display label derived from `kind`
    pub type_name: String,
    /// Owner name, free text (not linked to an account)
    pub owner: String,
    /// Derived family classification
    pub family_type: FamilyType,
    /// Registration timestamp (RFC 3339)
    pub registration_date: String,
    /// Clinic status, defaults to "Activo"
    pub status: String,
    /// Vaccination progress, defaults to "Pendiente"
    pub vaccination_status: String,
    /// Known allergies
    pub allergies: Vec<String>,
    /// Chronic conditions under treatment
    pub chronic_conditions: Vec<String>,
    /// Owner contact phone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_phone: Option<String>,
    /// Owner contact email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_email: Option<String>,
    /// Emergency contact, free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
}

impl Pet {
    /// Build a record with derived labels and default medical state.
    pub fn new(id: u32, kind: String, name: String, age: u32, breed: String, owner: String) -> Self {
        let type_name = catalog::type_display_name(&kind).to_string();
        let family_type = catalog::family_for_type(&kind);
        Self {
            id,
            name,
            age,
            breed,
            kind,
            type_name,
            owner,
            family_type,
            registration_date: chrono::Utc::now().to_rfc3339(),
            status: STATUS_ACTIVE.to_string(),
            vaccination_status: VACCINATION_PENDING.to_string(),
            allergies: Vec::new(),
            chronic_conditions: Vec::new(),
            owner_phone: None,
            owner_email: None,
            emergency_contact: None,
        }
    }

    /// Merge the optional builder fields. Absent options keep defaults.
    pub fn with_options(mut self, options: PetOptions) -> Self {
        if let Some(phone) = options.phone {
            self.owner_phone = Some(phone);
        }
        if let Some(email) = options.email {
            self.owner_email = Some(email);
        }
        if let Some(contact) = options.emergency_contact {
            self.emergency_contact = Some(contact);
        }
        if let Some(allergies) = options.allergies {
            self.allergies = allergies;
        }
        if let Some(conditions) = options.chronic_conditions {
            self.chronic_conditions = conditions;
        }
        if let Some(vaccination) = options.vaccination_status {
            self.vaccination_status = vaccination;
        }
        self
    }

    /// Overwrite the fields the patch supplies; `None` fields are untouched.
    pub fn apply_patch(&mut self, patch: PetPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
        if let Some(breed) = patch.breed {
            self.breed = breed;
        }
        if let Some(owner) = patch.owner {
            self.owner = owner;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(vaccination) = patch.vaccination_status {
            self.vaccination_status = vaccination;
        }
        if let Some(allergies) = patch.allergies {
            self.allergies = allergies;
        }
        if let Some(conditions) = patch.chronic_conditions {
            self.chronic_conditions = conditions;
        }
        if let Some(phone) = patch.owner_phone {
            self.owner_phone = Some(phone);
        }
        if let Some(email) = patch.owner_email {
            self.owner_email = Some(email);
        }
        if let Some(contact) = patch.emergency_contact {
            self.emergency_contact = Some(contact);
        }
    }

    /// True once the vaccination schedule is recorded complete.
    pub fn is_vaccinated(&self) -> bool {
        self.vaccination_status == VACCINATION_DONE
    }
}

/// Optional contact and medical fields accepted by the record builder.
#[derive(Debug, Clone, Default)]
pub struct PetOptions {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub emergency_contact: Option<String>,
    pub allergies: Option<Vec<String>>,
    pub chronic_conditions: Option<Vec<String>>,
    pub vaccination_status: Option<String>,
}

/// Field-by-field pet update.
///
/// A `Some` value overwrites the stored field, an empty string included;
/// `None` leaves it alone. The derived trio (`kind`, `type_name`,
/// `family_type`) is not patchable so the labels stay consistent.
#[derive(Debug, Clone, Default)]
pub struct PetPatch {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub breed: Option<String>,
    pub owner: Option<String>,
    pub status: Option<String>,
    pub vaccination_status: Option<String>,
    pub allergies: Option<Vec<String>>,
    pub chronic_conditions: Option<Vec<String>>,
    pub owner_phone: Option<String>,
    pub owner_email: Option<String>,
    pub emergency_contact: Option<String>,
}
