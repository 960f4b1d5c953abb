//! Pet registry: record building, search and statistics.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::models::{FamilyType, Pet, PetOptions, PetPatch};
use crate::storage::LocalStore;

use super::{load_raw, save_json};

const PETS_KEY: &str = "veterinarySystem";

/// Persisted shape under the pet key: the full list plus the id counter.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PetsBlob {
    #[serde(default)]
    pets: Vec<Pet>,
    #[serde(default = "default_next_id")]
    next_id: u32,
}

fn default_next_id() -> u32 {
    1
}

/// Pet records and the id counter they draw from.
pub struct PetRepository {
    store: Arc<LocalStore>,
    pets: Vec<Pet>,
    next_id: u32,
}

impl PetRepository {
    /// Load persisted records, falling back to three example pets when the
    /// store holds nothing usable.
    pub fn open(store: Arc<LocalStore>) -> Self {
        let mut repo = Self {
            store,
            pets: Vec::new(),
            next_id: 1,
        };
        repo.load();
        repo
    }

    fn load(&mut self) {
        let raw = match load_raw(&self.store, PETS_KEY) {
            Some(raw) => raw,
            None => {
                self.seed_example_pets();
                return;
            }
        };
        match serde_json::from_str::<PetsBlob>(&raw) {
            Ok(blob) => {
                self.pets = blob.pets;
                self.next_id = blob.next_id.max(1);
            }
            Err(err) => {
                log::warn!("resetting unreadable pet records: {}", err);
                self.seed_example_pets();
            }
        }
    }

    fn seed_example_pets(&mut self) {
        let examples = [
            ("dog", "Max", 3, "Labrador Retriever", "Juan Pérez"),
            ("cat", "Luna", 2, "Persian", "María García"),
            ("bird", "Kiwi", 1, "Macaw", "Roberto Silva"),
        ];
        // Seeds run through the normal path so ids and derived labels
        // follow the same rules as user registrations.
        for (kind, name, age, breed, owner) in examples {
            let pet = self.create_record(kind, name, age, breed, owner);
            self.register(pet);
        }
    }

    fn persist(&self) {
        let blob = PetsBlob {
            pets: self.pets.clone(),
            next_id: self.next_id,
        };
        save_json(&self.store, PETS_KEY, &blob);
    }

    fn take_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Build a record without storing it.
    ///
    /// The id is consumed from the counter either way, so a discarded
    /// record leaves a gap in the sequence.
    pub fn create_record(&mut self, kind: &str, name: &str, age: u32, breed: &str, owner: &str) -> Pet {
        Pet::new(
            self.take_id(),
            kind.to_string(),
            name.to_string(),
            age,
            breed.to_string(),
            owner.to_string(),
        )
    }

    /// [`create_record`](Self::create_record) plus the optional contact
    /// and medical fields.
    pub fn build_record(
        &mut self,
        kind: &str,
        name: &str,
        age: u32,
        breed: &str,
        owner: &str,
        options: PetOptions,
    ) -> Pet {
        self.create_record(kind, name, age, breed, owner)
            .with_options(options)
    }

    /// Append a built record and persist the list.
    ///
    /// No validation happens here; callers are expected to have run it.
    pub fn register(&mut self, pet: Pet) -> Pet {
        self.pets.push(pet.clone());
        self.persist();
        pet
    }

    /// Copy an existing record under a new name and id.
    ///
    /// The copy keeps contacts and medical history but restarts clinic
    /// state: status, vaccination progress and the registration date are
    /// fresh.
    pub fn clone_record(&mut self, id: u32, new_name: &str) -> Option<Pet> {
        let original = self.find_by_id(id)?.clone();
        let copy = Pet::new(
            self.take_id(),
            original.kind,
            new_name.to_string(),
            original.age,
            original.breed,
            original.owner,
        )
        .with_options(PetOptions {
            phone: original.owner_phone,
            email: original.owner_email,
            emergency_contact: original.emergency_contact,
            allergies: Some(original.allergies),
            chronic_conditions: Some(original.chronic_conditions),
            vaccination_status: None,
        });
        Some(self.register(copy))
    }

    /// Every record, in registration order.
    pub fn all(&self) -> &[Pet] {
        &self.pets
    }

    pub fn find_by_id(&self, id: u32) -> Option<&Pet> {
        self.pets.iter().find(|pet| pet.id == id)
    }

    /// Case-insensitive substring match over name, breed, owner and the
    /// type label.
    pub fn search(&self, query: &str) -> Vec<Pet> {
        let query = query.to_lowercase();
        self.pets
            .iter()
            .filter(|pet| {
                pet.name.to_lowercase().contains(&query)
                    || pet.breed.to_lowercase().contains(&query)
                    || pet.owner.to_lowercase().contains(&query)
                    || pet.type_name.to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }

    /// Records satisfying every supplied filter.
    pub fn advanced_search(&self, filters: &PetFilters) -> Vec<Pet> {
        self.pets
            .iter()
            .filter(|pet| filters.matches(pet))
            .cloned()
            .collect()
    }

    /// Shallow-merge `patch` over the record, or `None` if the id is
    /// unknown.
    pub fn update(&mut self, id: u32, patch: PetPatch) -> Option<Pet> {
        let pet = self.pets.iter_mut().find(|pet| pet.id == id)?;
        pet.apply_patch(patch);
        let updated = pet.clone();
        self.persist();
        Some(updated)
    }

    /// Remove and hand back the record, or `None` if the id is unknown.
    pub fn delete(&mut self, id: u32) -> Option<Pet> {
        let index = self.pets.iter().position(|pet| pet.id == id)?;
        let removed = self.pets.remove(index);
        self.persist();
        Some(removed)
    }

    /// Fold the current list into counters for the dashboard.
    pub fn stats(&self) -> PetStats {
        let mut by_type = BTreeMap::new();
        let mut by_family = FamilyCounts::default();
        for pet in &self.pets {
            *by_type.entry(pet.type_name.clone()).or_insert(0) += 1;
            match pet.family_type {
                FamilyType::Domestic => by_family.domestic += 1,
                FamilyType::Exotic => by_family.exotic += 1,
            }
        }
        PetStats {
            total_pets: self.pets.len(),
            by_type,
            by_family,
            last_updated: Local::now().format("%d/%m/%Y %H:%M:%S").to_string(),
        }
    }

    /// Canonical breeds offered for an animal type.
    pub fn breeds_for_type(&self, kind: &str) -> &'static [&'static str] {
        crate::models::breeds_for_type(kind)
    }

    /// Traits associated with a pet family.
    pub fn family_characteristics(&self, family: FamilyType) -> &'static [&'static str] {
        crate::models::family_characteristics(family)
    }

    /// Next id the counter would hand out.
    pub fn next_id(&self) -> u32 {
        self.next_id
    }
}

/// Optional conjunctive filters for [`PetRepository::advanced_search`].
///
/// `None` and empty-string filters are simply not applied; a default
/// instance matches every record.
#[derive(Debug, Clone, Default)]
pub struct PetFilters {
    /// Substring of the pet name
    pub pet_name: Option<String>,
    /// Substring of the owner name
    pub owner: Option<String>,
    /// Exact match (case-insensitive) against the type label, e.g. "Perro"
    pub animal_type: Option<String>,
    /// Substring of the breed
    pub breed: Option<String>,
    pub min_age: Option<u32>,
    pub max_age: Option<u32>,
    /// Substring of the family key ("domestic"/"exotic")
    pub family: Option<String>,
    pub vaccination: VaccinationFilter,
}

/// Vaccination facet of [`PetFilters`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VaccinationFilter {
    #[default]
    All,
    Vaccinated,
    NotVaccinated,
}

fn applied(filter: &Option<String>) -> Option<&str> {
    filter.as_deref().filter(|text| !text.is_empty())
}

impl PetFilters {
    /// Whether `pet` satisfies every supplied filter.
    pub fn matches(&self, pet: &Pet) -> bool {
        if let Some(name) = applied(&self.pet_name) {
            if !pet.name.to_lowercase().contains(&name.to_lowercase()) {
                return false;
            }
        }
        if let Some(owner) = applied(&self.owner) {
            if !pet.owner.to_lowercase().contains(&owner.to_lowercase()) {
                return false;
            }
        }
        if let Some(animal_type) = applied(&self.animal_type) {
            if pet.type_name.to_lowercase() != animal_type.to_lowercase() {
                return false;
            }
        }
        if let Some(breed) = applied(&self.breed) {
            if !pet.breed.to_lowercase().contains(&breed.to_lowercase()) {
                return false;
            }
        }
        if let Some(min_age) = self.min_age {
            if pet.age < min_age {
                return false;
            }
        }
        if let Some(max_age) = self.max_age {
            if pet.age > max_age {
                return false;
            }
        }
        if let Some(family) = applied(&self.family) {
            if !pet.family_type.as_str().contains(&family.to_lowercase()) {
                return false;
            }
        }
        match self.vaccination {
            VaccinationFilter::All => {}
            VaccinationFilter::Vaccinated => {
                if !pet.is_vaccinated() {
                    return false;
                }
            }
            VaccinationFilter::NotVaccinated => {
                if pet.is_vaccinated() {
                    return false;
                }
            }
        }
        true
    }
}

/// Dashboard counters produced by [`PetRepository::stats`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetStats {
    pub total_pets: usize,
    /// Count per type label ("Perro", "Gato", ...)
    pub by_type: BTreeMap<String, usize>,
    pub by_family: FamilyCounts,
    /// Local wall-clock time of the fold, dd/mm/yyyy hh:mm:ss
    pub last_updated: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FamilyCounts {
    pub domestic: usize,
    pub exotic: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{VACCINATION_DONE, VACCINATION_PENDING};

    fn setup_store() -> Arc<LocalStore> {
        Arc::new(LocalStore::open_in_memory().unwrap())
    }

    fn setup_repo() -> PetRepository {
        PetRepository::open(setup_store())
    }

    #[test]
    fn test_seeds_three_example_pets_on_first_run() {
        let repo = setup_repo();
        let pets = repo.all();
        assert_eq!(pets.len(), 3);
        assert_eq!(pets[0].id, 1);
        assert_eq!(pets[0].name, "Max");
        assert_eq!(pets[0].type_name, "Perro");
        assert_eq!(pets[0].family_type, FamilyType::Domestic);
        assert_eq!(pets[2].name, "Kiwi");
        assert_eq!(pets[2].family_type, FamilyType::Exotic);
        assert_eq!(repo.next_id(), 4);
    }

    #[test]
    fn test_does_not_reseed_once_persisted() {
        let store = setup_store();
        let mut repo = PetRepository::open(Arc::clone(&store));
        let pet = repo.create_record("reptile", "Rango", 2, "Camaleón", "Sofía León");
        repo.register(pet);

        let repo = PetRepository::open(store);
        assert_eq!(repo.all().len(), 4);
        assert_eq!(repo.next_id(), 5);
    }

    #[test]
    fn test_corrupt_blob_reseeds_examples() {
        let store = setup_store();
        store.save("veterinarySystem", "!!not json!!").unwrap();

        let repo = PetRepository::open(Arc::clone(&store));
        assert_eq!(repo.all().len(), 3);

        // Seeding went through register, so the store is valid again.
        let repo = PetRepository::open(store);
        assert_eq!(repo.all().len(), 3);
        assert_eq!(repo.next_id(), 4);
    }

    #[test]
    fn test_create_record_consumes_ids_without_persisting() {
        let store = setup_store();
        let mut repo = PetRepository::open(Arc::clone(&store));
        let discarded = repo.create_record("dog", "Fantasma", 1, "Criollo", "Nadie");
        assert_eq!(discarded.id, 4);
        assert_eq!(repo.next_id(), 5);

        // The bumped counter is only written back by the next register.
        let repo = PetRepository::open(store);
        assert_eq!(repo.next_id(), 4);
    }

    #[test]
    fn test_build_record_round_trips_options() {
        let store = setup_store();
        let mut repo = PetRepository::open(Arc::clone(&store));
        let pet = repo.build_record(
            "cat",
            "Misu",
            5,
            "Sphynx",
            "Carla Moreno",
            PetOptions {
                phone: Some("301-444-5555".into()),
                allergies: Some(vec!["penicilina".into()]),
                vaccination_status: Some(VACCINATION_DONE.into()),
                ..Default::default()
            },
        );
        let id = repo.register(pet).id;

        let repo = PetRepository::open(store);
        let stored = repo.find_by_id(id).unwrap();
        assert_eq!(stored.owner_phone, Some("301-444-5555".into()));
        assert_eq!(stored.allergies, vec!["penicilina".to_string()]);
        assert!(stored.is_vaccinated());
    }

    #[test]
    fn test_search_matches_name_breed_owner_and_type_label() {
        let repo = setup_repo();
        assert_eq!(repo.search("perro").len(), 1);
        assert_eq!(repo.search("LUNA").len(), 1);
        assert_eq!(repo.search("silva").len(), 1);
        assert_eq!(repo.search("retriever").len(), 1);
        assert!(repo.search("dinosaurio").is_empty());
    }

    #[test]
    fn test_advanced_search_applies_filters_conjunctively() {
        let repo = setup_repo();

        let by_type = PetFilters {
            animal_type: Some("PERRO".into()),
            ..Default::default()
        };
        let found = repo.advanced_search(&by_type);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Max");

        // Owner matches Max but the name filter does not.
        let conflicting = PetFilters {
            owner: Some("juan".into()),
            pet_name: Some("luna".into()),
            ..Default::default()
        };
        assert!(repo.advanced_search(&conflicting).is_empty());
    }

    #[test]
    fn test_advanced_search_ignores_empty_filters() {
        let repo = setup_repo();
        let filters = PetFilters {
            pet_name: Some(String::new()),
            owner: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(repo.advanced_search(&filters).len(), 3);
        assert_eq!(repo.advanced_search(&PetFilters::default()).len(), 3);
    }

    #[test]
    fn test_advanced_search_age_range() {
        let repo = setup_repo();
        let filters = PetFilters {
            min_age: Some(2),
            max_age: Some(3),
            ..Default::default()
        };
        let found = repo.advanced_search(&filters);
        assert_eq!(found.len(), 2);

        // An inverted range can never be satisfied.
        let inverted = PetFilters {
            min_age: Some(5),
            max_age: Some(3),
            ..Default::default()
        };
        assert!(repo.advanced_search(&inverted).is_empty());
    }

    #[test]
    fn test_advanced_search_family_and_vaccination() {
        let mut repo = setup_repo();
        let family = PetFilters {
            family: Some("dom".into()),
            ..Default::default()
        };
        assert_eq!(repo.advanced_search(&family).len(), 2);

        let unvaccinated = PetFilters {
            vaccination: VaccinationFilter::NotVaccinated,
            ..Default::default()
        };
        assert_eq!(repo.advanced_search(&unvaccinated).len(), 3);

        repo.update(
            2,
            PetPatch {
                vaccination_status: Some(VACCINATION_DONE.into()),
                ..Default::default()
            },
        )
        .unwrap();

        let vaccinated = PetFilters {
            vaccination: VaccinationFilter::Vaccinated,
            ..Default::default()
        };
        let found = repo.advanced_search(&vaccinated);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Luna");
    }

    #[test]
    fn test_update_merges_and_persists() {
        let store = setup_store();
        let mut repo = PetRepository::open(Arc::clone(&store));
        let updated = repo
            .update(
                1,
                PetPatch {
                    age: Some(4),
                    owner_phone: Some("302-000-1111".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.age, 4);
        assert_eq!(updated.name, "Max");

        let repo = PetRepository::open(store);
        assert_eq!(repo.find_by_id(1).unwrap().age, 4);
    }

    #[test]
    fn test_update_unknown_id_returns_none() {
        let mut repo = setup_repo();
        assert!(repo.update(99, PetPatch::default()).is_none());
    }

    #[test]
    fn test_delete_returns_removed_record() {
        let mut repo = setup_repo();
        let removed = repo.delete(2).unwrap();
        assert_eq!(removed.name, "Luna");
        assert_eq!(repo.all().len(), 2);
        assert!(repo.find_by_id(2).is_none());
        assert!(repo.delete(2).is_none());
    }

    #[test]
    fn test_deleted_ids_are_not_reused() {
        let mut repo = setup_repo();
        repo.delete(3).unwrap();
        let pet = repo.create_record("dog", "Rocky", 1, "Boxer", "Elena Gil");
        assert_eq!(pet.id, 4);
    }

    #[test]
    fn test_clone_record_restarts_clinic_state() {
        let mut repo = setup_repo();
        repo.update(
            1,
            PetPatch {
                vaccination_status: Some(VACCINATION_DONE.into()),
                allergies: Some(vec!["polen".into()]),
                ..Default::default()
            },
        )
        .unwrap();

        let copy = repo.clone_record(1, "Max Jr").unwrap();
        assert_eq!(copy.id, 4);
        assert_eq!(copy.name, "Max Jr");
        assert_eq!(copy.breed, "Labrador Retriever");
        assert_eq!(copy.owner, "Juan Pérez");
        assert_eq!(copy.allergies, vec!["polen".to_string()]);
        // Clinic state restarts even though history is copied.
        assert_eq!(copy.vaccination_status, VACCINATION_PENDING);
        assert_eq!(repo.all().len(), 4);

        assert!(repo.clone_record(99, "Nadie").is_none());
    }

    #[test]
    fn test_stats_counts_types_and_families() {
        let repo = setup_repo();
        let stats = repo.stats();
        assert_eq!(stats.total_pets, 3);
        assert_eq!(stats.by_type.get("Perro"), Some(&1));
        assert_eq!(stats.by_type.get("Gato"), Some(&1));
        assert_eq!(stats.by_type.get("Ave"), Some(&1));
        assert_eq!(stats.by_family.domestic, 2);
        assert_eq!(stats.by_family.exotic, 1);
        assert!(!stats.last_updated.is_empty());
    }

    #[test]
    fn test_breed_catalog_delegation() {
        let repo = setup_repo();
        assert!(repo.breeds_for_type("dog").contains(&"Beagle"));
        assert_eq!(repo.breeds_for_type("fish"), ["Escribir manualmente"]);
        assert_eq!(repo.family_characteristics(FamilyType::Domestic).len(), 4);
    }
}
