//! Consultation scheduling and lifecycle.

use std::sync::Arc;

use chrono::{Local, Utc};

use crate::error::{ClinicError, ClinicResult};
use crate::models::{Consultation, ConsultationPatch, NewConsultation};
use crate::storage::LocalStore;

use super::{load_raw, save_json};

const CONSULTATIONS_KEY: &str = "veterinaryConsultations";

/// Account id recorded when a consultation is scheduled with no session.
pub const FALLBACK_CREATED_BY: u32 = 1;

/// Persisted shape under the consultation key.
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConsultationsBlob {
    #[serde(default)]
    consultations: Vec<Consultation>,
    #[serde(default = "default_next_id")]
    next_id: u32,
}

fn default_next_id() -> u32 {
    1
}

/// Scheduled visits and the id counter they draw from.
///
/// Unlike the pet registry this one never seeds examples; a fresh or
/// unreadable store simply starts empty.
pub struct ConsultationRepository {
    store: Arc<LocalStore>,
    consultations: Vec<Consultation>,
    next_id: u32,
}

impl ConsultationRepository {
    pub fn open(store: Arc<LocalStore>) -> Self {
        let mut repo = Self {
            store,
            consultations: Vec::new(),
            next_id: 1,
        };
        repo.load();
        repo
    }

    fn load(&mut self) {
        let raw = match load_raw(&self.store, CONSULTATIONS_KEY) {
            Some(raw) => raw,
            None => return,
        };
        match serde_json::from_str::<ConsultationsBlob>(&raw) {
            Ok(blob) => {
                self.consultations = blob.consultations;
                self.next_id = blob.next_id.max(1);
            }
            Err(err) => log::warn!("ignoring unreadable consultation records: {}", err),
        }
    }

    fn persist(&self) {
        let blob = ConsultationsBlob {
            consultations: self.consultations.clone(),
            next_id: self.next_id,
        };
        save_json(&self.store, CONSULTATIONS_KEY, &blob);
    }

    fn take_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Validate and schedule a visit.
    ///
    /// `created_by` is the session account id; with no session open the
    /// record is attributed to [`FALLBACK_CREATED_BY`].
    pub fn create(
        &mut self,
        input: NewConsultation,
        created_by: Option<u32>,
    ) -> ClinicResult<Consultation> {
        input.validate(Local::now().naive_local())?;
        let consultation = Consultation::new(
            self.take_id(),
            input,
            created_by.unwrap_or(FALLBACK_CREATED_BY),
        );
        self.consultations.push(consultation.clone());
        self.persist();
        Ok(consultation)
    }

    /// Re-supply the scheduling fields and merge the rest.
    ///
    /// The id lookup runs before patch validation, so an unknown id
    /// reports not-found even when the patch is also incomplete.
    pub fn update(&mut self, id: u32, patch: ConsultationPatch) -> ClinicResult<Consultation> {
        let consultation = self
            .consultations
            .iter_mut()
            .find(|consultation| consultation.id == id)
            .ok_or_else(|| ClinicError::NotFound("Consulta no encontrada".to_string()))?;
        patch.validate()?;
        consultation.apply_patch(patch);
        let updated = consultation.clone();
        self.persist();
        Ok(updated)
    }

    /// Narrow update of only the status, or `None` if the id is unknown.
    pub fn set_status(&mut self, id: u32, status: &str) -> Option<Consultation> {
        let consultation = self
            .consultations
            .iter_mut()
            .find(|consultation| consultation.id == id)?;
        consultation.status = status.to_string();
        consultation.updated_at = Some(Utc::now().to_rfc3339());
        let updated = consultation.clone();
        self.persist();
        Some(updated)
    }

    /// True if a record was removed.
    pub fn delete(&mut self, id: u32) -> bool {
        let index = match self
            .consultations
            .iter()
            .position(|consultation| consultation.id == id)
        {
            Some(index) => index,
            None => return false,
        };
        self.consultations.remove(index);
        self.persist();
        true
    }

    /// Every consultation, in scheduling order.
    pub fn all(&self) -> &[Consultation] {
        &self.consultations
    }

    pub fn find_by_id(&self, id: u32) -> Option<&Consultation> {
        self.consultations
            .iter()
            .find(|consultation| consultation.id == id)
    }

    /// Next id the counter would hand out.
    pub fn next_id(&self) -> u32 {
        self.next_id
    }
}
