//! Consultation records, scheduling input and field-level updates.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Initial status for every consultation.
pub const STATUS_SCHEDULED: &str = "scheduled";
pub const STATUS_CONFIRMED: &str = "confirmed";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_CANCELLED: &str = "cancelled";

pub const PRIORITY_LOW: &str = "low";
/// Default priority when the scheduling form leaves it blank.
pub const PRIORITY_NORMAL: &str = "normal";
pub const PRIORITY_HIGH: &str = "high";
pub const PRIORITY_URGENT: &str = "urgent";

/// Spanish label for a status key.
///
/// Unknown statuses come back verbatim; an empty status reads as the
/// initial "scheduled" key.
pub fn status_display_name(status: &str) -> &str {
    match status {
        STATUS_SCHEDULED => "Programada",
        STATUS_CONFIRMED => "Confirmada",
        STATUS_COMPLETED => "Completada",
        STATUS_CANCELLED => "Cancelada",
        "" => STATUS_SCHEDULED,
        other => other,
    }
}

/// A scheduled visit.
///
/// `pet_id` points into the pet repository but is not checked against it;
/// deleting a pet leaves its consultations behind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Consultation {
    /// Sequential id from the consultation repository's own counter
    pub id: u32,
    /// Referenced pet id (never validated for existence)
    pub pet_id: u32,
    /// Visit reason
    pub reason: String,
    /// Longer description of the visit
    pub description: String,
    /// Scheduled calendar date
    pub date: NaiveDate,
    /// Scheduled local time
    pub time: NaiveTime,
    /// Attending veterinarian, free text
    pub veterinarian: String,
    /// One of low/normal/high/urgent
    pub priority: String,
    /// One of scheduled/confirmed/completed/cancelled
    pub status: String,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
    /// Account id of the session that scheduled it
    pub created_by: u32,
    /// Clinical outcome, filled in after the visit
    #[serde(default)]
    pub diagnosis: String,
    #[serde(default)]
    pub treatment: String,
    #[serde(default)]
    pub notes: String,
    /// Stamped on every update, absent until then
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Consultation {
    /// Build a record from validated input.
    ///
    /// Callers run [`NewConsultation::validate`] first; a blank priority
    /// falls back to "normal" and the status starts at "scheduled".
    pub fn new(id: u32, input: NewConsultation, created_by: u32) -> Self {
        let priority = input
            .priority
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| PRIORITY_NORMAL.to_string());
        Self {
            id,
            pet_id: input.pet_id,
            reason: input.reason,
            description: input.description,
            date: input.date.unwrap_or_default(),
            time: input.time.unwrap_or_default(),
            veterinarian: input.veterinarian,
            priority,
            status: STATUS_SCHEDULED.to_string(),
            created_at: Utc::now().to_rfc3339(),
            created_by,
            diagnosis: String::new(),
            treatment: String::new(),
            notes: String::new(),
            updated_at: None,
        }
    }

    /// Combined date and time of the visit.
    pub fn scheduled_for(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// Merge a validated patch and stamp `updated_at`.
    ///
    /// Date, time and the required text fields always overwrite. Priority,
    /// status and the clinical fields only overwrite when the patch carries
    /// a non-empty value; a blank never erases an earlier entry.
    pub fn apply_patch(&mut self, patch: ConsultationPatch) {
        if let Some(pet_id) = patch.pet_id.filter(|id| *id != 0) {
            self.pet_id = pet_id;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(time) = patch.time {
            self.time = time;
        }
        self.reason = patch.reason;
        self.description = patch.description;
        self.veterinarian = patch.veterinarian;
        if let Some(priority) = patch.priority.filter(|p| !p.is_empty()) {
            self.priority = priority;
        }
        if let Some(status) = patch.status.filter(|s| !s.is_empty()) {
            self.status = status;
        }
        if let Some(diagnosis) = patch.diagnosis.filter(|d| !d.is_empty()) {
            self.diagnosis = diagnosis;
        }
        if let Some(treatment) = patch.treatment.filter(|t| !t.is_empty()) {
            self.treatment = treatment;
        }
        if let Some(notes) = patch.notes.filter(|n| !n.is_empty()) {
            self.notes = notes;
        }
        self.updated_at = Some(Utc::now().to_rfc3339());
    }
}

/// Input for scheduling a consultation.
#[derive(Debug, Clone, Default)]
pub struct NewConsultation {
    /// Referenced pet id; 0 counts as missing
    pub pet_id: u32,
    pub reason: String,
    pub description: String,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub veterinarian: String,
    /// Blank or absent falls back to "normal"
    pub priority: Option<String>,
}

impl NewConsultation {
    /// Check required fields, then that the visit is not in the past.
    ///
    /// `now` is the caller's current local instant; a visit scheduled
    /// exactly at `now` is accepted.
    pub fn validate(&self, now: NaiveDateTime) -> Result<(), ValidationError> {
        if self.pet_id == 0
            || self.reason.is_empty()
            || self.description.is_empty()
            || self.veterinarian.is_empty()
        {
            return Err(ValidationError::MissingConsultationFields);
        }
        let (date, time) = match (self.date, self.time) {
            (Some(date), Some(time)) => (date, time),
            _ => return Err(ValidationError::MissingConsultationFields),
        };
        if date.and_time(time) < now {
            return Err(ValidationError::DateInPast);
        }
        Ok(())
    }
}

/// Full-form consultation update.
///
/// Date, time, reason, description and veterinarian must be re-supplied
/// on every edit; the remaining fields are optional and keep their stored
/// value when absent or blank. Rescheduling into the past is allowed here,
/// only creation checks the calendar.
#[derive(Debug, Clone, Default)]
pub struct ConsultationPatch {
    /// Re-pointing to another pet; `Some(0)` and `None` both keep the old id
    pub pet_id: Option<u32>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub reason: String,
    pub description: String,
    pub veterinarian: String,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub notes: Option<String>,
}

impl ConsultationPatch {
    /// Require the full set of scheduling fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.date.is_none()
            || self.time.is_none()
            || self.reason.is_empty()
            || self.description.is_empty()
            || self.veterinarian.is_empty()
        {
            return Err(ValidationError::MissingConsultationFields);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local};

    fn sample_input(date: NaiveDate, time: NaiveTime) -> NewConsultation {
        NewConsultation {
            pet_id: 1,
            reason: "Vacunación".into(),
            description: "Refuerzo anual".into(),
            date: Some(date),
            time: Some(time),
            veterinarian: "Dr. García".into(),
            priority: None,
        }
    }

    fn sample_patch(date: NaiveDate, time: NaiveTime) -> ConsultationPatch {
        ConsultationPatch {
            date: Some(date),
            time: Some(time),
            reason: "Control".into(),
            description: "Revisión general".into(),
            veterinarian: "Dr. García".into(),
            ..Default::default()
        }
    }

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 0, 0).unwrap()
    }

    fn future_date() -> NaiveDate {
        (Local::now() + Duration::days(30)).date_naive()
    }

    #[test]
    fn test_new_consultation_defaults() {
        let input = sample_input(future_date(), noon());
        let consultation = Consultation::new(7, input, 2);
        assert_eq!(consultation.id, 7);
        assert_eq!(consultation.priority, PRIORITY_NORMAL);
        assert_eq!(consultation.status, STATUS_SCHEDULED);
        assert_eq!(consultation.created_by, 2);
        assert_eq!(consultation.diagnosis, "");
        assert_eq!(consultation.updated_at, None);
    }

    #[test]
    fn test_blank_priority_falls_back_to_normal() {
        let mut input = sample_input(future_date(), noon());
        input.priority = Some(String::new());
        let consultation = Consultation::new(1, input, 1);
        assert_eq!(consultation.priority, PRIORITY_NORMAL);

        let mut input = sample_input(future_date(), noon());
        input.priority = Some(PRIORITY_URGENT.into());
        let consultation = Consultation::new(2, input, 1);
        assert_eq!(consultation.priority, PRIORITY_URGENT);
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        let now = Local::now().naive_local();

        let mut input = sample_input(future_date(), noon());
        input.pet_id = 0;
        assert_eq!(
            input.validate(now),
            Err(ValidationError::MissingConsultationFields)
        );

        let mut input = sample_input(future_date(), noon());
        input.veterinarian.clear();
        assert_eq!(
            input.validate(now),
            Err(ValidationError::MissingConsultationFields)
        );

        let mut input = sample_input(future_date(), noon());
        input.date = None;
        assert_eq!(
            input.validate(now),
            Err(ValidationError::MissingConsultationFields)
        );
    }

    #[test]
    fn test_validate_rejects_past_instants() {
        let now = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();

        let yesterday = sample_input(NaiveDate::from_ymd_opt(2024, 6, 14).unwrap(), noon());
        assert_eq!(yesterday.validate(now), Err(ValidationError::DateInPast));

        // Scheduling exactly at the current instant is still allowed.
        let at_now = sample_input(now.date(), now.time());
        assert_eq!(at_now.validate(now), Ok(()));

        let tomorrow = sample_input(NaiveDate::from_ymd_opt(2024, 6, 16).unwrap(), noon());
        assert_eq!(tomorrow.validate(now), Ok(()));
    }

    #[test]
    fn test_apply_patch_overwrites_scheduling_fields() {
        let input = sample_input(future_date(), noon());
        let mut consultation = Consultation::new(1, input, 1);

        let new_date = future_date() + Duration::days(1);
        let new_time = NaiveTime::from_hms_opt(16, 30, 0).unwrap();
        consultation.apply_patch(sample_patch(new_date, new_time));

        assert_eq!(consultation.date, new_date);
        assert_eq!(consultation.time, new_time);
        assert_eq!(consultation.reason, "Control");
        assert!(consultation.updated_at.is_some());
    }

    #[test]
    fn test_apply_patch_keeps_clinical_fields_on_blank() {
        let input = sample_input(future_date(), noon());
        let mut consultation = Consultation::new(1, input, 1);

        let mut patch = sample_patch(future_date(), noon());
        patch.diagnosis = Some("Otitis".into());
        consultation.apply_patch(patch);
        assert_eq!(consultation.diagnosis, "Otitis");

        // A later edit with a blank diagnosis must not erase the entry.
        let mut patch = sample_patch(future_date(), noon());
        patch.diagnosis = Some(String::new());
        patch.status = Some(STATUS_COMPLETED.into());
        consultation.apply_patch(patch);
        assert_eq!(consultation.diagnosis, "Otitis");
        assert_eq!(consultation.status, STATUS_COMPLETED);
    }

    #[test]
    fn test_apply_patch_ignores_zero_pet_id() {
        let input = sample_input(future_date(), noon());
        let mut consultation = Consultation::new(1, input, 1);

        let mut patch = sample_patch(future_date(), noon());
        patch.pet_id = Some(0);
        consultation.apply_patch(patch);
        assert_eq!(consultation.pet_id, 1);

        let mut patch = sample_patch(future_date(), noon());
        patch.pet_id = Some(4);
        consultation.apply_patch(patch);
        assert_eq!(consultation.pet_id, 4);
    }

    #[test]
    fn test_patch_validate_requires_scheduling_fields() {
        let mut patch = sample_patch(future_date(), noon());
        patch.time = None;
        assert_eq!(
            patch.validate(),
            Err(ValidationError::MissingConsultationFields)
        );

        let mut patch = sample_patch(future_date(), noon());
        patch.description.clear();
        assert_eq!(
            patch.validate(),
            Err(ValidationError::MissingConsultationFields)
        );

        assert_eq!(sample_patch(future_date(), noon()).validate(), Ok(()));
    }

    #[test]
    fn test_status_display_names() {
        assert_eq!(status_display_name(STATUS_SCHEDULED), "Programada");
        assert_eq!(status_display_name(STATUS_CONFIRMED), "Confirmada");
        assert_eq!(status_display_name(STATUS_COMPLETED), "Completada");
        assert_eq!(status_display_name(STATUS_CANCELLED), "Cancelada");
        assert_eq!(status_display_name(""), STATUS_SCHEDULED);
        assert_eq!(status_display_name("en espera"), "en espera");
    }

    #[test]
    fn test_serializes_camel_case() {
        let input = sample_input(future_date(), noon());
        let consultation = Consultation::new(3, input, 1);
        let json = serde_json::to_string(&consultation).unwrap();
        assert!(json.contains("\"petId\":1"));
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"createdBy\":1"));
        assert!(!json.contains("updatedAt"));
    }
}
