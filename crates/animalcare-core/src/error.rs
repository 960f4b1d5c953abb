//! Error taxonomy for repository operations.

use thiserror::Error;

/// Rejected caller input. One variant per registration or scheduling rule;
/// the Display string is the user-facing message shown by the UI.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required registration field was empty.
    #[error("Todos los campos son obligatorios")]
    MissingFields,

    /// The account name has no surname component.
    #[error("El nombre debe incluir nombre y apellido")]
    NameNeedsSurname,

    /// Password shorter than six characters.
    #[error("La contraseña debe tener al menos 6 caracteres")]
    PasswordTooShort,

    /// Password and confirmation differ.
    #[error("Las contraseñas no coinciden")]
    PasswordMismatch,

    /// Phone number without a single digit.
    #[error("El teléfono debe contener al menos números")]
    PhoneWithoutDigits,

    /// Email already registered (compared case-insensitively).
    #[error("Este correo electrónico ya está registrado")]
    DuplicateEmail,

    /// A required consultation field was empty.
    #[error("Todos los campos obligatorios deben ser completados")]
    MissingConsultationFields,

    /// Consultation scheduled before the current instant.
    #[error("No se pueden programar consultas en fechas pasadas")]
    DateInPast,
}

/// Errors surfaced by the clinic repositories.
///
/// Storage failures never appear here: they are caught at the persistence
/// boundary, logged, and degraded to "no data" (see [`crate::storage`]).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClinicError {
    /// Caller input failed a validation rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No account matches the given email, password and role.
    #[error("Credenciales incorrectas")]
    InvalidCredentials,

    /// A mutation targeted an id the repository does not contain.
    #[error("{0}")]
    NotFound(String),
}

pub type ClinicResult<T> = Result<T, ClinicError>;
