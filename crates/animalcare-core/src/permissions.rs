//! Role capability table and hierarchy checks.

use crate::models::{ROLE_USER, ROLE_VETERINARIAN};

/// Named permissions a role can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ManageUsers,
    ManagePets,
    RegisterPets,
    ManageAppointments,
    SetAppointmentPriority,
    DeletePets,
    ViewAllData,
    ManageSystem,
}

/// Capability set held by one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub can_manage_users: bool,
    pub can_manage_pets: bool,
    pub can_register_pets: bool,
    pub can_manage_appointments: bool,
    pub can_set_appointment_priority: bool,
    pub can_delete_pets: bool,
    pub can_view_all_data: bool,
    pub can_manage_system: bool,
}

impl Capabilities {
    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::ManageUsers => self.can_manage_users,
            Capability::ManagePets => self.can_manage_pets,
            Capability::RegisterPets => self.can_register_pets,
            Capability::ManageAppointments => self.can_manage_appointments,
            Capability::SetAppointmentPriority => self.can_set_appointment_priority,
            Capability::DeletePets => self.can_delete_pets,
            Capability::ViewAllData => self.can_view_all_data,
            Capability::ManageSystem => self.can_manage_system,
        }
    }
}

/// Veterinarians hold every capability.
pub const VETERINARIAN_CAPABILITIES: Capabilities = Capabilities {
    can_manage_users: true,
    can_manage_pets: true,
    can_register_pets: true,
    can_manage_appointments: true,
    can_set_appointment_priority: true,
    can_delete_pets: true,
    can_view_all_data: true,
    can_manage_system: true,
};

/// Plain users may only register their own pets.
pub const USER_CAPABILITIES: Capabilities = Capabilities {
    can_manage_users: false,
    can_manage_pets: false,
    can_register_pets: true,
    can_manage_appointments: false,
    can_set_appointment_priority: false,
    can_delete_pets: false,
    can_view_all_data: false,
    can_manage_system: false,
};

/// Capability set for a role, `None` for roles outside the table.
pub fn capabilities_for(role: &str) -> Option<&'static Capabilities> {
    match role {
        ROLE_VETERINARIAN => Some(&VETERINARIAN_CAPABILITIES),
        ROLE_USER => Some(&USER_CAPABILITIES),
        _ => None,
    }
}

/// Whether `role` holds `capability`; unknown roles hold nothing.
pub fn role_allows(role: &str, capability: Capability) -> bool {
    capabilities_for(role).map_or(false, |caps| caps.allows(capability))
}

/// Rank in the role hierarchy; unranked roles compare as never-enough.
pub fn role_rank(role: &str) -> Option<u8> {
    match role {
        ROLE_USER => Some(1),
        ROLE_VETERINARIAN => Some(2),
        _ => None,
    }
}

/// Whether `role` ranks at least as high as `required`.
///
/// False whenever either side is outside the hierarchy, so an unknown
/// required role locks everyone out rather than letting everyone in.
pub fn role_at_least(role: &str, required: &str) -> bool {
    match (role_rank(role), role_rank(required)) {
        (Some(have), Some(need)) => have >= need,
        _ => false,
    }
}

/// Spanish label for a role; unmapped roles display verbatim.
pub fn role_display_name(role: &str) -> &str {
    match role {
        ROLE_VETERINARIAN => "Veterinario",
        ROLE_USER => "Usuario",
        other => other,
    }
}
