//! User roles and the navigation they unlock.
//!
//! Enforcement lives in the backend; these flags only decide what the
//! dashboard shows.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ReportError;

/// Role carried by the `tipo_usuario` field of the signed-in user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Role {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "profissional")]
    Professional,
    #[serde(rename = "recepcao")]
    Reception,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    ViewDashboard,
    ViewPatients,
    ManagePatients,
    ManageProfessionals,
    ManagePlans,
    RecordProgress,
    ManageAppointments,
    ViewReports,
    AskAssistant,
    ManageUsers,
}

const ADMIN_CAPABILITIES: &[Capability] = &[
    Capability::ViewDashboard,
    Capability::ViewPatients,
    Capability::ManagePatients,
    Capability::ManageProfessionals,
    Capability::ManagePlans,
    Capability::RecordProgress,
    Capability::ManageAppointments,
    Capability::ViewReports,
    Capability::AskAssistant,
    Capability::ManageUsers,
];

const PROFESSIONAL_CAPABILITIES: &[Capability] = &[
    Capability::ViewDashboard,
    Capability::ViewPatients,
    Capability::ManagePlans,
    Capability::RecordProgress,
    Capability::ViewReports,
    Capability::AskAssistant,
];

const RECEPTION_CAPABILITIES: &[Capability] = &[
    Capability::ViewDashboard,
    Capability::ViewPatients,
    Capability::ManagePatients,
    Capability::ManageAppointments,
];

impl Role {
    pub fn capabilities(self) -> &'static [Capability] {
        match self {
            Role::Admin => ADMIN_CAPABILITIES,
            Role::Professional => PROFESSIONAL_CAPABILITIES,
            Role::Reception => RECEPTION_CAPABILITIES,
        }
    }

    pub fn can(self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Administrador",
            Role::Professional => "Profissional",
            Role::Reception => "Recepção",
        }
    }
}

impl FromStr for Role {
    type Err = ReportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "admin" | "administrador" | "administrator" => Ok(Role::Admin),
            "profissional" | "professional" | "terapeuta" => Ok(Role::Professional),
            "recepcao" | "recepção" | "reception" | "secretaria" => Ok(Role::Reception),
            other => Err(ReportError::Parse(format!("unknown user type: {other}"))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sidebar entry gated by a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
    pub requires: Capability,
}

pub const NAVIGATION: &[NavItem] = &[
    NavItem {
        label: "Início",
        path: "/",
        requires: Capability::ViewDashboard,
    },
    NavItem {
        label: "Pacientes",
        path: "/pacientes",
        requires: Capability::ViewPatients,
    },
    NavItem {
        label: "Profissionais",
        path: "/profissionais",
        requires: Capability::ManageProfessionals,
    },
    NavItem {
        label: "Planos terapêuticos",
        path: "/planos",
        requires: Capability::ManagePlans,
    },
    NavItem {
        label: "Registros diários",
        path: "/registros",
        requires: Capability::RecordProgress,
    },
    NavItem {
        label: "Agenda",
        path: "/agendamentos",
        requires: Capability::ManageAppointments,
    },
    NavItem {
        label: "Relatórios",
        path: "/relatorios",
        requires: Capability::ViewReports,
    },
    NavItem {
        label: "Usuários",
        path: "/usuarios",
        requires: Capability::ManageUsers,
    },
];

/// Navigation entries visible to `role`, in sidebar order.
pub fn navigation_for(role: Role) -> Vec<&'static NavItem> {
    NAVIGATION
        .iter()
        .filter(|item| role.can(item.requires))
        .collect()
}
