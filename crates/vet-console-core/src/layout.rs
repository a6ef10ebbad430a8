//! Shared navigation chrome, described once and parametrized by the current
//! route.

use chrono::Datelike;

use crate::models::ResourceKind;

pub const APP_TITLE: &str = "Veterinary Clinic Management";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Appointment,
    Client,
    PetPatient,
    LabDiagnostic,
    MedicalInventory,
}

impl Route {
    /// Menu order.
    pub const ALL: [Route; 6] = [
        Route::Home,
        Route::Appointment,
        Route::Client,
        Route::PetPatient,
        Route::LabDiagnostic,
        Route::MedicalInventory,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Appointment => "appointment",
            Route::Client => "client",
            Route::PetPatient => "pet",
            Route::LabDiagnostic => "lab-diagnostic",
            Route::MedicalInventory => "inventory",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Appointment => "/appointment",
            Route::Client => "/client",
            Route::PetPatient => "/pet",
            Route::LabDiagnostic => "/lab-diagnostic",
            Route::MedicalInventory => "/inventory",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Appointment => "Appointment",
            Route::Client => "Client",
            Route::PetPatient => "Pet Patient",
            Route::LabDiagnostic => "Lab Diagnostic",
            Route::MedicalInventory => "Medical Inventory",
        }
    }

    /// Route for a menu key or path. Anything unrecognised goes home.
    pub fn from_key(key: &str) -> Route {
        let key = key.trim().trim_start_matches('/').to_lowercase();
        Route::ALL
            .into_iter()
            .find(|r| r.key() == key || r.path().trim_start_matches('/') == key)
            .unwrap_or(Route::Home)
    }

    /// Resource managed on this page, if any.
    pub fn resource(&self) -> Option<ResourceKind> {
        match self {
            Route::Home => None,
            Route::Appointment => Some(ResourceKind::Appointment),
            Route::Client => Some(ResourceKind::Client),
            Route::PetPatient => Some(ResourceKind::Pet),
            Route::LabDiagnostic => Some(ResourceKind::LabDiagnostic),
            Route::MedicalInventory => Some(ResourceKind::MedicalInventory),
        }
    }

    pub fn for_resource(kind: ResourceKind) -> Route {
        match kind {
            ResourceKind::Appointment => Route::Appointment,
            ResourceKind::Client => Route::Client,
            ResourceKind::Pet => Route::PetPatient,
            ResourceKind::LabDiagnostic => Route::LabDiagnostic,
            ResourceKind::MedicalInventory => Route::MedicalInventory,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub key: &'static str,
    pub label: &'static str,
    pub path: &'static str,
    pub selected: bool,
}

/// The menu with exactly one item selected.
pub fn navigation(current: Route) -> Vec<NavItem> {
    Route::ALL
        .into_iter()
        .map(|route| NavItem {
            key: route.key(),
            label: route.label(),
            path: route.path(),
            selected: route == current,
        })
        .collect()
}

pub fn footer(year: i32) -> String {
    format!("© {} Veterinary Clinic. All Rights Reserved.", year)
}

/// Footer for the current local year.
pub fn current_footer() -> String {
    footer(chrono::Local::now().year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_selected_item() {
        let items = navigation(Route::PetPatient);
        assert_eq!(items.len(), 6);
        let selected: Vec<_> = items.iter().filter(|i| i.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].path, "/pet");
        assert_eq!(selected[0].label, "Pet Patient");
    }

    #[test]
    fn test_unknown_key_routes_home() {
        assert_eq!(Route::from_key("staff"), Route::Home);
        assert_eq!(Route::from_key(""), Route::Home);
        assert_eq!(Route::from_key("/inventory"), Route::MedicalInventory);
        assert_eq!(Route::from_key("Lab-Diagnostic"), Route::LabDiagnostic);
    }

    #[test]
    fn test_routes_and_resources_agree() {
        for kind in ResourceKind::ALL {
            assert_eq!(Route::for_resource(kind).resource(), Some(kind));
        }
    }

    #[test]
    fn test_footer() {
        assert_eq!(footer(2024), "© 2024 Veterinary Clinic. All Rights Reserved.");
    }
}
