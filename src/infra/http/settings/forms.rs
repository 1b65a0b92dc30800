use serde::Deserialize;

use crate::application::settings::{UpdateAdminSettingsCommand, UpdateSiteCommand};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct AdminSettingsForm {
    pub(super) storage_directory: String,
    pub(super) naming_scheme: String,
}

impl AdminSettingsForm {
    pub(super) fn to_command(&self) -> UpdateAdminSettingsCommand {
        UpdateAdminSettingsCommand {
            storage_directory: self.storage_directory.clone(),
            naming_scheme: self.naming_scheme.clone(),
        }
    }
}

/// The site name is not part of the form and stays untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct SiteSettingsForm {
    pub(super) domain: String,
}

impl SiteSettingsForm {
    pub(super) fn to_command(&self) -> UpdateSiteCommand {
        UpdateSiteCommand {
            domain: self.domain.clone(),
        }
    }
}
