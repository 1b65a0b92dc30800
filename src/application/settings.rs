use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use time::OffsetDateTime;
use tracing::info;

use crate::application::forms::FormErrors;
use crate::application::repos::{RepoError, SettingsRepo};
use crate::domain::entities::{PodcastsSettingsRecord, SiteRecord};
use crate::domain::naming::validate_naming_scheme;
use crate::domain::storage::expand_path;

pub const STORAGE_DIRECTORY_FIELD: &str = "storage_directory";
pub const NAMING_SCHEME_FIELD: &str = "naming_scheme";
pub const DOMAIN_FIELD: &str = "domain";

const STORAGE_DIRECTORY_MAX_LEN: usize = 255;
const NAMING_SCHEME_MAX_LEN: usize = 255;
const DOMAIN_MAX_LEN: usize = 100;

#[derive(Debug, Error)]
pub enum AdminSettingsError {
    #[error("settings are invalid: {0}")]
    Invalid(FormErrors),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone)]
pub struct UpdateAdminSettingsCommand {
    pub storage_directory: String,
    pub naming_scheme: String,
}

#[derive(Debug, Clone)]
pub struct UpdateSiteCommand {
    pub domain: String,
}

type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

#[derive(Clone)]
pub struct SettingsService {
    repo: Arc<dyn SettingsRepo>,
    env: EnvLookup,
}

impl SettingsService {
    pub fn new(repo: Arc<dyn SettingsRepo>) -> Self {
        Self::with_env(repo, Arc::new(|name: &str| std::env::var(name).ok()))
    }

    /// Build a service whose `~`/`$VAR` expansion reads from `env`.
    pub fn with_env(repo: Arc<dyn SettingsRepo>, env: EnvLookup) -> Self {
        Self { repo, env }
    }

    pub async fn load_admin(&self) -> Result<PodcastsSettingsRecord, AdminSettingsError> {
        self.repo
            .load_podcasts_settings()
            .await
            .map_err(AdminSettingsError::from)
    }

    pub async fn load_site(&self) -> Result<SiteRecord, AdminSettingsError> {
        self.repo.load_site().await.map_err(AdminSettingsError::from)
    }

    pub async fn update_admin(
        &self,
        command: UpdateAdminSettingsCommand,
    ) -> Result<PodcastsSettingsRecord, AdminSettingsError> {
        let mut errors = FormErrors::new();

        let storage_directory = match self.clean_storage_directory(&command.storage_directory) {
            Ok(value) => Some(value),
            Err(message) => {
                errors.add_field(STORAGE_DIRECTORY_FIELD, message);
                None
            }
        };

        let naming_scheme = command.naming_scheme.trim().to_string();
        if naming_scheme.chars().count() > NAMING_SCHEME_MAX_LEN {
            errors.add_field(
                NAMING_SCHEME_FIELD,
                format!("Ensure this value has at most {NAMING_SCHEME_MAX_LEN} characters."),
            );
        } else if let Err(err) = validate_naming_scheme(&naming_scheme) {
            errors.add_field(NAMING_SCHEME_FIELD, err.to_string());
        }

        errors.into_result().map_err(AdminSettingsError::Invalid)?;

        let record = PodcastsSettingsRecord {
            storage_directory,
            naming_scheme,
            updated_at: OffsetDateTime::now_utc(),
        };
        self.repo.upsert_podcasts_settings(record).await?;
        let latest = self.repo.load_podcasts_settings().await?;

        info!(
            target = "podarchive::settings",
            storage_directory = latest.storage_directory.as_deref().unwrap_or(""),
            naming_scheme = %latest.naming_scheme,
            "podcast settings updated"
        );

        Ok(latest)
    }

    pub async fn update_site(
        &self,
        command: UpdateSiteCommand,
    ) -> Result<SiteRecord, AdminSettingsError> {
        let domain = command.domain.trim();

        if domain.is_empty() {
            return Err(AdminSettingsError::Invalid(FormErrors::field(
                DOMAIN_FIELD,
                "This field is required.",
            )));
        }
        if domain.chars().count() > DOMAIN_MAX_LEN {
            return Err(AdminSettingsError::Invalid(FormErrors::field(
                DOMAIN_FIELD,
                format!("Ensure this value has at most {DOMAIN_MAX_LEN} characters."),
            )));
        }
        if domain.chars().any(char::is_whitespace) {
            return Err(AdminSettingsError::Invalid(FormErrors::field(
                DOMAIN_FIELD,
                "The domain name cannot contain any spaces or tabs.",
            )));
        }

        let site = self.repo.update_site_domain(domain).await?;
        info!(
            target = "podarchive::settings",
            domain = %site.domain,
            "site domain updated"
        );
        Ok(site)
    }

    fn clean_storage_directory(&self, raw: &str) -> Result<String, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err("This field is required.".to_string());
        }

        let expanded = expand_path(trimmed, |name| (self.env)(name));

        if expanded.chars().count() > STORAGE_DIRECTORY_MAX_LEN {
            return Err(format!(
                "Ensure this value has at most {STORAGE_DIRECTORY_MAX_LEN} characters."
            ));
        }
        if !Path::new(&expanded).is_absolute() {
            return Err(format!(
                "The storage directory must be an absolute path, got `{expanded}`."
            ));
        }

        Ok(expanded)
    }
}
