use time::{format_description::FormatItem, macros::format_description};

use crate::application::forms::FormErrors;
use crate::application::settings::{DOMAIN_FIELD, NAMING_SCHEME_FIELD, STORAGE_DIRECTORY_FIELD};
use crate::domain::entities::{PodcastsSettingsRecord, SiteRecord};
use crate::presentation::help;
use crate::presentation::views::{AdminSettingsView, FormFieldView, SiteSettingsView};

pub(super) const ADMIN_FORM_ACTION: &str = "/settings/admin";
pub(super) const SITE_FORM_ACTION: &str = "/settings/site";

const TIMESTAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute] UTC");

pub(super) struct AdminFieldValues<'a> {
    pub(super) storage_directory: &'a str,
    pub(super) naming_scheme: &'a str,
    pub(super) updated_at: String,
}

pub(super) fn admin_values_from_record(record: &PodcastsSettingsRecord) -> AdminFieldValues<'_> {
    AdminFieldValues {
        storage_directory: record.storage_directory.as_deref().unwrap_or_default(),
        naming_scheme: &record.naming_scheme,
        updated_at: format_timestamp(record.updated_at),
    }
}

pub(super) fn admin_view(
    values: AdminFieldValues<'_>,
    errors: Option<&FormErrors>,
) -> AdminSettingsView {
    AdminSettingsView {
        heading: "Archive settings".to_string(),
        form_action: ADMIN_FORM_ACTION.to_string(),
        storage_directory: FormFieldView {
            name: STORAGE_DIRECTORY_FIELD.to_string(),
            label: help::STORAGE_DIRECTORY_LABEL.to_string(),
            value: values.storage_directory.to_string(),
            help_html: help::STORAGE_DIRECTORY_HELP.to_string(),
            long_help_html: Some(help::STORAGE_DIRECTORY_LONG_HELP.to_string()),
            errors: field_errors(errors, STORAGE_DIRECTORY_FIELD),
            placeholder: Some("~/podcasts".to_string()),
            ..FormFieldView::default()
        },
        naming_scheme: FormFieldView {
            name: NAMING_SCHEME_FIELD.to_string(),
            label: help::NAMING_SCHEME_LABEL.to_string(),
            value: values.naming_scheme.to_string(),
            help_html: help::naming_scheme_help(),
            long_help_html: Some(help::naming_scheme_long_help()),
            errors: field_errors(errors, NAMING_SCHEME_FIELD),
            rows: Some(help::NAMING_SCHEME_ROWS),
            ..FormFieldView::default()
        },
        updated_at: values.updated_at,
        submit_label: "Save settings".to_string(),
    }
}

pub(super) fn site_view(
    site: &SiteRecord,
    domain: &str,
    errors: Option<&FormErrors>,
) -> SiteSettingsView {
    SiteSettingsView {
        heading: "Site settings".to_string(),
        form_action: SITE_FORM_ACTION.to_string(),
        site_name: site.name.clone(),
        domain: FormFieldView {
            name: DOMAIN_FIELD.to_string(),
            label: help::SITE_DOMAIN_LABEL.to_string(),
            value: domain.to_string(),
            help_html: help::SITE_DOMAIN_HELP.to_string(),
            long_help_html: Some(help::SITE_DOMAIN_LONG_HELP.to_string()),
            errors: field_errors(errors, DOMAIN_FIELD),
            placeholder: Some("example.com".to_string()),
            ..FormFieldView::default()
        },
        submit_label: "Save settings".to_string(),
    }
}

fn field_errors(errors: Option<&FormErrors>, field: &str) -> Vec<String> {
    errors
        .map(|errors| errors.for_field(field).to_vec())
        .unwrap_or_default()
}

fn format_timestamp(value: time::OffsetDateTime) -> String {
    value
        .to_offset(time::UtcOffset::UTC)
        .format(TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| value.to_string())
}
