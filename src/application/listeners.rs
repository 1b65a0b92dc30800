use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::application::forms::FormErrors;
use crate::application::repos::{ListenersRepo, RepoError};
use crate::domain::entities::{ListenerRecord, PodcastRecord};

pub const SUBSCRIBED_PODCASTS_FIELD: &str = "subscribed_podcasts";

#[derive(Debug, Error)]
pub enum ListenerSettingsError {
    #[error("listener not found")]
    NotFound,
    #[error("listener settings are invalid: {errors}")]
    Invalid {
        errors: FormErrors,
        form: ListenerSettingsForm,
    },
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// One checkbox of the subscription field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionChoice {
    pub podcast_id: Uuid,
    pub title: String,
    pub slug: String,
    pub checked: bool,
}

/// The listener's subscription form, bound to its current selection.
///
/// Choices are limited to the listener's interested podcasts and ordered by
/// title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerSettingsForm {
    pub listener: ListenerRecord,
    pub choices: Vec<SubscriptionChoice>,
}

impl ListenerSettingsForm {
    fn build(
        listener: ListenerRecord,
        interested: Vec<PodcastRecord>,
        selected: &HashSet<Uuid>,
    ) -> Self {
        let mut choices: Vec<SubscriptionChoice> = interested
            .into_iter()
            .map(|podcast| SubscriptionChoice {
                checked: selected.contains(&podcast.id),
                podcast_id: podcast.id,
                title: podcast.title,
                slug: podcast.slug,
            })
            .collect();
        choices.sort_by(|a, b| {
            a.title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then_with(|| a.slug.cmp(&b.slug))
        });

        Self { listener, choices }
    }

    pub fn has_choices(&self) -> bool {
        !self.choices.is_empty()
    }

    pub fn selected_ids(&self) -> Vec<Uuid> {
        self.choices
            .iter()
            .filter(|choice| choice.checked)
            .map(|choice| choice.podcast_id)
            .collect()
    }

    fn rebind(&mut self, selected: &HashSet<Uuid>) {
        for choice in &mut self.choices {
            choice.checked = selected.contains(&choice.podcast_id);
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateSubscriptionsCommand {
    pub listener_id: Uuid,
    /// Raw submitted values; an empty list unsubscribes from everything.
    pub subscribed_podcasts: Vec<String>,
}

#[derive(Clone)]
pub struct ListenerSettingsService {
    repo: Arc<dyn ListenersRepo>,
}

impl ListenerSettingsService {
    pub fn new(repo: Arc<dyn ListenersRepo>) -> Self {
        Self { repo }
    }

    pub async fn load_form(
        &self,
        listener_id: Uuid,
    ) -> Result<ListenerSettingsForm, ListenerSettingsError> {
        let listener = self.find_listener(listener_id).await?;
        let interested = self.repo.list_interested(listener_id).await?;
        let subscribed: HashSet<Uuid> = self
            .repo
            .list_subscribed_ids(listener_id)
            .await?
            .into_iter()
            .collect();

        Ok(ListenerSettingsForm::build(
            listener,
            interested,
            &subscribed,
        ))
    }

    pub async fn update(
        &self,
        command: UpdateSubscriptionsCommand,
    ) -> Result<ListenerSettingsForm, ListenerSettingsError> {
        let mut form = self.load_form(command.listener_id).await?;
        let available: HashSet<Uuid> = form.choices.iter().map(|c| c.podcast_id).collect();

        let mut errors = FormErrors::new();
        let mut selected = HashSet::new();
        for raw in &command.subscribed_podcasts {
            let value = raw.trim();
            match Uuid::parse_str(value) {
                Ok(id) if available.contains(&id) => {
                    selected.insert(id);
                }
                _ => errors.add_field(
                    SUBSCRIBED_PODCASTS_FIELD,
                    format!("Select a valid choice. {value} is not one of the available choices."),
                ),
            }
        }

        form.rebind(&selected);

        if let Err(errors) = errors.into_result() {
            return Err(ListenerSettingsError::Invalid { errors, form });
        }

        let ids = form.selected_ids();
        self.repo
            .replace_subscriptions(command.listener_id, &ids)
            .await?;

        info!(
            target = "podarchive::listeners",
            listener = %command.listener_id,
            subscriptions = ids.len(),
            "listener subscriptions updated"
        );

        Ok(form)
    }

    async fn find_listener(&self, id: Uuid) -> Result<ListenerRecord, ListenerSettingsError> {
        self.repo
            .find_listener(id)
            .await?
            .ok_or(ListenerSettingsError::NotFound)
    }
}
