use crate::application::chrome::with_listener;
use crate::application::forms::FormErrors;
use crate::application::listeners::{ListenerSettingsForm, SUBSCRIBED_PODCASTS_FIELD};
use crate::presentation::help;
use crate::presentation::views::{ListenerSettingsView, SubscriptionCheckboxView};

pub(super) fn settings_view(
    form: &ListenerSettingsForm,
    errors: Option<&FormErrors>,
) -> ListenerSettingsView {
    let listener = &form.listener;
    let path = format!("/listeners/{}/settings", listener.id);

    ListenerSettingsView {
        heading: format!("Settings for {}", listener.username),
        form_action: with_listener(&path, Some(listener.id)),
        field_name: SUBSCRIBED_PODCASTS_FIELD.to_string(),
        label: help::SUBSCRIBED_PODCASTS_LABEL.to_string(),
        help_html: help::subscribed_podcasts_help(form.has_choices()).to_string(),
        long_help_html: help::SUBSCRIBED_PODCASTS_LONG_HELP.to_string(),
        choices: form
            .choices
            .iter()
            .map(|choice| SubscriptionCheckboxView {
                input_id: format!("subscribed-podcast-{}", choice.podcast_id),
                value: choice.podcast_id.to_string(),
                label: choice.title.clone(),
                checked: choice.checked,
            })
            .collect(),
        errors: errors
            .map(|errors| errors.for_field(SUBSCRIBED_PODCASTS_FIELD).to_vec())
            .unwrap_or_default(),
        submit_label: "Save".to_string(),
    }
}
