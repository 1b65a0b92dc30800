use serde::Deserialize;
use uuid::Uuid;

use crate::application::listeners::UpdateSubscriptionsCommand;

/// Checkbox submission; an absent key means nothing is checked.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ListenerSettingsFormData {
    #[serde(default)]
    pub(super) subscribed_podcasts: Vec<String>,
}

impl ListenerSettingsFormData {
    pub(super) fn into_command(self, listener_id: Uuid) -> UpdateSubscriptionsCommand {
        UpdateSubscriptionsCommand {
            listener_id,
            subscribed_podcasts: self.subscribed_podcasts,
        }
    }
}
