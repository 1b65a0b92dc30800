use serde::Deserialize;
use uuid::Uuid;

use crate::application::podcasts::NewFromUrlCommand;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct NewFromUrlForm {
    pub(super) feed_url: String,
}

impl NewFromUrlForm {
    pub(super) fn to_command(&self, listener_id: Option<Uuid>) -> NewFromUrlCommand {
        NewFromUrlCommand {
            feed_url: self.feed_url.clone(),
            listener_id,
        }
    }
}
