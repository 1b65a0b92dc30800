use std::sync::Arc;

use crate::application::{
    chrome::ChromeService, listeners::ListenerSettingsService, podcasts::PodcastService,
    repos::HealthRepo, settings::SettingsService,
};

#[derive(Clone)]
pub struct HttpState {
    pub chrome: Arc<ChromeService>,
    pub podcasts: Arc<PodcastService>,
    pub listeners: Arc<ListenerSettingsService>,
    pub settings: Arc<SettingsService>,
    pub health: Arc<dyn HealthRepo>,
}
