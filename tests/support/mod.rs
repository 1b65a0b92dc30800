#![allow(dead_code)]

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{Router, body::Body, http::Request, response::Response};
use http_body_util::BodyExt;
use podarchive::{
    application::{
        chrome::ChromeService,
        feeds::{FeedFetchError, FeedFetcher, FeedInfo},
        listeners::ListenerSettingsService,
        podcasts::PodcastService,
        repos::{
            CreatePodcastParams, HealthRepo, ListenersRepo, PodcastsRepo, RepoError, SettingsRepo,
        },
        settings::SettingsService,
    },
    domain::{
        entities::{ListenerRecord, PodcastRecord, PodcastsSettingsRecord, SiteRecord},
        naming::DEFAULT_NAMING_SCHEME,
    },
    infra::http::{self, HttpState},
};
use time::OffsetDateTime;
use tower::ServiceExt;
use url::Url;
use uuid::Uuid;

#[derive(Default)]
struct StoreState {
    podcasts: Vec<PodcastRecord>,
    listeners: HashMap<Uuid, ListenerRecord>,
    interested: HashMap<Uuid, BTreeSet<Uuid>>,
    subscribed: HashMap<Uuid, BTreeSet<Uuid>>,
    settings: Option<PodcastsSettingsRecord>,
    site: Option<SiteRecord>,
}

/// In-memory stand-in for every Postgres repository.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let store = Self::default();
        {
            let mut state = store.state.lock().expect("store lock");
            state.settings = Some(PodcastsSettingsRecord {
                storage_directory: None,
                naming_scheme: DEFAULT_NAMING_SCHEME.to_string(),
                updated_at: OffsetDateTime::UNIX_EPOCH,
            });
            state.site = Some(SiteRecord {
                id: 1,
                domain: "example.com".to_string(),
                name: "podarchive".to_string(),
            });
        }
        store
    }

    pub fn add_listener(&self, username: &str) -> Uuid {
        let id = Uuid::new_v4();
        let listener = ListenerRecord {
            id,
            user_id: Uuid::new_v4(),
            username: username.to_string(),
            playback_seek_forward_by: 45,
            playback_seek_backward_by: 30,
            created_at: OffsetDateTime::UNIX_EPOCH,
        };
        self.state
            .lock()
            .expect("store lock")
            .listeners
            .insert(id, listener);
        id
    }

    pub fn add_podcast(&self, title: &str, slug: &str) -> PodcastRecord {
        let podcast = PodcastRecord {
            id: Uuid::new_v4(),
            feed_url: format!("https://feeds.example.com/{slug}.xml"),
            title: title.to_string(),
            slug: slug.to_string(),
            subtitle: None,
            description: None,
            link: None,
            image_url: None,
            author: None,
            language: None,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        };
        self.state
            .lock()
            .expect("store lock")
            .podcasts
            .push(podcast.clone());
        podcast
    }

    pub fn podcasts(&self) -> Vec<PodcastRecord> {
        self.state.lock().expect("store lock").podcasts.clone()
    }

    pub fn interested(&self, listener: Uuid) -> BTreeSet<Uuid> {
        self.state
            .lock()
            .expect("store lock")
            .interested
            .get(&listener)
            .cloned()
            .unwrap_or_default()
    }

    pub fn subscribed(&self, listener: Uuid) -> BTreeSet<Uuid> {
        self.state
            .lock()
            .expect("store lock")
            .subscribed
            .get(&listener)
            .cloned()
            .unwrap_or_default()
    }

    pub fn settings(&self) -> PodcastsSettingsRecord {
        self.state
            .lock()
            .expect("store lock")
            .settings
            .clone()
            .expect("seeded settings")
    }

    pub fn site(&self) -> SiteRecord {
        self.state
            .lock()
            .expect("store lock")
            .site
            .clone()
            .expect("seeded site")
    }
}

#[async_trait]
impl PodcastsRepo for MemoryStore {
    async fn list_podcasts(&self) -> Result<Vec<PodcastRecord>, RepoError> {
        let mut podcasts = self.podcasts();
        podcasts.sort_by_key(|podcast| podcast.title.to_lowercase());
        Ok(podcasts)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<PodcastRecord>, RepoError> {
        Ok(self.podcasts().into_iter().find(|podcast| podcast.slug == slug))
    }

    async fn find_by_feed_url(&self, feed_url: &str) -> Result<Option<PodcastRecord>, RepoError> {
        Ok(self
            .podcasts()
            .into_iter()
            .find(|podcast| podcast.feed_url == feed_url))
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, RepoError> {
        Ok(self.podcasts().iter().any(|podcast| podcast.slug == slug))
    }

    async fn create_podcast(
        &self,
        params: CreatePodcastParams,
    ) -> Result<PodcastRecord, RepoError> {
        let mut state = self.state.lock().expect("store lock");
        if state.podcasts.iter().any(|p| p.feed_url == params.feed_url) {
            return Err(RepoError::Duplicate {
                constraint: "podcasts_feed_url_key".to_string(),
            });
        }
        if state.podcasts.iter().any(|p| p.slug == params.slug) {
            return Err(RepoError::Duplicate {
                constraint: "podcasts_slug_key".to_string(),
            });
        }

        let now = OffsetDateTime::now_utc();
        let podcast = PodcastRecord {
            id: Uuid::new_v4(),
            feed_url: params.feed_url,
            title: params.title,
            slug: params.slug,
            subtitle: params.subtitle,
            description: params.description,
            link: params.link,
            image_url: params.image_url,
            author: params.author,
            language: params.language,
            created_at: now,
            updated_at: now,
        };
        state.podcasts.push(podcast.clone());
        Ok(podcast)
    }
}

#[async_trait]
impl ListenersRepo for MemoryStore {
    async fn find_listener(&self, id: Uuid) -> Result<Option<ListenerRecord>, RepoError> {
        Ok(self
            .state
            .lock()
            .expect("store lock")
            .listeners
            .get(&id)
            .cloned())
    }

    async fn list_interested(&self, listener_id: Uuid) -> Result<Vec<PodcastRecord>, RepoError> {
        let interested = self.interested(listener_id);
        let mut podcasts: Vec<PodcastRecord> = self
            .podcasts()
            .into_iter()
            .filter(|podcast| interested.contains(&podcast.id))
            .collect();
        podcasts.sort_by_key(|podcast| podcast.title.to_lowercase());
        Ok(podcasts)
    }

    async fn list_subscribed_ids(&self, listener_id: Uuid) -> Result<Vec<Uuid>, RepoError> {
        Ok(self.subscribed(listener_id).into_iter().collect())
    }

    async fn add_interest(
        &self,
        listener_id: Uuid,
        podcast_id: Uuid,
        subscribe: bool,
    ) -> Result<(), RepoError> {
        let mut state = self.state.lock().expect("store lock");
        state
            .interested
            .entry(listener_id)
            .or_default()
            .insert(podcast_id);
        if subscribe {
            state
                .subscribed
                .entry(listener_id)
                .or_default()
                .insert(podcast_id);
        }
        Ok(())
    }

    async fn set_subscribed(
        &self,
        listener_id: Uuid,
        podcast_id: Uuid,
        subscribed: bool,
    ) -> Result<(), RepoError> {
        let mut state = self.state.lock().expect("store lock");
        let entry = state.subscribed.entry(listener_id).or_default();
        if subscribed {
            entry.insert(podcast_id);
        } else {
            entry.remove(&podcast_id);
        }
        Ok(())
    }

    async fn replace_subscriptions(
        &self,
        listener_id: Uuid,
        podcast_ids: &[Uuid],
    ) -> Result<(), RepoError> {
        let mut state = self.state.lock().expect("store lock");
        let interested = state
            .interested
            .get(&listener_id)
            .cloned()
            .unwrap_or_default();
        if let Some(outside) = podcast_ids.iter().find(|id| !interested.contains(id)) {
            return Err(RepoError::InvalidInput {
                message: format!("podcast {outside} is not in the interested pool"),
            });
        }
        state
            .subscribed
            .insert(listener_id, podcast_ids.iter().copied().collect());
        Ok(())
    }
}

#[async_trait]
impl SettingsRepo for MemoryStore {
    async fn load_podcasts_settings(&self) -> Result<PodcastsSettingsRecord, RepoError> {
        Ok(self.settings())
    }

    async fn upsert_podcasts_settings(
        &self,
        settings: PodcastsSettingsRecord,
    ) -> Result<(), RepoError> {
        self.state.lock().expect("store lock").settings = Some(settings);
        Ok(())
    }

    async fn load_site(&self) -> Result<SiteRecord, RepoError> {
        Ok(self.site())
    }

    async fn update_site_domain(&self, domain: &str) -> Result<SiteRecord, RepoError> {
        let mut state = self.state.lock().expect("store lock");
        let site = state.site.as_mut().ok_or(RepoError::NotFound)?;
        site.domain = domain.to_string();
        Ok(site.clone())
    }
}

#[async_trait]
impl HealthRepo for MemoryStore {
    async fn ping(&self) -> Result<(), RepoError> {
        Ok(())
    }
}

/// Feed fetcher answering from a fixed URL → feed table.
#[derive(Clone, Default)]
pub struct StubFeeds {
    feeds: Arc<Mutex<HashMap<String, FeedInfo>>>,
}

impl StubFeeds {
    pub fn with_feed(self, url: &str, title: &str) -> Self {
        self.feeds.lock().expect("feeds lock").insert(
            url.to_string(),
            FeedInfo {
                title: title.to_string(),
                subtitle: Some(format!("{title} subtitle")),
                description: Some(format!("{title} description")),
                link: None,
                image_url: None,
                author: Some("Host".to_string()),
                language: Some("en".to_string()),
                episode_count: 3,
            },
        );
        self
    }
}

#[async_trait]
impl FeedFetcher for StubFeeds {
    async fn fetch(&self, url: &Url) -> Result<FeedInfo, FeedFetchError> {
        self.feeds
            .lock()
            .expect("feeds lock")
            .get(url.as_str())
            .cloned()
            .ok_or(FeedFetchError::Status { status: 404 })
    }
}

pub fn podcast_service(store: &MemoryStore, feeds: StubFeeds) -> PodcastService {
    PodcastService::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(feeds),
    )
}

pub fn listener_service(store: &MemoryStore) -> ListenerSettingsService {
    ListenerSettingsService::new(Arc::new(store.clone()))
}

pub fn settings_service(store: &MemoryStore) -> SettingsService {
    SettingsService::with_env(
        Arc::new(store.clone()),
        Arc::new(|name: &str| match name {
            "HOME" => Some("/home/archivist".to_string()),
            "ARCHIVE_ROOT" => Some("/srv/archive".to_string()),
            _ => None,
        }),
    )
}

pub fn router(store: &MemoryStore, feeds: StubFeeds) -> Router {
    let state = HttpState {
        chrome: Arc::new(ChromeService::new(Arc::new(store.clone()))),
        podcasts: Arc::new(podcast_service(store, feeds)),
        listeners: Arc::new(listener_service(store)),
        settings: Arc::new(settings_service(store)),
        health: Arc::new(store.clone()),
    };
    http::build_router(state)
}

pub async fn get(router: &Router, uri: &str) -> Response {
    router
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response")
}

pub async fn post_form(router: &Router, uri: &str, body: &str) -> Response {
    router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .expect("request"),
        )
        .await
        .expect("response")
}

pub async fn body_text(response: Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
