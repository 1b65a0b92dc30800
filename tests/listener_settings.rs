mod support;

use axum::http::StatusCode;
use podarchive::application::listeners::{
    ListenerSettingsError, SUBSCRIBED_PODCASTS_FIELD, UpdateSubscriptionsCommand,
};
use podarchive::presentation::help::{SUBSCRIBED_PODCASTS_EMPTY_HELP, SUBSCRIBED_PODCASTS_HELP};
use uuid::Uuid;

use support::{MemoryStore, StubFeeds, body_text, get, listener_service, post_form, router};

#[tokio::test]
async fn choices_are_limited_to_interested_podcasts_in_title_order() {
    let store = MemoryStore::new();
    let listener = store.add_listener("ada");
    let other = store.add_listener("grace");
    let zebra = store.add_podcast("zebra talk", "zebra-talk");
    let aardvark = store.add_podcast("Aardvark Hour", "aardvark-hour");
    let foreign = store.add_podcast("Someone Else's Show", "someone-elses-show");

    let podcasts = support::podcast_service(&store, StubFeeds::default());
    podcasts.detail(&zebra.slug, Some(listener)).await.expect("view zebra");
    podcasts
        .toggle_subscription(&aardvark.slug, listener)
        .await
        .expect("subscribe aardvark");
    podcasts.detail(&foreign.slug, Some(other)).await.expect("other view");

    let form = listener_service(&store)
        .load_form(listener)
        .await
        .expect("form");

    let titles: Vec<&str> = form.choices.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, ["Aardvark Hour", "zebra talk"]);
    assert_eq!(form.selected_ids(), vec![aardvark.id]);
}

#[tokio::test]
async fn empty_selection_unsubscribes_from_everything() {
    let store = MemoryStore::new();
    let listener = store.add_listener("ada");
    let podcast = store.add_podcast("Deep Dive", "deep-dive");
    support::podcast_service(&store, StubFeeds::default())
        .toggle_subscription(&podcast.slug, listener)
        .await
        .expect("subscribe");

    let form = listener_service(&store)
        .update(UpdateSubscriptionsCommand {
            listener_id: listener,
            subscribed_podcasts: Vec::new(),
        })
        .await
        .expect("empty selection is valid");

    assert!(form.selected_ids().is_empty());
    assert_eq!(
        form,
        listener_service(&store)
            .load_form(listener)
            .await
            .expect("reload")
    );
    assert!(store.subscribed(listener).is_empty());
    assert!(store.interested(listener).contains(&podcast.id));
}

#[tokio::test]
async fn podcasts_outside_the_pool_are_rejected() {
    let store = MemoryStore::new();
    let listener = store.add_listener("ada");
    let foreign = store.add_podcast("Not Yours", "not-yours");

    let err = listener_service(&store)
        .update(UpdateSubscriptionsCommand {
            listener_id: listener,
            subscribed_podcasts: vec![foreign.id.to_string(), "garbage".to_string()],
        })
        .await
        .expect_err("not in pool");

    let ListenerSettingsError::Invalid { errors, .. } = err else {
        panic!("expected form errors");
    };
    let messages = errors.for_field(SUBSCRIBED_PODCASTS_FIELD);
    assert_eq!(messages.len(), 2);
    assert!(messages[0].contains(&foreign.id.to_string()));
    assert!(messages[1].contains("garbage"));
    assert!(store.subscribed(listener).is_empty());
}

#[tokio::test]
async fn unknown_listener_is_not_found() {
    let store = MemoryStore::new();

    let err = listener_service(&store)
        .load_form(Uuid::new_v4())
        .await
        .expect_err("no such listener");
    assert!(matches!(err, ListenerSettingsError::NotFound));

    let app = router(&store, StubFeeds::default());
    let response = get(&app, &format!("/listeners/{}/settings", Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn help_text_switches_when_the_pool_is_empty() {
    let store = MemoryStore::new();
    let listener = store.add_listener("ada");
    let app = router(&store, StubFeeds::default());

    let empty = body_text(get(&app, &format!("/listeners/{listener}/settings")).await).await;
    assert!(empty.contains(SUBSCRIBED_PODCASTS_EMPTY_HELP));

    let podcast = store.add_podcast("Deep Dive", "deep-dive");
    get(&app, &format!("/podcasts/{}?listener={listener}", podcast.slug)).await;

    let populated = body_text(get(&app, &format!("/listeners/{listener}/settings")).await).await;
    assert!(populated.contains(SUBSCRIBED_PODCASTS_HELP));
    assert!(populated.contains("Deep Dive"));
}

#[tokio::test]
async fn repeated_checkbox_values_are_saved() {
    let store = MemoryStore::new();
    let listener = store.add_listener("ada");
    let first = store.add_podcast("Alpha", "alpha");
    let second = store.add_podcast("Beta", "beta");
    let podcasts = support::podcast_service(&store, StubFeeds::default());
    podcasts.detail("alpha", Some(listener)).await.expect("view");
    podcasts.detail("beta", Some(listener)).await.expect("view");
    let app = router(&store, StubFeeds::default());

    let body = format!(
        "subscribed_podcasts={}&subscribed_podcasts={}",
        first.id, second.id
    );
    let response = post_form(&app, &format!("/listeners/{listener}/settings"), &body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let subscribed = store.subscribed(listener);
    assert!(subscribed.contains(&first.id));
    assert!(subscribed.contains(&second.id));
}
