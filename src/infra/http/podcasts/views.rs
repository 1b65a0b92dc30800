use time::{format_description::FormatItem, macros::format_description};
use uuid::Uuid;

use crate::application::chrome::with_listener;
use crate::application::forms::FormErrors;
use crate::application::podcasts::{FEED_URL_FIELD, PodcastDetail};
use crate::domain::entities::PodcastRecord;
use crate::presentation::help;
use crate::presentation::views::{
    FormFieldView, NewPodcastFormView, PodcastDetailView, PodcastListItemView, PodcastListView,
    SubscribeToggleView,
};

const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

pub(super) fn list_view(podcasts: &[PodcastRecord], listener: Option<Uuid>) -> PodcastListView {
    PodcastListView {
        heading: "Podcasts".to_string(),
        items: podcasts
            .iter()
            .map(|podcast| PodcastListItemView {
                title: podcast.title.clone(),
                href: with_listener(&format!("/podcasts/{}", podcast.slug), listener),
                author: podcast.author.clone(),
                description: podcast.description.clone(),
            })
            .collect(),
        new_href: with_listener("/podcasts/new", listener),
        empty_message: "No podcasts have been added yet.".to_string(),
    }
}

pub(super) fn new_form_view(
    feed_url: &str,
    errors: Option<&FormErrors>,
    listener: Option<Uuid>,
) -> NewPodcastFormView {
    NewPodcastFormView {
        heading: "Add a podcast".to_string(),
        form_action: with_listener("/podcasts/new", listener),
        feed_url: FormFieldView {
            name: FEED_URL_FIELD.to_string(),
            label: help::FEED_URL_LABEL.to_string(),
            value: feed_url.trim().to_string(),
            help_html: help::FEED_URL_HELP.to_string(),
            errors: errors
                .map(|errors| errors.for_field(FEED_URL_FIELD).to_vec())
                .unwrap_or_default(),
            placeholder: Some("https://example.com/feed.xml".to_string()),
            ..FormFieldView::default()
        },
        form_errors: errors
            .map(|errors| errors.non_field().to_vec())
            .unwrap_or_default(),
        submit_label: "Add podcast".to_string(),
    }
}

pub(super) fn detail_view(detail: &PodcastDetail, listener: Option<Uuid>) -> PodcastDetailView {
    let podcast = &detail.podcast;
    let subscribe = match (detail.subscribed, listener) {
        (Some(subscribed), Some(_)) => Some(SubscribeToggleView {
            action: with_listener(&format!("/podcasts/{}/subscribe", podcast.slug), listener),
            subscribed,
            label: if subscribed { "Subscribed" } else { "Subscribe" }.to_string(),
        }),
        _ => None,
    };

    PodcastDetailView {
        title: podcast.title.clone(),
        subtitle: podcast.subtitle.clone(),
        feed_url: podcast.feed_url.clone(),
        link: podcast.link.clone(),
        image_url: podcast.image_url.clone(),
        author: podcast.author.clone(),
        language: podcast.language.clone(),
        description: podcast.description.clone(),
        added_at: podcast
            .created_at
            .format(DATE_FORMAT)
            .unwrap_or_else(|_| podcast.created_at.date().to_string()),
        subscribe,
    }
}
