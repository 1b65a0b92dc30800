//! HTTP feed fetcher backed by `reqwest` and `feed-rs`.

use async_trait::async_trait;
use feed_rs::model::{Feed, FeedType};
use reqwest::{Client, header::CONTENT_LENGTH};
use tracing::debug;
use url::Url;

use crate::application::feeds::{FeedFetchError, FeedFetcher, FeedInfo};
use crate::config::FeedSettings;

use super::error::InfraError;

#[derive(Clone)]
pub struct HttpFeedFetcher {
    client: Client,
    max_body_bytes: u64,
}

impl HttpFeedFetcher {
    pub fn new(settings: &FeedSettings) -> Result<Self, InfraError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|err| InfraError::feed(format!("failed to build http client: {err}")))?;

        Ok(Self {
            client,
            max_body_bytes: settings.max_body_bytes.get(),
        })
    }
}

#[async_trait]
impl FeedFetcher for HttpFeedFetcher {
    async fn fetch(&self, url: &Url) -> Result<FeedInfo, FeedFetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| FeedFetchError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedFetchError::Status {
                status: status.as_u16(),
            });
        }

        let declared = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<u64>().ok());
        if declared.is_some_and(|len| len > self.max_body_bytes) {
            return Err(FeedFetchError::TooLarge {
                limit: self.max_body_bytes,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| FeedFetchError::Transport(err.to_string()))?;
        if body.len() as u64 > self.max_body_bytes {
            return Err(FeedFetchError::TooLarge {
                limit: self.max_body_bytes,
            });
        }

        debug!(
            target = "podarchive::feeds",
            feed_url = %url,
            bytes = body.len(),
            "feed downloaded"
        );

        parse_feed(&body)
    }
}

/// Parse raw RSS/Atom bytes into the channel metadata the archive keeps.
pub fn parse_feed(body: &[u8]) -> Result<FeedInfo, FeedFetchError> {
    let feed = feed_rs::parser::parse(body).map_err(|err| FeedFetchError::Parse(err.to_string()))?;
    feed_info(feed)
}

fn feed_info(feed: Feed) -> Result<FeedInfo, FeedFetchError> {
    let title = feed
        .title
        .map(|text| text.content.trim().to_string())
        .filter(|title| !title.is_empty())
        .ok_or(FeedFetchError::MissingTitle)?;

    let description = feed
        .description
        .map(|text| text.content.trim().to_string())
        .filter(|value| !value.is_empty());
    // feed-rs files Atom's <subtitle> under `description` and drops itunes:subtitle.
    let subtitle = match feed.feed_type {
        FeedType::Atom => description.clone(),
        _ => None,
    };
    let link = feed.links.first().map(|link| link.href.clone());
    let image_url = feed
        .logo
        .or(feed.icon)
        .map(|image| image.uri)
        .filter(|uri| !uri.is_empty());
    let author = feed
        .authors
        .first()
        .map(|person| person.name.trim().to_string())
        .filter(|name| !name.is_empty());
    let language = feed.language.filter(|value| !value.trim().is_empty());

    Ok(FeedInfo {
        title,
        subtitle,
        description,
        link,
        image_url,
        author,
        language,
        episode_count: feed.entries.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Night Shift Radio</title>
    <link>https://nightshift.example.com/</link>
    <description>Stories told after midnight.</description>
    <language>en-us</language>
    <item>
      <title>Episode 2</title>
      <guid>ns-2</guid>
      <enclosure url="https://cdn.example.com/ns-2.mp3" length="1" type="audio/mpeg"/>
    </item>
    <item>
      <title>Episode 1</title>
      <guid>ns-1</guid>
      <enclosure url="https://cdn.example.com/ns-1.mp3" length="1" type="audio/mpeg"/>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn parses_rss_channel_metadata() {
        let info = parse_feed(RSS.as_bytes()).expect("valid feed");
        assert_eq!(info.title, "Night Shift Radio");
        assert_eq!(
            info.description.as_deref(),
            Some("Stories told after midnight.")
        );
        assert_eq!(info.language.as_deref(), Some("en-us"));
        assert_eq!(info.episode_count, 2);
        assert!(
            info.link
                .as_deref()
                .is_some_and(|link| link.starts_with("https://nightshift.example.com"))
        );
    }

    #[test]
    fn atom_subtitle_is_kept() {
        let atom = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Field Notes</title>
  <subtitle>Recorded outdoors</subtitle>
  <id>urn:uuid:60a76c80-d399-11d9-b93C-0003939e0af6</id>
  <updated>2026-10-01T18:30:02Z</updated>
</feed>"#;
        let info = parse_feed(atom.as_bytes()).expect("valid atom feed");
        assert_eq!(info.title, "Field Notes");
        assert_eq!(info.subtitle.as_deref(), Some("Recorded outdoors"));
    }

    #[test]
    fn rss_channels_have_no_subtitle() {
        let info = parse_feed(RSS.as_bytes()).expect("valid feed");
        assert_eq!(info.subtitle, None);
    }

    #[test]
    fn html_pages_are_not_feeds() {
        let html = "<!doctype html><html><head><title>Hi</title></head><body></body></html>";
        assert!(matches!(
            parse_feed(html.as_bytes()),
            Err(FeedFetchError::Parse(_))
        ));
    }

    #[test]
    fn feeds_without_title_are_rejected() {
        let rss = r#"<rss version="2.0"><channel><description>x</description></channel></rss>"#;
        assert!(matches!(
            parse_feed(rss.as_bytes()),
            Err(FeedFetchError::MissingTitle | FeedFetchError::Parse(_))
        ));
    }
}
