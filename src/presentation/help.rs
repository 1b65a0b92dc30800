//! Labels and help texts shown next to form fields.
//!
//! Help texts are trusted markup and rendered unescaped.

use crate::domain::naming::{UNIFYING_EPISODE_SEGMENTS, resolve_segments};

pub const FEED_URL_LABEL: &str = "Feed URL";
pub const FEED_URL_HELP: &str = "The RSS or Atom feed of the podcast you want to archive";

pub const SUBSCRIBED_PODCASTS_LABEL: &str = "Subscribed Podcasts";
pub const SUBSCRIBED_PODCASTS_HELP: &str =
    "Podcasts checked here will be included in periodic feed refreshes";
pub const SUBSCRIBED_PODCASTS_EMPTY_HELP: &str =
    "(Podcasts you add will appear here to refresh them periodically)";
pub const SUBSCRIBED_PODCASTS_LONG_HELP: &str = "\
<p>Contains a list of checkboxes for all the podcasts you have added to the \
archive. When a podcast is checked, it is 'subscribed to' and will therefore \
be included not only in the periodic feed refreshes (i.e. gathering newly \
published episodes), but also have new episodes downloaded automatically.</p>\
<p>This setting is also available on each podcast's individual details page \
as the <span class=\"toggle-chip\">Subscribe</span> toggle.</p>";

pub const STORAGE_DIRECTORY_LABEL: &str = "Storage Directory";
pub const STORAGE_DIRECTORY_HELP: &str = "Absolute path that downloaded episodes are stored under";
pub const STORAGE_DIRECTORY_LONG_HELP: &str = "\
<p>The Storage Directory is the root of all your downloaded podcast episodes. \
It has to be set once before any episodes are downloaded. Changing it later \
on is not officially supported and strongly advised against.</p>\
<p>References to the user's home <code>~</code>, and available environment \
variables like <code>$HOME</code> and <code>$USER</code> will be expanded \
only once before the settings are saved.</p>";

pub const NAMING_SCHEME_LABEL: &str = "Episode Naming Scheme";
pub const NAMING_SCHEME_ROWS: u32 = 4;

const NAMING_SCHEME_HELP_TEMPLATE: &str = "\
<p class=\"help-line\">Make the archive structure your own. The following segments are supported:</p>\
<p class=\"help-line naming-scheme-segments\"><b>Feed-based segments:</b> {podcast_segments}</p>\
<p class=\"help-line naming-scheme-segments\"><b>Episode-based segments:</b> {episode_segments}</p>\
<p>Click on one of these to add them to the input field above!</p>";

pub const SITE_DOMAIN_LABEL: &str = "Site Domain";
pub const SITE_DOMAIN_HELP: &str =
    "Will be used to prefix absolute URLs (for example links in emails)";
pub const SITE_DOMAIN_LONG_HELP: &str = "\
<p>The Site Domain is a site-wide setting that affects places where an \
absolute URL of a page is generated. This mostly applies to emails sent by \
the system that contain links to pages.</p>\
<p class=\"help-line\">In case you are running the app in a subfolder behind \
a reverse-proxy, you should include the subfolder in the Site Domain to make \
sure internal (i.e. relative) URLs resolve properly:</p>\
<p><code>example.com/fancysubfolder/</code></p>\
<p class=\"help-line\">In case you are running the app via HTTPS with no \
redirects from HTTP, your Site Domain should include the protocol:</p>\
<p><code>https://example.com/</code></p>";

/// Help for the subscription checkboxes; switches wording when there is
/// nothing to choose from yet.
pub fn subscribed_podcasts_help(has_choices: bool) -> &'static str {
    if has_choices {
        SUBSCRIBED_PODCASTS_HELP
    } else {
        SUBSCRIBED_PODCASTS_EMPTY_HELP
    }
}

pub fn naming_scheme_help() -> String {
    resolve_segments(NAMING_SCHEME_HELP_TEMPLATE)
}

pub fn naming_scheme_long_help() -> String {
    let unifying = UNIFYING_EPISODE_SEGMENTS
        .iter()
        .map(|segment| format!("<code>{{{segment}}}</code>"))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "<p>The Episode Naming Scheme is used to create all filenames when \
         episodes are downloaded into the archive storage directory. Each \
         <code>{{segment}}</code> placeholder is replaced by the matching \
         episode or podcast property, and dates accept a format such as \
         <code>{{episode_date:%Y-%m-%d}}</code>. The available properties are \
         listed below the field.</p>\
         <p>Please note that the scheme must contain at least one of these \
         segments to ensure a unique name: {unifying}</p>"
    )
}
