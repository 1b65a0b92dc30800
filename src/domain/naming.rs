//! Episode naming scheme segments.
//!
//! A naming scheme is a format string such as
//! `{podcast_slug}/{episode_date:%Y-%m-%d}_{episode_slug}`. Every placeholder
//! must name one of the segments below; `{{` and `}}` are literal braces.

use thiserror::Error;

pub const PODCAST_SEGMENTS: &[&str] = &[
    "podcast_slug",
    "podcast_title",
    "podcast_subtitle",
    "podcast_type",
    "podcast_language",
    "podcast_updated",
    "podcast_id",
];

pub const EPISODE_SEGMENTS: &[&str] = &[
    "episode_slug",
    "episode_id",
    "episode_title",
    "episode_subtitle",
    "episode_type",
    "episode_number",
    "episode_date",
    "episode_season",
];

/// Segments that tell two episodes of the same podcast apart.
pub const UNIFYING_EPISODE_SEGMENTS: &[&str] =
    &["episode_slug", "episode_id", "episode_date", "episode_number"];

pub const DEFAULT_NAMING_SCHEME: &str = "{podcast_slug}/{episode_date}_{episode_slug}";

const PODCAST_PLACEHOLDER: &str = "{podcast_segments}";
const EPISODE_PLACEHOLDER: &str = "{episode_segments}";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NamingSchemeError {
    #[error("The naming scheme cannot be empty")]
    Empty,
    #[error("Unbalanced braces at position {position}; use {{{{ or }}}} for literal braces")]
    UnbalancedBraces { position: usize },
    #[error("Empty segment at position {position}")]
    EmptySegment { position: usize },
    #[error("Unknown segment `{name}`")]
    UnknownSegment { name: String },
    #[error(
        "The naming scheme must contain at least one of {{episode_slug}}, {{episode_id}}, {{episode_date}}, {{episode_number}}"
    )]
    MissingUnifyingSegment,
}

pub fn is_known_segment(name: &str) -> bool {
    PODCAST_SEGMENTS.contains(&name) || EPISODE_SEGMENTS.contains(&name)
}

/// Render segment names as clickable code chips for form help text.
pub fn segments_html(segments: &[&str]) -> String {
    segments
        .iter()
        .map(|segment| {
            format!(
                "<code class=\"naming-segment\" data-segment=\"{segment}\">{{{segment}}}</code>"
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fill the `{podcast_segments}` and `{episode_segments}` placeholders of a
/// help-text template with the supported segment lists.
pub fn resolve_segments(template: &str) -> String {
    template
        .replace(PODCAST_PLACEHOLDER, &segments_html(PODCAST_SEGMENTS))
        .replace(EPISODE_PLACEHOLDER, &segments_html(EPISODE_SEGMENTS))
}

/// Extract the segment names referenced by a scheme, in order of appearance.
pub fn referenced_segments(scheme: &str) -> Result<Vec<String>, NamingSchemeError> {
    let mut segments = Vec::new();
    let mut chars = scheme.char_indices().peekable();

    while let Some((position, ch)) = chars.next() {
        match ch {
            '{' => {
                if matches!(chars.peek(), Some((_, '{'))) {
                    chars.next();
                    continue;
                }

                let mut field = String::new();
                let mut closed = false;
                for (_, inner) in chars.by_ref() {
                    match inner {
                        '}' => {
                            closed = true;
                            break;
                        }
                        '{' => return Err(NamingSchemeError::UnbalancedBraces { position }),
                        other => field.push(other),
                    }
                }
                if !closed {
                    return Err(NamingSchemeError::UnbalancedBraces { position });
                }

                let name = field
                    .split([':', '!'])
                    .next()
                    .unwrap_or_default()
                    .trim();
                if name.is_empty() {
                    return Err(NamingSchemeError::EmptySegment { position });
                }
                segments.push(name.to_string());
            }
            '}' => {
                if matches!(chars.peek(), Some((_, '}'))) {
                    chars.next();
                    continue;
                }
                return Err(NamingSchemeError::UnbalancedBraces { position });
            }
            _ => {}
        }
    }

    Ok(segments)
}

/// Check that a scheme only uses known segments and can produce unique names.
pub fn validate_naming_scheme(scheme: &str) -> Result<(), NamingSchemeError> {
    if scheme.trim().is_empty() {
        return Err(NamingSchemeError::Empty);
    }

    let segments = referenced_segments(scheme)?;

    if let Some(unknown) = segments.iter().find(|name| !is_known_segment(name)) {
        return Err(NamingSchemeError::UnknownSegment {
            name: unknown.clone(),
        });
    }

    if !segments
        .iter()
        .any(|name| UNIFYING_EPISODE_SEGMENTS.contains(&name.as_str()))
    {
        return Err(NamingSchemeError::MissingUnifyingSegment);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scheme_is_valid() {
        assert_eq!(validate_naming_scheme(DEFAULT_NAMING_SCHEME), Ok(()));
    }

    #[test]
    fn format_specs_and_literal_braces_are_accepted() {
        let scheme = "{podcast_slug}/{{archive}}/{episode_date:%Y-%m-%d} {episode_number:03}";
        assert_eq!(
            referenced_segments(scheme).expect("segments"),
            vec!["podcast_slug", "episode_date", "episode_number"]
        );
        assert_eq!(validate_naming_scheme(scheme), Ok(()));
    }

    #[test]
    fn scheme_without_unifying_segment_is_rejected() {
        assert_eq!(
            validate_naming_scheme("{podcast_slug}/{episode_title}"),
            Err(NamingSchemeError::MissingUnifyingSegment)
        );
    }

    #[test]
    fn unknown_segment_is_rejected() {
        assert_eq!(
            validate_naming_scheme("{podcast_slug}/{episode_slugg}"),
            Err(NamingSchemeError::UnknownSegment {
                name: "episode_slugg".to_string()
            })
        );
    }

    #[test]
    fn unbalanced_braces_are_rejected() {
        assert_eq!(
            validate_naming_scheme("{podcast_slug/{episode_slug}"),
            Err(NamingSchemeError::UnbalancedBraces { position: 0 })
        );
        assert_eq!(
            validate_naming_scheme("{episode_slug}}"),
            Err(NamingSchemeError::UnbalancedBraces { position: 14 })
        );
        assert_eq!(
            validate_naming_scheme("{episode_slug"),
            Err(NamingSchemeError::UnbalancedBraces { position: 0 })
        );
    }

    #[test]
    fn empty_placeholder_is_rejected() {
        assert_eq!(
            validate_naming_scheme("{episode_slug}-{}"),
            Err(NamingSchemeError::EmptySegment { position: 15 })
        );
    }

    #[test]
    fn blank_scheme_is_rejected() {
        assert_eq!(validate_naming_scheme("  "), Err(NamingSchemeError::Empty));
    }

    #[test]
    fn resolve_segments_lists_both_groups() {
        let resolved = resolve_segments("<b>Feed:</b> {podcast_segments} <b>Episode:</b> {episode_segments}");
        assert!(!resolved.contains("{podcast_segments}"));
        assert!(!resolved.contains("{episode_segments}"));
        assert!(resolved.contains(
            "<code class=\"naming-segment\" data-segment=\"podcast_slug\">{podcast_slug}</code>"
        ));
        assert!(resolved.contains("data-segment=\"episode_season\""));
    }

    #[test]
    fn segments_html_joins_with_spaces() {
        insta::assert_snapshot!(
            segments_html(&["episode_id", "episode_date"]),
            @r#"<code class="naming-segment" data-segment="episode_id">{episode_id}</code> <code class="naming-segment" data-segment="episode_date">{episode_date}</code>"#
        );
    }
}
