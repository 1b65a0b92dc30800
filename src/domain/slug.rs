//! Utilities for generating deterministic, human-friendly slugs.
//!
//! The helpers here bridge ASCII slugification (`slug` crate) with Chinese
//! transliteration (`pinyin` crate) so podcast titles like “声东击西” become
//! `sheng-dong-ji-xi`. Consumers provide their own uniqueness predicate to
//! avoid persistence conflicts while keeping the slug generation logic pure.

use std::future::Future;

use pinyin::{Pinyin, ToPinyin};
use slug::slugify;
use thiserror::Error;

/// Errors that can occur while generating a slug.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlugError {
    #[error("slug source text is empty")]
    EmptyInput,
    #[error("failed to derive slug from `{input}`")]
    Unrepresentable { input: String },
    #[error("slug length limit {max_len} leaves no room for a suffix")]
    LimitTooSmall { max_len: usize },
}

/// Errors that can occur while generating a slug via an async uniqueness check.
#[derive(Debug, Error)]
pub enum SlugAsyncError<E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    #[error(transparent)]
    Slug(#[from] SlugError),
    #[error(transparent)]
    Predicate(E),
}

/// Derive a base slug from the provided human-readable text.
pub fn derive_slug(input: &str) -> Result<String, SlugError> {
    if input.trim().is_empty() {
        return Err(SlugError::EmptyInput);
    }

    let transliterated = transliterate_to_ascii(input);
    let candidate = slugify(&transliterated);

    if candidate.is_empty() {
        return Err(SlugError::Unrepresentable {
            input: input.to_string(),
        });
    }

    Ok(candidate)
}

/// Cut a slug down to `max_len` bytes without leaving a dangling separator.
pub fn truncate_slug(slug: &str, max_len: usize) -> &str {
    if slug.len() <= max_len {
        return slug;
    }

    let mut end = max_len;
    while !slug.is_char_boundary(end) {
        end -= 1;
    }
    slug[..end].trim_end_matches('-')
}

/// Build the `n`-th collision candidate for `base`, keeping it within `max_len`.
///
/// The base is shortened just enough to fit `-{n}`, so `max_len` is an upper
/// bound for every candidate.
pub fn suffixed_candidate(base: &str, n: u64, max_len: usize) -> Result<String, SlugError> {
    let suffix = format!("-{n}");
    if suffix.len() >= max_len {
        return Err(SlugError::LimitTooSmall { max_len });
    }
    let head = truncate_slug(base, max_len - suffix.len());
    Ok(format!("{head}{suffix}"))
}

/// Synchronous counterpart of [`generate_unique_slug_async`].
#[cfg(test)]
fn generate_unique_slug<F>(
    input: &str,
    max_len: usize,
    mut is_unique: F,
) -> Result<String, SlugError>
where
    F: FnMut(&str) -> bool,
{
    let derived = derive_slug(input)?;
    let base = truncate_slug(&derived, max_len);

    if is_unique(base) {
        return Ok(base.to_string());
    }

    let mut attempt = 1_u64;
    loop {
        let candidate = suffixed_candidate(&derived, attempt, max_len)?;
        if is_unique(&candidate) {
            return Ok(candidate);
        }
        attempt += 1;
    }
}

/// Produce a slug that does not collide according to the supplied predicate.
///
/// `is_unique` must resolve to `true` when the candidate does not exist yet.
/// Collisions are retried by suffixing a monotonic counter (`-1`, `-2`, …)
/// until a free candidate is found.
pub async fn generate_unique_slug_async<F, Fut, E>(
    input: &str,
    max_len: usize,
    mut is_unique: F,
) -> Result<String, SlugAsyncError<E>>
where
    F: FnMut(&str) -> Fut,
    Fut: Future<Output = Result<bool, E>>,
    E: std::error::Error + Send + Sync + 'static,
{
    let derived = derive_slug(input)?;
    let base = truncate_slug(&derived, max_len);

    if is_unique(base).await.map_err(SlugAsyncError::Predicate)? {
        return Ok(base.to_string());
    }

    let mut attempt = 1_u64;
    loop {
        let candidate = suffixed_candidate(&derived, attempt, max_len)?;
        if is_unique(&candidate)
            .await
            .map_err(SlugAsyncError::Predicate)?
        {
            return Ok(candidate);
        }
        attempt += 1;
    }
}

fn transliterate_to_ascii(input: &str) -> String {
    let mut output = String::with_capacity(input.len());

    for ch in input.chars() {
        if ch.is_ascii() {
            output.push(ch);
            continue;
        }

        match ch.to_pinyin() {
            Some(py) => append_pinyin(&mut output, py),
            None if ch.is_whitespace() => output.push(' '),
            None => {
                // Preserve unhandled characters so slugify can decide how to filter them.
                output.push(ch);
            }
        }
    }

    output
}

fn append_pinyin(buffer: &mut String, pinyin: Pinyin) {
    if !buffer.is_empty() && !buffer.ends_with(' ') {
        buffer.push(' ');
    }
    buffer.push_str(pinyin.plain());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_slug_lowercases_and_dashes() {
        let slug = derive_slug("The Changelog: Software & More").expect("slug");
        assert_eq!(slug, "the-changelog-software-more");
    }

    #[test]
    fn derive_slug_transliterates_chinese() {
        let slug = derive_slug("Rust 基础教程").expect("slug");
        assert_eq!(slug, "rust-ji-chu-jiao-cheng");
    }

    #[test]
    fn derive_slug_rejects_blank_input() {
        assert_eq!(derive_slug("   "), Err(SlugError::EmptyInput));
    }

    #[test]
    fn generate_unique_slug_starts_counting_at_one() {
        let mut existing = vec!["darknet-diaries".to_string()];
        let slug = generate_unique_slug("Darknet Diaries", 50, |candidate| {
            if existing.iter().any(|slug| slug == candidate) {
                false
            } else {
                existing.push(candidate.to_string());
                true
            }
        })
        .expect("unique slug");

        assert_eq!(slug, "darknet-diaries-1");
    }

    #[test]
    fn generate_unique_slug_skips_taken_suffixes() {
        let existing = ["news", "news-1", "news-2", "news-3"];
        let slug = generate_unique_slug("News", 50, |candidate| !existing.contains(&candidate))
            .expect("unique slug");
        assert_eq!(slug, "news-4");
    }

    #[test]
    fn suffixed_candidates_never_exceed_limit() {
        let title = "a very long podcast title that keeps going well past the slug limit";
        let mut taken: Vec<String> = Vec::new();

        for _ in 0..120 {
            let slug = generate_unique_slug(title, 50, |candidate| {
                !taken.iter().any(|slug| slug == candidate)
            })
            .expect("unique slug");
            assert!(slug.len() <= 50, "`{slug}` exceeds the limit");
            assert!(!taken.contains(&slug));
            taken.push(slug);
        }

        assert!(taken.contains(&"a-very-long-podcast-title-that-keeps-going-well-1".to_string()));
        assert!(taken.contains(&"a-very-long-podcast-title-that-keeps-going-wel-100".to_string()));
    }

    #[test]
    fn truncation_drops_trailing_separator() {
        assert_eq!(truncate_slug("abc-def", 4), "abc");
        assert_eq!(truncate_slug("abc", 10), "abc");
    }

    #[test]
    fn suffix_requires_room() {
        assert_eq!(
            suffixed_candidate("abc", 10, 3),
            Err(SlugError::LimitTooSmall { max_len: 3 })
        );
    }

    #[tokio::test]
    async fn generate_unique_slug_async_works() {
        use std::sync::Arc;
        use tokio::sync::Mutex;

        let existing = Arc::new(Mutex::new(vec!["reply-all".to_string()]));

        let slug = generate_unique_slug_async("Reply All", 50, |candidate| {
            let existing = existing.clone();
            let candidate = candidate.to_string();
            async move {
                let mut guard = existing.lock().await;
                if guard.contains(&candidate) {
                    Ok::<bool, std::convert::Infallible>(false)
                } else {
                    guard.push(candidate);
                    Ok::<bool, std::convert::Infallible>(true)
                }
            }
        })
        .await
        .expect("unique slug");

        assert_eq!(slug, "reply-all-1");
        let guard = existing.lock().await;
        assert!(guard.contains(&slug));
    }
}
