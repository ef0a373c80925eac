//! TikTok link extraction from free-form message text.

// lazy_regex! validates the pattern at compile time
#![allow(clippy::non_std_lazy_statics)]

use lazy_regex::lazy_regex;

/// Match TikTok links on the canonical and short-link hosts, up to the next whitespace.
static RE_TIKTOK_LINK: lazy_regex::Lazy<regex::Regex> =
    lazy_regex!(r"https?://(?:www\.)?(?:tiktok\.com|vt\.tiktok\.com)/[^\s]+");

/// Extracts up to `max_links` TikTok links from `text`, in order of appearance.
///
/// Links beyond the cap are ignored. Returns an empty `Vec` when nothing matches.
///
/// # Examples
///
/// ```
/// use tiktok_batch_bot::links::extract_links;
///
/// let links = extract_links("look https://vt.tiktok.com/ZS123/ nice", 5);
/// assert_eq!(links, vec!["https://vt.tiktok.com/ZS123/".to_string()]);
/// ```
#[must_use]
pub fn extract_links(text: &str, max_links: usize) -> Vec<String> {
    RE_TIKTOK_LINK
        .find_iter(text)
        .take(max_links)
        .map(|m| m.as_str().to_string())
        .collect()
}
