//! Captions for relayed videos.
//!
//! A caption is `Part {index} {title}`, with the title cut to a fixed length and replaced
//! by a default when missing. Markup is applied later by the Telegram transport.

use crate::config::{DEFAULT_TITLE, TITLE_MAX_CHARS};
use crate::utils::{is_blank, truncate_str};

/// Returns a displayable title: the default for a missing or blank title, otherwise the
/// first `TITLE_MAX_CHARS` characters.
#[must_use]
pub fn safe_title(title: Option<&str>) -> String {
    match title {
        Some(t) if !is_blank(Some(t)) => truncate_str(t, TITLE_MAX_CHARS),
        _ => DEFAULT_TITLE.to_string(),
    }
}

/// Formats the caption for the video at 1-based position `index` in the batch.
///
/// # Examples
///
/// ```
/// use tiktok_batch_bot::caption::format_caption;
///
/// assert_eq!(format_caption(1, None), "Part 1 Video TikTok");
/// assert_eq!(format_caption(2, Some("dance")), "Part 2 dance");
/// ```
#[must_use]
pub fn format_caption(index: usize, title: Option<&str>) -> String {
    format!("Part {index} {}", safe_title(title))
}

/// Text sent in place of a video when a link could not be processed.
#[must_use]
pub fn failure_notice(index: usize) -> String {
    format!("❌ Gagal memproses Part {index}")
}

/// Text announcing how many links were found in a message.
#[must_use]
pub fn batch_summary(count: usize) -> String {
    format!("📦 Menemukan {count} link. Menyiapkan batch download...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_title_for_missing_or_empty() {
        assert!(format_caption(1, None).contains("Video TikTok"));
        assert!(format_caption(1, Some("")).contains("Video TikTok"));
        assert!(format_caption(3, Some("   ")).contains("Video TikTok"));
    }

    #[test]
    fn test_long_title_truncated_to_fifty_chars() {
        let title = "a".repeat(49) + "bcdefghij";
        let caption = format_caption(1, Some(&title));
        let expected: String = title.chars().take(50).collect();
        assert_eq!(caption, format!("Part 1 {expected}"));
        assert!(!caption.contains('c'));
    }

    #[test]
    fn test_unicode_title_truncation() {
        let title = "🎵".repeat(60);
        let caption = format_caption(1, Some(&title));
        assert_eq!(caption.chars().filter(|c| *c == '🎵').count(), 50);
    }

    #[test]
    fn test_caption_is_pure() {
        assert_eq!(format_caption(4, Some("x")), format_caption(4, Some("x")));
        assert_ne!(format_caption(0, Some("x")), format_caption(1, Some("x")));
    }

    #[test]
    fn test_notices() {
        assert_eq!(failure_notice(2), "❌ Gagal memproses Part 2");
        assert_eq!(
            batch_summary(1),
            "📦 Menemukan 1 link. Menyiapkan batch download..."
        );
    }
}
