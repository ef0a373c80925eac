//! Per-message download pipeline.
//!
//! Extracts links from a message, announces the batch, then resolves and sends each link
//! in order. A failing link is reported to the chat and never stops the rest of the batch.

use crate::bot::transport::{ChatSink, SendError};
use crate::caption::{batch_summary, failure_notice, format_caption};
use crate::links::extract_links;
use crate::lookup::{LookupError, VideoResolver};
use tracing::{info, warn};

/// What happened to a single link.
#[derive(Debug)]
pub enum LinkOutcome {
    /// The video was sent to the chat
    Delivered,
    /// Metadata lookup failed
    LookupFailed(LookupError),
    /// The lookup succeeded but the video could not be delivered
    SendFailed(SendError),
}

impl LinkOutcome {
    /// Returns `true` if the video reached the chat.
    #[must_use]
    pub const fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

/// Outcome of one link, tagged with its part index.
#[derive(Debug)]
pub struct LinkReport {
    /// 1-based part index
    pub index: usize,
    /// Link as it appeared in the message
    pub link: String,
    /// Result of processing the link
    pub outcome: LinkOutcome,
}

/// Summary of a handled message. Empty when the message had no links.
#[derive(Debug, Default)]
pub struct DispatchReport {
    /// Per-link results in processing order
    pub links: Vec<LinkReport>,
}

impl DispatchReport {
    /// Number of videos delivered.
    #[must_use]
    pub fn delivered(&self) -> usize {
        self.links.iter().filter(|r| r.outcome.is_delivered()).count()
    }

    /// Number of links that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.links.len() - self.delivered()
    }
}

/// Handle one text message: extract up to `max_links` links and relay each video.
///
/// Nothing is sent when the text has no links.
///
/// # Errors
///
/// Returns `SendError` only if the batch summary cannot be sent; in that case no link is
/// processed. Per-link failures are reported in the returned [`DispatchReport`].
pub async fn process_message(
    text: &str,
    max_links: usize,
    resolver: &dyn VideoResolver,
    sink: &dyn ChatSink,
) -> Result<DispatchReport, SendError> {
    let links = extract_links(text, max_links);
    if links.is_empty() {
        return Ok(DispatchReport::default());
    }

    info!("Found {} link(s), starting batch", links.len());
    sink.send_text(&batch_summary(links.len())).await?;

    let mut report = DispatchReport::default();
    for (idx, link) in links.into_iter().enumerate() {
        let index = idx + 1;
        let outcome = process_link(index, &link, resolver, sink).await;

        match &outcome {
            LinkOutcome::Delivered => info!(part = index, "Video delivered"),
            LinkOutcome::LookupFailed(e) => {
                warn!(part = index, link = %link, error = %e, "Lookup failed");
            }
            LinkOutcome::SendFailed(e) => {
                warn!(part = index, link = %link, error = %e, "Video send failed");
            }
        }

        if !outcome.is_delivered() {
            if let Err(e) = sink.send_text(&failure_notice(index)).await {
                warn!(part = index, error = %e, "Failed to send failure notice");
            }
        }

        report.links.push(LinkReport {
            index,
            link,
            outcome,
        });
    }

    Ok(report)
}

async fn process_link(
    index: usize,
    link: &str,
    resolver: &dyn VideoResolver,
    sink: &dyn ChatSink,
) -> LinkOutcome {
    let media = match resolver.resolve(link).await {
        Ok(media) => media,
        Err(e) => return LinkOutcome::LookupFailed(e),
    };

    let caption = format_caption(index, Some(&media.title));

    let Some(video_url) = media.video_url else {
        return LinkOutcome::SendFailed(SendError::MissingVideoUrl);
    };

    match sink.send_video(&video_url, &caption).await {
        Ok(()) => LinkOutcome::Delivered,
        Err(e) => LinkOutcome::SendFailed(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::transport::MockChatSink;
    use crate::config::MAX_LINKS;
    use crate::lookup::{MockVideoResolver, ResolvedMedia};
    use mockall::Sequence;

    fn media(url: &str, title: &str) -> ResolvedMedia {
        ResolvedMedia {
            video_url: Some(url.to_string()),
            title: title.to_string(),
        }
    }

    #[tokio::test]
    async fn test_no_links_sends_nothing() -> Result<(), SendError> {
        let mut resolver = MockVideoResolver::new();
        resolver.expect_resolve().never();
        let mut sink = MockChatSink::new();
        sink.expect_send_text().never();
        sink.expect_send_video().never();

        let report = process_message("hello there", MAX_LINKS, &resolver, &sink).await?;
        assert!(report.links.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_single_link_without_title() -> Result<(), SendError> {
        let mut seq = Sequence::new();
        let mut resolver = MockVideoResolver::new();
        resolver
            .expect_resolve()
            .withf(|link| link == "https://vt.tiktok.com/abc/")
            .times(1)
            .returning(|_| Ok(media("https://cdn.example/v.mp4", "Video TikTok")));

        let mut sink = MockChatSink::new();
        sink.expect_send_text()
            .withf(|t| t == "📦 Menemukan 1 link. Menyiapkan batch download...")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        sink.expect_send_video()
            .withf(|url, caption| {
                url == "https://cdn.example/v.mp4" && caption == "Part 1 Video TikTok"
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let report =
            process_message("https://vt.tiktok.com/abc/", MAX_LINKS, &resolver, &sink).await?;
        assert_eq!(report.delivered(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_single_link_lookup_failure_notice() -> Result<(), SendError> {
        let mut seq = Sequence::new();
        let mut resolver = MockVideoResolver::new();
        resolver
            .expect_resolve()
            .returning(|_| Err(LookupError::Status { status: 500 }));

        let mut sink = MockChatSink::new();
        sink.expect_send_text()
            .withf(|t| t.starts_with("📦 Menemukan 1 link"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        sink.expect_send_text()
            .withf(|t| t == "❌ Gagal memproses Part 1")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        sink.expect_send_video().never();

        let report =
            process_message("https://vt.tiktok.com/abc/", MAX_LINKS, &resolver, &sink).await?;
        assert!(matches!(
            report.links[0].outcome,
            LinkOutcome::LookupFailed(LookupError::Status { status: 500 })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_middle_failure_does_not_abort_batch() -> Result<(), SendError> {
        let mut seq = Sequence::new();
        let mut resolver = MockVideoResolver::new();
        resolver.expect_resolve().times(3).returning(|link| {
            if link.ends_with("/2") {
                Err(LookupError::Network("connection reset".into()))
            } else {
                Ok(media("https://cdn.example/v.mp4", "t"))
            }
        });

        let mut sink = MockChatSink::new();
        sink.expect_send_text()
            .withf(|t| t.starts_with("📦 Menemukan 3 link"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        sink.expect_send_video()
            .withf(|_, caption| caption == "Part 1 t")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        sink.expect_send_text()
            .withf(|t| t == "❌ Gagal memproses Part 2")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        sink.expect_send_video()
            .withf(|_, caption| caption == "Part 3 t")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let text = "https://vt.tiktok.com/1 https://vt.tiktok.com/2 https://vt.tiktok.com/3";
        let report = process_message(text, MAX_LINKS, &resolver, &sink).await?;
        assert_eq!(report.delivered(), 2);
        assert_eq!(report.failed(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_video_url_is_send_failure() -> Result<(), SendError> {
        let mut resolver = MockVideoResolver::new();
        resolver.expect_resolve().returning(|_| {
            Ok(ResolvedMedia {
                video_url: None,
                title: "Video TikTok".into(),
            })
        });

        let mut sink = MockChatSink::new();
        sink.expect_send_text().times(2).returning(|_| Ok(()));
        sink.expect_send_video().never();

        let report =
            process_message("https://www.tiktok.com/@a/video/1", MAX_LINKS, &resolver, &sink)
                .await?;
        assert!(matches!(
            report.links[0].outcome,
            LinkOutcome::SendFailed(SendError::MissingVideoUrl)
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_rejected_video_gets_same_notice() -> Result<(), SendError> {
        let mut resolver = MockVideoResolver::new();
        resolver
            .expect_resolve()
            .returning(|_| Ok(media("https://cdn.example/gone.mp4", "x")));

        let mut sink = MockChatSink::new();
        sink.expect_send_text()
            .withf(|t| t.starts_with("📦"))
            .times(1)
            .returning(|_| Ok(()));
        sink.expect_send_video()
            .returning(|_, _| Err(SendError::Telegram("Bad Request: wrong file".into())));
        sink.expect_send_text()
            .withf(|t| t == "❌ Gagal memproses Part 1")
            .times(1)
            .returning(|_| Ok(()));

        let report =
            process_message("https://vt.tiktok.com/z/", MAX_LINKS, &resolver, &sink).await?;
        assert!(matches!(report.links[0].outcome, LinkOutcome::SendFailed(_)));
        Ok(())
    }

    #[tokio::test]
    async fn test_summary_failure_stops_batch() {
        let mut resolver = MockVideoResolver::new();
        resolver.expect_resolve().never();
        let mut sink = MockChatSink::new();
        sink.expect_send_text()
            .times(1)
            .returning(|_| Err(SendError::Telegram("chat not found".into())));

        let result =
            process_message("https://vt.tiktok.com/z/", MAX_LINKS, &resolver, &sink).await;
        assert!(result.is_err());
    }
}
