//! Rewrites external links into embeddable form.
//!
//! Recognized providers are YouTube and Google Slides. Anything else, and
//! anything that fails to parse as a URL, passes through unchanged; a bad
//! link is a degraded row, never an error.

use tracing::warn;
use url::Url;

const SLIDES_EMBED_SUFFIX: &str = "/embed?start=false&loop=false&delayms=3000";

/// Normalize a link for an iframe.
///
/// YouTube watch, short, and embed links all become
/// `https://www.youtube.com/embed/{id}`; Google Slides `/edit` links become
/// `/embed` links; everything else is returned as given.
#[must_use]
pub fn embed_url(raw: &str) -> String {
    let Ok(parsed) = Url::parse(raw) else {
        warn!(url = %raw, "unparseable embed url; passing through");
        return raw.to_string();
    };
    let Some(host) = parsed.host_str() else {
        return raw.to_string();
    };

    if host.contains("youtube.com") || host.contains("youtu.be") {
        if let Some(id) = youtube_video_id(&parsed, host) {
            return format!("https://www.youtube.com/embed/{id}");
        }
        return raw.to_string();
    }

    if host.contains("docs.google.com") && parsed.path().contains("/presentation/") {
        let path = parsed.path();
        // Published links are already embeddable.
        if !path.contains("/embed") && !path.contains("/pub") {
            if let Some(idx) = raw.find("/edit") {
                return format!("{}{SLIDES_EMBED_SUFFIX}", &raw[..idx]);
            }
        }
    }

    raw.to_string()
}

/// Extract the video id. Priority order: `v=` query param, `youtu.be` path,
/// an already-present `/embed/` path segment.
fn youtube_video_id(parsed: &Url, host: &str) -> Option<String> {
    if let Some((_, id)) = parsed.query_pairs().find(|(key, _)| key == "v") {
        if !id.is_empty() {
            return Some(id.into_owned());
        }
    }

    if host.contains("youtu.be") {
        let id = parsed.path().trim_start_matches('/');
        if !id.is_empty() {
            return Some(id.to_string());
        }
    }

    if let Some((_, id)) = parsed.path().split_once("/embed/") {
        if !id.is_empty() {
            return Some(id.to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::embed_url;

    #[test]
    fn youtube_short_link_becomes_embed_form() {
        assert_eq!(
            embed_url("https://youtu.be/abc123"),
            "https://www.youtube.com/embed/abc123"
        );
    }

    #[test]
    fn youtube_watch_link_becomes_embed_form() {
        assert_eq!(
            embed_url("https://www.youtube.com/watch?v=xyz"),
            "https://www.youtube.com/embed/xyz"
        );
    }

    #[test]
    fn youtube_embed_link_is_normalized_in_place() {
        assert_eq!(
            embed_url("https://youtube.com/embed/abc123?rel=0"),
            "https://www.youtube.com/embed/abc123"
        );
    }

    #[test]
    fn youtube_link_without_an_id_passes_through() {
        assert_eq!(
            embed_url("https://www.youtube.com/feed/subscriptions"),
            "https://www.youtube.com/feed/subscriptions"
        );
    }

    #[test]
    fn slides_edit_link_becomes_embed_link() {
        assert_eq!(
            embed_url("https://docs.google.com/presentation/d/deadbeef/edit#slide=id.p"),
            "https://docs.google.com/presentation/d/deadbeef/embed?start=false&loop=false&delayms=3000"
        );
    }

    #[test]
    fn published_slides_link_passes_through() {
        let published = "https://docs.google.com/presentation/d/e/deadbeef/pub?start=false";
        assert_eq!(embed_url(published), published);
    }

    #[test]
    fn unrecognized_and_malformed_urls_pass_through() {
        assert_eq!(embed_url("https://example.com/foo"), "https://example.com/foo");
        assert_eq!(embed_url("not a url at all"), "not a url at all");
    }
}
