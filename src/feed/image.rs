use rand::seq::IndexedRandom;
use url::Url;

use crate::feed::parser::FeedEntry;

/// Hosts that reject hot-linked images.
const BLOCKED_HOSTS: [&str; 2] = ["cdn-images-1.medium.com", "miro.medium.com"];

/// Cover images used when an entry has no usable media of its own.
pub const FALLBACK_IMAGES: [&str; 5] = [
    "https://i.imgur.com/WdL07ie.jpg",
    "https://i.imgur.com/AfEZyX9.jpg",
    "https://i.imgur.com/8j0Pb4v.jpg",
    "https://i.imgur.com/4Z5xK3E.jpg",
    "https://i.imgur.com/7Tv4l3S.jpg",
];

/// Picks a cover image for an entry.
///
/// Media content is preferred over the thumbnail. A candidate is skipped when
/// it is empty, does not parse as a URL, or lives on a blocked host.
/// Protocol-relative URLs (`//host/img.jpg`) are completed with `https:`.
/// With no usable candidate a fallback image is drawn at random on every
/// call.
pub fn resolve_image(entry: &FeedEntry) -> String {
    [&entry.media_content, &entry.media_thumbnail]
        .into_iter()
        .flatten()
        .find_map(|candidate| usable_url(candidate))
        .unwrap_or_else(fallback_image)
}

fn usable_url(candidate: &str) -> Option<String> {
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return None;
    }
    let absolute = match candidate.strip_prefix("//") {
        Some(rest) => format!("https://{rest}"),
        None => candidate.to_string(),
    };
    let url = match Url::parse(&absolute) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!(url = %candidate, error = %e, "Ignoring unparseable media URL");
            return None;
        }
    };
    let host = url.host_str()?;
    if BLOCKED_HOSTS.iter().any(|blocked| host.contains(blocked)) {
        return None;
    }
    Some(absolute)
}

fn fallback_image() -> String {
    FALLBACK_IMAGES
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(FALLBACK_IMAGES[0])
        .to_string()
}
