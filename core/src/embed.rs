use urlencoding::encode;

use crate::models::{ContentType, PlayRequest};

pub const DEFAULT_EMBED_BASE_URL: &str = "https://vidsrc.to/embed";

/// Builds the embed URL for a request. Season and episode are passed
/// through as given.
pub fn build_embed_url(base: &str, request: &PlayRequest) -> String {
    let base = base.trim().trim_end_matches('/');
    let id = encode(request.id.trim());
    match request.content_type {
        ContentType::Movie => format!("{}/{}/{}", base, ContentType::Movie.path_segment(), id),
        ContentType::Series => format!(
            "{}/{}/{}/{}/{}",
            base,
            ContentType::Series.path_segment(),
            id,
            request.season,
            request.episode
        ),
    }
}
