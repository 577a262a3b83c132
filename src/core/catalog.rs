use crate::core::error::Result;
use crate::core::{PlayerType, StreamCatalog, StreamVariant};
use serde::Deserialize;

const JSON_MARKER: &str = "json=";

#[derive(Debug, Deserialize)]
struct FlashVars {
    video: VideoSection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoSection {
    video_references: Vec<VideoReference>,
    #[serde(default)]
    subtitle_references: Vec<SubtitleReference>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoReference {
    url: String,
    bitrate: u32,
    player_type: PlayerType,
}

#[derive(Debug, Deserialize)]
struct SubtitleReference {
    #[serde(default)]
    url: Option<String>,
}

/// Decode the player's flashvars blob into a stream catalog.
///
/// Variants keep page order; sorting is the selector's job.
pub fn parse_catalog(blob: &str) -> Result<StreamCatalog> {
    let json = blob.trim();
    let json = json.strip_prefix(JSON_MARKER).unwrap_or(json);

    let flash_vars: FlashVars = serde_json::from_str(json)?;
    let video = flash_vars.video;

    let subtitle_url = video
        .subtitle_references
        .into_iter()
        .next()
        .and_then(|s| s.url)
        .filter(|url| !url.is_empty());

    let variants: Vec<StreamVariant> = video
        .video_references
        .into_iter()
        .map(|r| StreamVariant::new(r.url, r.bitrate, r.player_type))
        .collect();

    tracing::debug!(
        "Parsed {} stream variants, subtitles: {}",
        variants.len(),
        subtitle_url.is_some()
    );

    Ok(StreamCatalog {
        variants,
        subtitle_url,
    })
}
