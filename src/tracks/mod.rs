pub mod label;
pub mod selection;

pub use label::format_label;
pub use selection::{ResolutionMenu, derive_resolution_menu};

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// HDR transfer reported for a variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HdrType {
    /// Standard Dynamic Range
    #[default]
    #[serde(rename = "NONE", alias = "SDR")]
    Sdr,
    /// PQ (Perceptual Quantizer) - HDR10/HDR10+
    #[serde(rename = "PQ")]
    Pq,
    /// HLG (Hybrid Log-Gamma)
    #[serde(rename = "HLG")]
    Hlg,
}

impl HdrType {
    /// Check if this is any HDR format
    pub fn is_hdr(&self) -> bool {
        !matches!(self, HdrType::Sdr)
    }
}

/// Spatial layout of the video rendition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoLayout {
    #[serde(rename = "CH-MONO")]
    Mono,
    /// Stereoscopic (3D) video
    #[serde(rename = "CH-STEREO")]
    Stereo,
    #[serde(other)]
    Other,
}

/// Variant track as reported by the player.
///
/// Optional attributes stay `None` when the manifest does not carry them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: u64,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub channels_count: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub bandwidth: u64,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub frame_rate: Option<f64>,
    #[serde(default)]
    pub hdr: Option<HdrType>,
    #[serde(default)]
    pub video_layout: Option<VideoLayout>,
}

impl Track {
    /// Minimal track with only the fields needed for deduplication
    #[cfg(test)]
    pub fn new(id: u64, height: Option<u32>, bandwidth: u64) -> Self {
        Self {
            id,
            active: false,
            language: String::new(),
            channels_count: None,
            height,
            width: None,
            bandwidth,
            display_name: None,
            frame_rate: None,
            hdr: None,
            video_layout: None,
        }
    }

    /// Height and width, when both are known and non-zero
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        match (self.height, self.width) {
            (Some(h), Some(w)) if h > 0 && w > 0 => Some((h, w)),
            _ => None,
        }
    }

    /// Non-empty display name from the manifest
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref().filter(|name| !name.is_empty())
    }

    pub fn is_hdr(&self) -> bool {
        self.hdr.is_some_and(|hdr| hdr.is_hdr())
    }

    pub fn is_stereo(&self) -> bool {
        self.video_layout == Some(VideoLayout::Stereo)
    }

    /// Tracks sharing this key collapse into a single menu entry
    pub fn resolution_key(&self) -> (Option<u32>, u64) {
        (self.height, self.bandwidth)
    }
}

/// Parse a JSON array of tracks; ids must be unique
pub fn parse_tracks(json: &str) -> Result<Vec<Track>, AppError> {
    let tracks: Vec<Track> = serde_json::from_str(json)?;
    let mut ids = HashSet::new();
    if let Some(track) = tracks.iter().find(|t| !ids.insert(t.id)) {
        return Err(AppError::DuplicateTrackId(track.id));
    }
    Ok(tracks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tracks_camel_case() {
        let json = r#"[
            {"id": 1, "active": true, "language": "en", "channelsCount": 2,
             "height": 1080, "width": 1920, "bandwidth": 5000000,
             "frameRate": 29.97, "hdr": "PQ", "videoLayout": "CH-STEREO"},
            {"id": 2, "bandwidth": 800000}
        ]"#;
        let tracks = parse_tracks(json).unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].channels_count, Some(2));
        assert_eq!(tracks[0].hdr, Some(HdrType::Pq));
        assert!(tracks[0].is_stereo());
        assert!(tracks[0].is_hdr());
        assert!(!tracks[1].active);
        assert_eq!(tracks[1].dimensions(), None);
    }

    #[test]
    fn test_unknown_video_layout() {
        let json = r#"[{"id": 1, "bandwidth": 1, "videoLayout": "PAN"}]"#;
        let tracks = parse_tracks(json).unwrap();
        assert_eq!(tracks[0].video_layout, Some(VideoLayout::Other));
        assert!(!tracks[0].is_stereo());
    }

    #[test]
    fn test_sdr_is_not_hdr() {
        let json = r#"[{"id": 1, "bandwidth": 1, "hdr": "NONE"}]"#;
        let tracks = parse_tracks(json).unwrap();
        assert_eq!(tracks[0].hdr, Some(HdrType::Sdr));
        assert!(!tracks[0].is_hdr());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r#"[
            {"id": 1, "height": 1080, "bandwidth": 5000000},
            {"id": 2, "height": 720, "bandwidth": 3000000},
            {"id": 1, "height": 480, "bandwidth": 1000000}
        ]"#;
        assert!(matches!(parse_tracks(json), Err(AppError::DuplicateTrackId(1))));
    }

    #[test]
    fn test_empty_display_name_is_absent() {
        let mut track = Track::new(1, Some(720), 1);
        track.display_name = Some(String::new());
        assert_eq!(track.display_name(), None);
    }
}
