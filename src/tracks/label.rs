use super::Track;
use crate::player::PlayerState;
use phf::phf_map;

/// Friendly names for combined resolution/frame-rate display names, used in multi-angle mode.
/// Lookups are exact and case-sensitive.
pub static DISPLAY_NAME_OVERRIDES: phf::Map<&'static str, &'static str> = phf_map! {
    "2160p60" => "Very High 60FPS",
    "1080p60" => "High 60FPS",
    "720p60" => "Middle 60FPS",
    "480p60" => "Low 60FPS",
    "2160p" => "Very High",
    "1080p" => "High",
    "720p" => "Middle",
    "480p" => "Low",
};

const WIDESCREEN: f64 = 16.0 / 9.0;

/// Human-readable label for a variant track
pub fn format_label(track: &Track, state: &PlayerState) -> String {
    if let Some(name) = track.display_name() {
        if state.multi_angle {
            return DISPLAY_NAME_OVERRIDES
                .get(name)
                .copied()
                .unwrap_or(name)
                .to_string();
        }
        return name.to_string();
    }

    if state.is_audio_only && track.bandwidth > 0 {
        return format!("{} kbits/s", (track.bandwidth as f64 / 1000.0).round() as u64);
    }

    match track.dimensions() {
        Some((height, width)) => resolution_label(track, height, width),
        None => "Unknown".to_string(),
    }
}

fn resolution_label(track: &Track, height: u32, width: u32) -> String {
    // Ultra-wide frames report a short height for what is really a taller tier
    let height = if width as f64 / height as f64 > WIDESCREEN {
        (width as f64 * 9.0 / 16.0).round() as u32
    } else {
        height
    };

    let mut text = if height == 2160 {
        "4K".to_string()
    } else {
        format!("{}p", height)
    };

    if let Some(frame_rate) = track.frame_rate
        && frame_rate > 0.0
        && (frame_rate >= 50.0 || frame_rate <= 20.0)
    {
        text.push_str(&(frame_rate.round() as i64).to_string());
    }
    if track.is_hdr() {
        text.push_str(" (HDR)");
    }
    if track.is_stereo() {
        text.push_str(" (3D)");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracks::{HdrType, VideoLayout};

    fn video(height: u32, width: u32) -> Track {
        let mut track = Track::new(1, Some(height), 1_000_000);
        track.width = Some(width);
        track
    }

    #[test]
    fn test_plain_resolution() {
        assert_eq!(format_label(&video(1080, 1920), &PlayerState::default()), "1080p");
    }

    #[test]
    fn test_uhd_is_4k() {
        assert_eq!(format_label(&video(2160, 3840), &PlayerState::default()), "4K");
    }

    #[test]
    fn test_ultra_wide_corrects_height() {
        // 2.4:1 scope frame stored as 1920x800
        assert_eq!(format_label(&video(800, 1920), &PlayerState::default()), "1080p");
        assert_eq!(format_label(&video(1600, 3840), &PlayerState::default()), "4K");
    }

    #[test]
    fn test_high_frame_rate_suffix() {
        let mut track = video(720, 1280);
        track.frame_rate = Some(60.0);
        assert_eq!(format_label(&track, &PlayerState::default()), "720p60");

        track.frame_rate = Some(59.94);
        assert_eq!(format_label(&track, &PlayerState::default()), "720p60");
    }

    #[test]
    fn test_low_frame_rate_suffix() {
        let mut track = video(480, 854);
        track.frame_rate = Some(15.0);
        assert_eq!(format_label(&track, &PlayerState::default()), "480p15");
    }

    #[test]
    fn test_common_frame_rates_omitted() {
        let mut track = video(1080, 1920);
        for rate in [24.0, 25.0, 29.97, 30.0, 48.0] {
            track.frame_rate = Some(rate);
            assert_eq!(format_label(&track, &PlayerState::default()), "1080p");
        }
    }

    #[test]
    fn test_hdr_and_stereo_suffixes() {
        let mut track = video(1080, 1920);
        track.hdr = Some(HdrType::Pq);
        track.video_layout = Some(VideoLayout::Stereo);
        assert_eq!(
            format_label(&track, &PlayerState::default()),
            "1080p (HDR) (3D)"
        );

        track.hdr = Some(HdrType::Hlg);
        track.video_layout = Some(VideoLayout::Mono);
        track.frame_rate = Some(50.0);
        assert_eq!(format_label(&track, &PlayerState::default()), "1080p50 (HDR)");
    }

    #[test]
    fn test_audio_only_uses_bandwidth() {
        let mut track = Track::new(1, None, 128_499);
        let state = PlayerState {
            is_audio_only: true,
            ..PlayerState::default()
        };
        assert_eq!(format_label(&track, &state), "128 kbits/s");

        track.bandwidth = 96_500;
        assert_eq!(format_label(&track, &state), "97 kbits/s");
    }

    #[test]
    fn test_audio_only_without_bandwidth_falls_through() {
        let track = video(360, 640);
        let mut track = Track { bandwidth: 0, ..track };
        let state = PlayerState {
            is_audio_only: true,
            ..PlayerState::default()
        };
        assert_eq!(format_label(&track, &state), "360p");

        track.width = None;
        assert_eq!(format_label(&track, &state), "Unknown");
    }

    #[test]
    fn test_missing_dimensions_is_unknown() {
        let track = Track::new(1, Some(720), 1);
        assert_eq!(format_label(&track, &PlayerState::default()), "Unknown");

        let track = Track::new(1, Some(0), 1);
        let track = Track { width: Some(1280), ..track };
        assert_eq!(format_label(&track, &PlayerState::default()), "Unknown");
    }

    #[test]
    fn test_display_name_wins() {
        let mut track = video(1080, 1920);
        track.display_name = Some("1080p60".to_string());
        assert_eq!(format_label(&track, &PlayerState::default()), "1080p60");

        let multi_angle = PlayerState {
            multi_angle: true,
            ..PlayerState::default()
        };
        assert_eq!(format_label(&track, &multi_angle), "High 60FPS");
    }

    #[test]
    fn test_override_lookup_is_exact() {
        let multi_angle = PlayerState {
            multi_angle: true,
            ..PlayerState::default()
        };
        let mut track = video(1080, 1920);
        for name in ["1080P", "1080p ", "Director cut"] {
            track.display_name = Some(name.to_string());
            assert_eq!(format_label(&track, &multi_angle), name);
        }
        assert_eq!(DISPLAY_NAME_OVERRIDES.len(), 8);
        assert_eq!(DISPLAY_NAME_OVERRIDES.get("480p"), Some(&"Low"));
    }

    #[test]
    fn test_label_is_repeatable() {
        let mut track = video(2160, 3840);
        track.frame_rate = Some(120.0);
        track.hdr = Some(HdrType::Hlg);
        let state = PlayerState::default();
        assert_eq!(format_label(&track, &state), format_label(&track, &state));
        assert_eq!(format_label(&track, &state), "4K120 (HDR)");
    }
}
