use serde::{Deserialize, Serialize};

/// Quality menu behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// List variants that differ only by audio channel count
    pub show_audio_channel_count_variants: bool,
    /// Flush buffered media when the user picks a resolution
    pub clear_buffer_on_quality_change: bool,
    /// Multi-angle presentation: friendly display names, no 360p entry
    pub multi_angle: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_audio_channel_count_variants: false,
            clear_buffer_on_quality_change: true,
            multi_angle: false,
        }
    }
}
