//! Player Module
//!
//! Contract of the media player the quality menu drives. The player owns
//! ABR, buffering and the actual track switch; the menu only queries it and
//! issues commands.

pub mod simulated;

pub use simulated::SimulatedPlayer;

use crate::error::AppError;
use crate::tracks::Track;
use serde::{Deserialize, Serialize};

/// How the current content was loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoadMode {
    /// Native playback element; variant tracks describe languages, not resolutions
    SrcEquals,
    /// Adaptive streaming through the player's own pipeline
    #[default]
    MediaSource,
}

/// ABR section of the player configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbrConfig {
    pub enabled: bool,
}

impl Default for AbrConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Player configuration as far as the menu is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerConfiguration {
    pub abr: AbrConfig,
}

/// Notifications emitted by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    VariantChanged,
    TracksChanged,
    AbrStatusChanged,
}

/// Player service consumed by the quality menu
pub trait PlayerService {
    fn load_mode(&self) -> LoadMode;
    fn variant_tracks(&self) -> Vec<Track>;
    fn configuration(&self) -> PlayerConfiguration;
    fn configure(&mut self, config: PlayerConfiguration) -> Result<(), AppError>;
    fn select_variant_track(&mut self, track: &Track, clear_buffer: bool) -> Result<(), AppError>;
    fn is_audio_only(&self) -> bool;
}

/// Snapshot of the player and UI state a menu derivation depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerState {
    pub load_mode: LoadMode,
    pub abr_enabled: bool,
    pub is_audio_only: bool,
    pub show_audio_channel_count_variants: bool,
    /// Multi-angle presentation: friendly display names, no 360p entry
    pub multi_angle: bool,
}

impl PlayerState {
    /// Capture the player's side of the state; UI flags come from the caller
    pub fn capture(
        player: &dyn PlayerService,
        show_audio_channel_count_variants: bool,
        multi_angle: bool,
    ) -> Self {
        Self {
            load_mode: player.load_mode(),
            abr_enabled: player.configuration().abr.enabled,
            is_audio_only: player.is_audio_only(),
            show_audio_channel_count_variants,
            multi_angle,
        }
    }
}
