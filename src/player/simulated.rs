use super::{LoadMode, PlayerConfiguration, PlayerEvent, PlayerService};
use crate::error::AppError;
use crate::tracks::{Track, parse_tracks};
use std::fmt;
use tracing::{debug, info};

/// Commands received by the simulated player, in order
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    Configure(PlayerConfiguration),
    SelectVariant { track_id: u64, clear_buffer: bool },
}

impl fmt::Display for PlayerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerCommand::Configure(config) => {
                write!(f, "configure abr={}", if config.abr.enabled { "on" } else { "off" })
            }
            PlayerCommand::SelectVariant {
                track_id,
                clear_buffer,
            } => write!(f, "select track {} (clear buffer: {})", track_id, clear_buffer),
        }
    }
}

/// In-memory player with a minimal bandwidth-driven ABR
#[derive(Debug, Clone, Default)]
pub struct SimulatedPlayer {
    tracks: Vec<Track>,
    load_mode: LoadMode,
    config: PlayerConfiguration,
    audio_only: bool,
    events: Vec<PlayerEvent>,
    commands: Vec<PlayerCommand>,
}

impl SimulatedPlayer {
    pub fn new(tracks: Vec<Track>) -> Self {
        let mut player = Self::default();
        player.load_tracks(tracks);
        player
    }

    pub fn from_json(json: &str) -> Result<Self, AppError> {
        Ok(Self::new(parse_tracks(json)?))
    }

    pub fn with_load_mode(mut self, load_mode: LoadMode) -> Self {
        self.load_mode = load_mode;
        self
    }

    pub fn with_audio_only(mut self, audio_only: bool) -> Self {
        self.audio_only = audio_only;
        self
    }

    /// Replace the track list, keeping exactly one track active
    pub fn load_tracks(&mut self, mut tracks: Vec<Track>) {
        let active = tracks
            .iter()
            .find(|t| t.active)
            .or_else(|| tracks.iter().max_by_key(|t| t.bandwidth))
            .map(|t| t.id);
        for track in &mut tracks {
            track.active = Some(track.id) == active;
        }
        self.tracks = tracks;
        self.events.push(PlayerEvent::TracksChanged);
    }

    pub fn active_track(&self) -> Option<&Track> {
        self.tracks.iter().find(|t| t.active)
    }

    /// Drain pending notifications
    pub fn take_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn commands(&self) -> &[PlayerCommand] {
        &self.commands
    }

    /// Let ABR pick a variant for the given bandwidth estimate.
    ///
    /// Only variants in the active language are considered. Returns true if
    /// the active variant changed.
    pub fn adapt(&mut self, estimate_bps: u64) -> bool {
        if !self.config.abr.enabled {
            return false;
        }
        let language = self.active_track().map(|t| t.language.clone());
        let candidates = self
            .tracks
            .iter()
            .filter(|t| language.as_ref().is_none_or(|l| &t.language == l));
        let chosen = candidates
            .clone()
            .filter(|t| t.bandwidth <= estimate_bps)
            .max_by_key(|t| t.bandwidth)
            .or_else(|| candidates.min_by_key(|t| t.bandwidth))
            .map(|t| t.id);

        match chosen {
            Some(id) if self.active_track().map(|t| t.id) != Some(id) => {
                debug!("ABR switching to track {} for {} bps", id, estimate_bps);
                self.activate(id);
                true
            }
            _ => false,
        }
    }

    fn activate(&mut self, id: u64) {
        for track in &mut self.tracks {
            track.active = track.id == id;
        }
        self.events.push(PlayerEvent::VariantChanged);
    }
}

impl PlayerService for SimulatedPlayer {
    fn load_mode(&self) -> LoadMode {
        self.load_mode
    }

    fn variant_tracks(&self) -> Vec<Track> {
        self.tracks.clone()
    }

    fn configuration(&self) -> PlayerConfiguration {
        self.config
    }

    fn configure(&mut self, config: PlayerConfiguration) -> Result<(), AppError> {
        self.commands.push(PlayerCommand::Configure(config));
        if self.config.abr != config.abr {
            info!("ABR {}", if config.abr.enabled { "enabled" } else { "disabled" });
            self.events.push(PlayerEvent::AbrStatusChanged);
        }
        self.config = config;
        Ok(())
    }

    fn select_variant_track(&mut self, track: &Track, clear_buffer: bool) -> Result<(), AppError> {
        if !self.tracks.iter().any(|t| t.id == track.id) {
            return Err(AppError::Player {
                message: format!("no variant track with id {}", track.id),
            });
        }
        if self.config.abr.enabled {
            return Err(AppError::Player {
                message: "variant selected while ABR is enabled".to_string(),
            });
        }
        self.commands.push(PlayerCommand::SelectVariant {
            track_id: track.id,
            clear_buffer,
        });
        self.activate(track.id);
        Ok(())
    }

    fn is_audio_only(&self) -> bool {
        self.audio_only
    }
}
