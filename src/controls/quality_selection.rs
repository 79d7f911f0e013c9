use crate::config::UiConfig;
use crate::error::AppError;
use crate::i18n::{LocaleEvent, Localization};
use crate::player::{AbrConfig, PlayerConfiguration, PlayerEvent, PlayerService, PlayerState};
use crate::tracks::{ResolutionMenu, Track, derive_resolution_menu};
use tracing::{debug, info, warn};

type ChangeListener = Box<dyn FnMut(&ResolutionMenu)>;

/// Shell around the menu derivation.
///
/// Re-derives the menu on every player or locale notification and forwards
/// user choices back to the player.
pub struct QualitySelection<P, L> {
    player: P,
    localization: L,
    settings: UiConfig,
    menu: ResolutionMenu,
    listener: Option<ChangeListener>,
}

impl<P: PlayerService, L: Localization> QualitySelection<P, L> {
    pub fn new(player: P, localization: L, settings: UiConfig) -> Self {
        let menu = derive(&player, &localization, &settings);
        Self {
            player,
            localization,
            settings,
            menu,
            listener: None,
        }
    }

    /// Register the subscriber notified after every derivation, replacing any previous one
    pub fn on_change(&mut self, listener: impl FnMut(&ResolutionMenu) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn menu(&self) -> &ResolutionMenu {
        &self.menu
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }

    pub fn localization(&self) -> &L {
        &self.localization
    }

    pub fn localization_mut(&mut self) -> &mut L {
        &mut self.localization
    }

    pub fn handle_player_event(&mut self, event: PlayerEvent) {
        debug!("Player event {:?}", event);
        self.refresh();
    }

    pub fn handle_locale_event(&mut self, event: LocaleEvent) {
        debug!("Locale event {:?}", event);
        self.refresh();
    }

    /// Derive the menu from the current player state and notify the subscriber
    pub fn refresh(&mut self) -> &ResolutionMenu {
        self.menu = derive(&self.player, &self.localization, &self.settings);
        if let Some(listener) = self.listener.as_mut() {
            listener(&self.menu);
        }
        &self.menu
    }

    /// Pin a resolution; ABR must be off before the switch
    pub fn select_track(&mut self, track: &Track) -> Result<(), AppError> {
        let clear_buffer = self.settings.clear_buffer_on_quality_change;
        info!(
            "Selecting track {} ({} bps, clear_buffer={})",
            track.id, track.bandwidth, clear_buffer
        );
        let result = self
            .player
            .configure(PlayerConfiguration {
                abr: AbrConfig { enabled: false },
            })
            .and_then(|()| self.player.select_variant_track(track, clear_buffer));
        if let Err(e) = &result {
            warn!("Failed to select track {}: {}", track.id, e);
            // ABR may already be off
            self.refresh();
        }
        result
    }

    /// Pin the resolution shown at `index` in the current menu
    pub fn select_option(&mut self, index: usize) -> Result<(), AppError> {
        let track = self
            .menu
            .options
            .get(index)
            .map(|option| option.track.clone())
            .ok_or_else(|| AppError::Player {
                message: format!("no menu option at index {}", index),
            })?;
        self.select_track(&track)
    }

    /// Hand control back to ABR; the player picks the next variant itself
    pub fn enable_auto(&mut self) -> Result<(), AppError> {
        info!("Enabling automatic quality");
        if let Err(e) = self.player.configure(PlayerConfiguration {
            abr: AbrConfig { enabled: true },
        }) {
            warn!("Failed to enable ABR: {}", e);
            return Err(e);
        }
        self.refresh();
        Ok(())
    }
}

fn derive<P: PlayerService, L: Localization>(
    player: &P,
    localization: &L,
    settings: &UiConfig,
) -> ResolutionMenu {
    let state = PlayerState::capture(
        player,
        settings.show_audio_channel_count_variants,
        settings.multi_angle,
    );
    derive_resolution_menu(&player.variant_tracks(), &state, localization)
}
