use super::{Track, format_label};
use crate::i18n::{Localization, keys};
use crate::player::{LoadMode, PlayerState};
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// One selectable resolution in the menu
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolutionOption {
    pub label: String,
    pub is_selected: bool,
    pub track: Track,
}

/// Rendering-ready result of a menu derivation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolutionMenu {
    /// Localized menu title
    pub title: String,
    /// Options ordered by descending bandwidth
    pub options: Vec<ResolutionOption>,
    /// Localized text of the "Auto" entry
    pub auto_label: String,
    pub auto_selected: bool,
    /// Current-value summary, `None` when nothing is highlighted
    pub header_label: Option<String>,
    /// The whole control should be hidden
    pub hidden: bool,
}

impl ResolutionMenu {
    #[cfg(test)]
    pub fn selected_option(&self) -> Option<&ResolutionOption> {
        self.options.iter().find(|option| option.is_selected)
    }

    /// Text for the current-value summary, empty when unresolved
    pub fn header_text(&self) -> &str {
        self.header_label.as_deref().unwrap_or_default()
    }
}

/// Derive the resolution menu from the player's variant tracks.
///
/// Pure: identical inputs always produce an identical menu.
pub fn derive_resolution_menu(
    tracks: &[Track],
    state: &PlayerState,
    localization: &dyn Localization,
) -> ResolutionMenu {
    // With src= the variants describe languages, not resolutions
    let mut retained: Vec<&Track> = match state.load_mode {
        LoadMode::SrcEquals => Vec::new(),
        LoadMode::MediaSource => tracks.iter().collect(),
    };

    let selected = retained.iter().copied().find(|track| track.active);
    if let Some(selected) = selected {
        retained.retain(|track| {
            same_audio(track, selected, state.show_audio_channel_count_variants)
        });
    }

    let mut seen = HashSet::new();
    retained.retain(|track| seen.insert(track.resolution_key()));

    // Stable, so equal bandwidths keep their input order
    retained.sort_by(|a, b| b.bandwidth.cmp(&a.bandwidth));

    let hidden = retained.is_empty();

    let options: Vec<ResolutionOption> = retained
        .iter()
        .filter(|track| !(state.multi_angle && track.display_name() == Some("360p")))
        .map(|track| ResolutionOption {
            label: format_label(track, state),
            is_selected: !state.abr_enabled
                && selected.is_some_and(|selected| std::ptr::eq(*track, selected)),
            track: (*track).clone(),
        })
        .collect();

    let auto_label = localization.resolve(keys::AUTO_QUALITY);
    let header_label = if state.abr_enabled {
        Some(auto_label.clone())
    } else {
        options
            .iter()
            .find(|option| option.is_selected)
            .map(|option| option.label.clone())
    };

    debug!(
        input = tracks.len(),
        options = options.len(),
        abr = state.abr_enabled,
        hidden,
        "Derived resolution menu"
    );

    ResolutionMenu {
        title: localization.resolve(keys::RESOLUTION),
        options,
        auto_label,
        auto_selected: state.abr_enabled,
        header_label,
        hidden,
    }
}

/// Whether `track` plays the same audio as the active track
fn same_audio(track: &Track, selected: &Track, show_channel_variants: bool) -> bool {
    if track.language != selected.language {
        return false;
    }
    if !show_channel_variants
        && let (Some(channels), Some(selected_channels)) = (
            known_channels(track.channels_count),
            known_channels(selected.channels_count),
        )
        && channels != selected_channels
    {
        return false;
    }
    true
}

fn known_channels(count: Option<u32>) -> Option<u32> {
    count.filter(|&c| c > 0)
}
