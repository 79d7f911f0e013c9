mod app;
mod config;
mod controls;
mod error;
mod i18n;
mod player;
mod tracks;
mod ui;
mod utils;

use anyhow::Context;
use app::App;
use clap::Parser;
use config::QualityMenuConfig;
use controls::QualitySelection;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use i18n::Catalog;
use player::{AbrConfig, LoadMode, PlayerConfiguration, PlayerService, SimulatedPlayer};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracks::ResolutionMenu;

const SAMPLE_TRACKS: &str = include_str!("../assets/sample_tracks.json");

/// Resolution selection menu for a simulated adaptive-streaming player
#[derive(Parser, Debug)]
#[command(name = "quality-menu", version, about)]
struct Cli {
    /// JSON file with the player's variant tracks (defaults to a sample ladder)
    #[arg(long)]
    tracks: Option<PathBuf>,

    /// Locale for menu strings
    #[arg(long)]
    locale: Option<String>,

    /// Content is audio only
    #[arg(long)]
    audio_only: bool,

    /// Content was loaded through a native element (src=)
    #[arg(long)]
    src_equals: bool,

    /// Use friendly names for multi-angle content
    #[arg(long)]
    multi_angle: bool,

    /// Keep variants that differ only in audio channel count
    #[arg(long)]
    show_channel_variants: bool,

    /// Start with ABR disabled
    #[arg(long)]
    manual: bool,

    /// Initial simulated network bandwidth in bits per second
    #[arg(long, default_value_t = 6_000_000)]
    bandwidth: u64,

    /// Print the derived menu and exit
    #[arg(long)]
    print: bool,

    /// Print as JSON
    #[arg(long, requires = "print")]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = utils::init_logging();

    let selection = build_selection(&cli)?;

    if cli.print {
        let menu = selection.menu();
        if cli.json {
            println!("{}", serde_json::to_string_pretty(menu)?);
        } else {
            print!("{}", format_menu(menu));
        }
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(selection, cli.bandwidth);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn build_selection(cli: &Cli) -> anyhow::Result<app::Selection> {
    let mut config = QualityMenuConfig::load();
    if let Some(locale) = &cli.locale {
        config.locale = locale.clone();
    }
    config.ui.multi_angle |= cli.multi_angle;
    config.ui.show_audio_channel_count_variants |= cli.show_channel_variants;

    let mut catalog = Catalog::new(i18n::FALLBACK_LOCALE).context("loading string tables")?;
    config.validate(&catalog)?;
    catalog.set_locale(&config.locale)?;

    let json = match &cli.tracks {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => SAMPLE_TRACKS.to_string(),
    };
    let load_mode = if cli.src_equals {
        LoadMode::SrcEquals
    } else {
        LoadMode::MediaSource
    };
    let mut player = SimulatedPlayer::from_json(&json)
        .context("parsing variant tracks")?
        .with_load_mode(load_mode)
        .with_audio_only(cli.audio_only);
    if cli.manual {
        player.configure(PlayerConfiguration {
            abr: AbrConfig { enabled: false },
        })?;
    }

    let mut selection = QualitySelection::new(player, catalog, config.ui);
    apply_string_overrides(&mut selection, &config.strings);
    Ok(selection)
}

/// Replace built-in strings of the current locale and relabel the menu
fn apply_string_overrides(selection: &mut app::Selection, strings: &BTreeMap<String, String>) {
    if strings.is_empty() {
        return;
    }
    let event = selection
        .localization_mut()
        .update_strings(strings.iter().map(|(k, v)| (k.clone(), v.clone())));
    selection.handle_locale_event(event);
}

/// Plain-text rendering used by `--print`
fn format_menu(menu: &ResolutionMenu) -> String {
    let mut out = format!("{}: {}\n", menu.title, menu.header_text());
    if menu.hidden {
        out.push_str("  (hidden)\n");
        return out;
    }
    for option in &menu.options {
        let mark = if option.is_selected { '*' } else { ' ' };
        out.push_str(&format!("{} {}\n", mark, option.label));
    }
    let mark = if menu.auto_selected { '*' } else { ' ' };
    out.push_str(&format!("{} {}\n", mark, menu.auto_label));
    out
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        app.pump_events();

        terminal.draw(|f| ui::render_quality_menu(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key.code);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.move_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_down(),
        KeyCode::Enter | KeyCode::Char(' ') => app.activate(),
        KeyCode::Char('l') => app.cycle_locale(),
        KeyCode::Char('+') | KeyCode::Char('=') => app.adjust_bandwidth(true),
        KeyCode::Char('-') => app.adjust_bandwidth(false),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UiConfig;

    fn sample(settings: UiConfig) -> app::Selection {
        QualitySelection::new(
            SimulatedPlayer::from_json(SAMPLE_TRACKS).unwrap(),
            Catalog::new("en").unwrap(),
            settings,
        )
    }

    fn labels(menu: &ResolutionMenu) -> Vec<&str> {
        menu.options.iter().map(|o| o.label.as_str()).collect()
    }

    #[test]
    fn test_sample_ladder() {
        let selection = sample(UiConfig::default());
        assert_eq!(
            labels(selection.menu()),
            vec!["4K60 (HDR)", "1440p", "1080p", "720p", "480p", "360p15"]
        );
    }

    #[test]
    fn test_sample_ladder_with_channel_variants() {
        let settings = UiConfig {
            show_audio_channel_count_variants: true,
            ..UiConfig::default()
        };
        let selection = sample(settings);
        let ids: Vec<u64> = selection.menu().options.iter().map(|o| o.track.id).collect();
        assert_eq!(ids, vec![2, 3, 8, 1, 9, 4, 6, 7]);
    }

    #[test]
    fn test_format_menu() {
        let selection = sample(UiConfig::default());
        let text = format_menu(selection.menu());
        assert!(text.starts_with("Resolution: Auto\n"));
        assert!(text.contains("  1080p\n"));
        assert!(text.ends_with("* Auto\n"));
    }

    #[test]
    fn test_format_hidden_menu() {
        let player = SimulatedPlayer::from_json(SAMPLE_TRACKS)
            .unwrap()
            .with_load_mode(LoadMode::SrcEquals);
        let selection = QualitySelection::new(player, Catalog::new("en").unwrap(), UiConfig::default());
        assert_eq!(format_menu(selection.menu()), "Resolution: Auto\n  (hidden)\n");
    }

    #[test]
    fn test_string_overrides_relabel_menu() {
        let mut selection = sample(UiConfig::default());
        let strings = BTreeMap::from([
            ("AUTO_QUALITY".to_string(), "Adaptive".to_string()),
            ("RESOLUTION".to_string(), "Quality".to_string()),
        ]);
        apply_string_overrides(&mut selection, &strings);
        assert_eq!(selection.menu().title, "Quality");
        assert_eq!(selection.menu().header_label.as_deref(), Some("Adaptive"));
        assert!(format_menu(selection.menu()).ends_with("* Adaptive\n"));
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::parse_from(["quality-menu", "--print", "--json", "--locale", "ja", "--manual"]);
        assert!(cli.print && cli.json && cli.manual);
        assert_eq!(cli.locale.as_deref(), Some("ja"));
        assert_eq!(cli.bandwidth, 6_000_000);
    }
}
