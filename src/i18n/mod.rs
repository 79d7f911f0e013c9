//! Localization support backed by embedded TOML string tables

use crate::error::AppError;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// String keys used by the quality menu
pub mod keys {
    pub const RESOLUTION: &str = "RESOLUTION";
    pub const AUTO_QUALITY: &str = "AUTO_QUALITY";
}

pub const FALLBACK_LOCALE: &str = "en";

const BUILTIN: &[(&str, &str)] = &[
    ("en", include_str!("locales/en.toml")),
    ("fr", include_str!("locales/fr.toml")),
    ("ja", include_str!("locales/ja.toml")),
];

/// Key to string resolver
pub trait Localization {
    /// Resolve a key; never fails, unknown keys resolve to a placeholder
    fn resolve(&self, key: &str) -> String;
}

/// Notifications emitted when localized strings change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleEvent {
    /// Strings of the current locale were replaced
    Updated,
    /// The current locale switched
    Changed { locale: String },
}

/// String tables for every known locale
#[derive(Debug, Clone)]
pub struct Catalog {
    locale: String,
    tables: BTreeMap<String, HashMap<String, String>>,
}

impl Catalog {
    /// Load the built-in tables and start with `locale`
    pub fn new(locale: &str) -> Result<Self, AppError> {
        let mut tables = BTreeMap::new();
        for (name, source) in BUILTIN {
            let table: HashMap<String, String> = toml::from_str(source)?;
            tables.insert(name.to_string(), table);
        }

        let mut catalog = Self {
            locale: FALLBACK_LOCALE.to_string(),
            tables,
        };
        catalog.set_locale(locale)?;
        Ok(catalog)
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn available_locales(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    pub fn has_locale(&self, locale: &str) -> bool {
        self.tables.contains_key(locale)
    }

    /// Switch the current locale
    pub fn set_locale(&mut self, locale: &str) -> Result<LocaleEvent, AppError> {
        if !self.has_locale(locale) {
            return Err(AppError::Localization(format!(
                "Unknown locale '{}' (available: {})",
                locale,
                self.available_locales().join(", ")
            )));
        }
        self.locale = locale.to_string();
        debug!("Locale changed to {}", locale);
        Ok(LocaleEvent::Changed {
            locale: locale.to_string(),
        })
    }

    /// Locale following the current one, wrapping around
    pub fn next_locale(&self) -> String {
        let locales = self.available_locales();
        let position = locales.iter().position(|l| *l == self.locale).unwrap_or(0);
        locales[(position + 1) % locales.len()].to_string()
    }

    /// Merge replacement strings into the current locale's table
    pub fn update_strings<I, K, V>(&mut self, entries: I) -> LocaleEvent
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let table = self.tables.entry(self.locale.clone()).or_default();
        for (key, value) in entries {
            table.insert(key.into(), value.into());
        }
        LocaleEvent::Updated
    }

    fn lookup(&self, locale: &str, key: &str) -> Option<&String> {
        self.tables.get(locale).and_then(|table| table.get(key))
    }
}

impl Localization for Catalog {
    fn resolve(&self, key: &str) -> String {
        if let Some(value) = self.lookup(&self.locale, key) {
            return value.clone();
        }
        if let Some(value) = self.lookup(FALLBACK_LOCALE, key) {
            warn!("Missing '{}' for locale {}, using {}", key, self.locale, FALLBACK_LOCALE);
            return value.clone();
        }
        warn!("Unresolved localization key '{}'", key);
        key.to_string()
    }
}
