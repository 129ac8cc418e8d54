//! # Localized Content
//!
//! The agreement text shown on the form and printed on the document.
//!
//! A [`ContentTable`] maps each [`Locale`] to a flat set of named strings.
//! Selecting a locale produces a [`ContentBundle`], which is validated up
//! front: every key in [`REQUIRED_KEYS`] must be present, otherwise
//! selection fails with [`UndersignError::MissingContentKey`]. There is no
//! sensible default text for a safety agreement, so a gap is a
//! configuration error rather than blank output.
//!
//! ## Usage
//!
//! ```
//! use undersign::content::{ContentTable, Locale};
//!
//! let bundle = ContentTable::builtin().bundle(Locale::English)?;
//! assert_eq!(bundle.locale, Locale::English);
//! # Ok::<(), undersign::UndersignError>(())
//! ```

mod builtin;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::UndersignError;

/// Keys every locale entry must define.
pub const REQUIRED_KEYS: &[&str] = &[
    "title",
    "instruction",
    "rules",
    "name_label",
    "organization_label",
    "date_label",
    "declaration",
    "signature_label",
    "submit_label",
    "clear_label",
    "incomplete_warning",
    "blank_signature_warning",
    "font_warning",
];

/// Supported display languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "zh-TW")]
    TraditionalChinese,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::English, Locale::TraditionalChinese];

    /// BCP 47 tag (`en`, `zh-TW`).
    pub fn tag(self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::TraditionalChinese => "zh-TW",
        }
    }

    /// Name of the language in that language.
    pub fn display_name(self) -> &'static str {
        match self {
            Locale::English => "English",
            Locale::TraditionalChinese => "繁體中文",
        }
    }

    /// Render a date the way this locale displays it on the document.
    pub fn format_date(self, date: NaiveDate) -> String {
        match self {
            Locale::English => date.format("%B %-d, %Y").to_string(),
            Locale::TraditionalChinese => date.format("%Y年%-m月%-d日").to_string(),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = UndersignError;

    /// Tags match case-insensitively; `_` is accepted in place of `-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('_', "-").to_ascii_lowercase();
        Locale::ALL
            .into_iter()
            .find(|locale| locale.tag().to_ascii_lowercase() == normalized)
            .ok_or_else(|| UndersignError::UnknownLocale(s.to_string()))
    }
}

/// The localized strings for one locale.
///
/// `rules` is the agreement body; it may contain `\n` paragraph breaks,
/// which the layout engine preserves. The `*_label` and `*_warning` fields
/// that never reach the document are there for the form that collects the
/// input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentBundle {
    pub locale: Locale,
    pub title: String,
    pub instruction: String,
    pub rules: String,
    pub name_label: String,
    pub organization_label: String,
    pub date_label: String,
    pub declaration: String,
    pub signature_label: String,
    pub submit_label: String,
    pub clear_label: String,
    pub incomplete_warning: String,
    pub blank_signature_warning: String,
    pub font_warning: String,
}

impl ContentBundle {
    /// Build a bundle from a key/value entry, failing on the first missing key.
    pub fn from_entries(
        locale: Locale,
        entries: &BTreeMap<String, String>,
    ) -> Result<Self, UndersignError> {
        let get = |key: &'static str| {
            entries
                .get(key)
                .cloned()
                .ok_or_else(|| UndersignError::MissingContentKey {
                    locale: locale.tag().to_string(),
                    key,
                })
        };

        Ok(Self {
            locale,
            title: get("title")?,
            instruction: get("instruction")?,
            rules: get("rules")?,
            name_label: get("name_label")?,
            organization_label: get("organization_label")?,
            date_label: get("date_label")?,
            declaration: get("declaration")?,
            signature_label: get("signature_label")?,
            submit_label: get("submit_label")?,
            clear_label: get("clear_label")?,
            incomplete_warning: get("incomplete_warning")?,
            blank_signature_warning: get("blank_signature_warning")?,
            font_warning: get("font_warning")?,
        })
    }
}

/// Immutable mapping from locale to its content entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTable {
    entries: BTreeMap<Locale, BTreeMap<String, String>>,
}

static BUILTIN: OnceLock<ContentTable> = OnceLock::new();

impl ContentTable {
    /// The content table compiled into the crate.
    pub fn builtin() -> &'static ContentTable {
        BUILTIN.get_or_init(|| {
            let entries = [
                (Locale::English, builtin::EN),
                (Locale::TraditionalChinese, builtin::ZH_TW),
            ]
            .into_iter()
            .map(|(locale, pairs)| {
                let entry = pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect();
                (locale, entry)
            })
            .collect();
            ContentTable { entries }
        })
    }

    /// Parse a table from JSON: `{ "en": { "title": "...", ... }, ... }`.
    ///
    /// Every entry is checked for required keys here, so a bad table fails
    /// at startup instead of on the first request for that locale.
    pub fn from_json(json: &str) -> Result<Self, UndersignError> {
        let entries: BTreeMap<Locale, BTreeMap<String, String>> = serde_json::from_str(json)
            .map_err(|e| UndersignError::ContentTable(e.to_string()))?;
        if entries.is_empty() {
            return Err(UndersignError::ContentTable(
                "table defines no locales".to_string(),
            ));
        }

        let table = Self { entries };
        for locale in table.locales() {
            table.bundle(locale)?;
        }
        Ok(table)
    }

    /// Load a JSON table from a file.
    pub fn load(path: &Path) -> Result<Self, UndersignError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Locales this table has entries for, in tag order.
    pub fn locales(&self) -> Vec<Locale> {
        self.entries.keys().copied().collect()
    }

    /// Select the bundle for `locale`.
    pub fn bundle(&self, locale: Locale) -> Result<ContentBundle, UndersignError> {
        let entry = self
            .entries
            .get(&locale)
            .ok_or_else(|| UndersignError::UnknownLocale(locale.tag().to_string()))?;
        ContentBundle::from_entries(locale, entry)
    }
}
