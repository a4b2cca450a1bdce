//! # Configuration
//!
//! Stored as `config.json` in the config directory. A missing file, or a
//! missing key, falls back to the defaults below.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `card-width` | `42` | Card width in columns |
//! | `card-height` | `30` | Card height in lines |
//! | `first-page-reserve` | `3` | Lines the header takes on an entry's first card |
//! | `block-spacing` | `1` | Blank lines between content blocks |
//! | `icon-dir` | `icons` | Where the print sheet looks for action icons |
//! | `default-mode` | (none) | Facet group activated on start |
//!
//! `copyright_holders` maps a source book to its copyright holder. It is only
//! edited in the file itself.

use crate::error::{CardsError, Result};
use crate::icons::IconStyle;
use crate::layout::CardBounds;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

pub const KEYS: [&str; 6] = [
    "card-width",
    "card-height",
    "first-page-reserve",
    "block-spacing",
    "icon-dir",
    "default-mode",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardsConfig {
    #[serde(default = "default_card_width")]
    pub card_width: usize,

    #[serde(default = "default_card_height")]
    pub card_height: usize,

    #[serde(default = "default_first_page_reserve")]
    pub first_page_reserve: usize,

    #[serde(default = "default_block_spacing")]
    pub block_spacing: usize,

    #[serde(default = "default_icon_dir")]
    pub icon_dir: String,

    #[serde(default)]
    pub default_mode: Option<String>,

    #[serde(default = "default_copyright_holders")]
    pub copyright_holders: BTreeMap<String, String>,
}

fn default_card_width() -> usize {
    42
}

fn default_card_height() -> usize {
    30
}

fn default_first_page_reserve() -> usize {
    3
}

fn default_block_spacing() -> usize {
    1
}

fn default_icon_dir() -> String {
    "icons".to_string()
}

fn default_copyright_holders() -> BTreeMap<String, String> {
    [
        ("Pathfinder Player Core", "2023 Paizo Inc."),
        ("Pathfinder Player Core 2", "2024 Paizo Inc."),
        ("Player Core", "2023 Paizo Inc."),
        ("Player Core 2", "2024 Paizo Inc."),
    ]
    .into_iter()
    .map(|(source, holder)| (source.to_string(), holder.to_string()))
    .collect()
}

impl Default for CardsConfig {
    fn default() -> Self {
        Self {
            card_width: default_card_width(),
            card_height: default_card_height(),
            first_page_reserve: default_first_page_reserve(),
            block_spacing: default_block_spacing(),
            icon_dir: default_icon_dir(),
            default_mode: None,
            copyright_holders: default_copyright_holders(),
        }
    }
}

impl CardsConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn bounds(&self) -> CardBounds {
        CardBounds::new(self.card_width, self.card_height)
            .with_first_page_reserve(self.first_page_reserve)
            .with_block_spacing(self.block_spacing)
    }

    pub fn html_icons(&self) -> IconStyle {
        IconStyle::html(self.icon_dir.clone())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "card-width" => Some(self.card_width.to_string()),
            "card-height" => Some(self.card_height.to_string()),
            "first-page-reserve" => Some(self.first_page_reserve.to_string()),
            "block-spacing" => Some(self.block_spacing.to_string()),
            "icon-dir" => Some(self.icon_dir.clone()),
            "default-mode" => Some(self.default_mode.clone().unwrap_or_default()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "card-width" => self.card_width = parse_lines(key, value, 1)?,
            "card-height" => self.card_height = parse_lines(key, value, 1)?,
            "first-page-reserve" => self.first_page_reserve = parse_lines(key, value, 0)?,
            "block-spacing" => self.block_spacing = parse_lines(key, value, 0)?,
            "icon-dir" => self.icon_dir = value.to_string(),
            "default-mode" => {
                self.default_mode = (!value.trim().is_empty()).then(|| value.trim().to_string())
            }
            _ => return Err(CardsError::Config(format!("Unknown config key: {}", key))),
        }
        Ok(())
    }
}

fn parse_lines(key: &str, value: &str, min: usize) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(n) if n >= min => Ok(n),
        _ => Err(CardsError::Config(format!(
            "{} must be a whole number of at least {}, got `{}`",
            key, min, value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_match_a_standard_index_card() {
        let config = CardsConfig::default();
        let bounds = config.bounds();
        assert_eq!(bounds.width, 42);
        assert_eq!(bounds.for_page(1).height, 27);
        assert_eq!(
            config.copyright_holders.get("Player Core 2").map(String::as_str),
            Some("2024 Paizo Inc.")
        );
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = CardsConfig::load(dir.path().join("nowhere")).unwrap();
        assert_eq!(config, CardsConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let mut config = CardsConfig::default();
        config.set("card-height", "24").unwrap();
        config.set("default-mode", "remaster").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = CardsConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.card_height, 24);
        assert_eq!(loaded.default_mode.as_deref(), Some("remaster"));
    }

    #[test]
    fn test_partial_files_fill_in_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{ "card_width": 60 }"#).unwrap();

        let config = CardsConfig::load(dir.path()).unwrap();
        assert_eq!(config.card_width, 60);
        assert_eq!(config.card_height, 30);
        assert_eq!(config.copyright_holders.len(), 4);
    }

    #[test]
    fn test_get_and_set_by_key() {
        let mut config = CardsConfig::default();
        for key in KEYS {
            assert!(config.get(key).is_some(), "{}", key);
        }
        assert!(config.get("colour").is_none());

        assert!(config.set("card-width", "0").is_err());
        assert!(config.set("block-spacing", "lots").is_err());
        assert!(config.set("colour", "red").is_err());

        config.set("default-mode", "").unwrap();
        assert_eq!(config.default_mode, None);
        config.set("icon-dir", "assets").unwrap();
        assert_eq!(config.html_icons(), IconStyle::html("assets"));
    }
}
