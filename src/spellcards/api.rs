//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for a UI. One [`CardsApi`] is one session: the catalog, the
//! deck built from it, the facet filters, the pins and the "hide unpinned"
//! toggle.
//!
//! The facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (raw facet values typed by a user become domain values)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no printing and holds no presentation logic.

use crate::commands::{self, config::ConfigAction, CmdResult};
use crate::config::CardsConfig;
use crate::deck::Deck;
use crate::error::{CardsError, Result};
use crate::icons::IconStyle;
use crate::layout::{MeasurementOracle, TextMetricsOracle};
use crate::model::Catalog;
use crate::session::{Intent, Session, Visibility};
use std::path::Path;

pub struct CardsApi {
    session: Session,
    deck: Deck,
    config: CardsConfig,
    icons: IconStyle,
}

impl CardsApi {
    /// Opens a session measuring cards with [`TextMetricsOracle`].
    pub fn new(catalog: Catalog, config: CardsConfig, icons: IconStyle) -> Result<Self> {
        Self::with_oracle(catalog, config, icons, &TextMetricsOracle)
    }

    pub fn with_oracle<O>(
        catalog: Catalog,
        config: CardsConfig,
        icons: IconStyle,
        oracle: &O,
    ) -> Result<Self>
    where
        O: MeasurementOracle + ?Sized,
    {
        let deck = Deck::build(&catalog, &config.bounds(), oracle, &icons)?;
        let session = Session::new(catalog, config.default_mode.as_deref())?;
        Ok(Self {
            session,
            deck,
            config,
            icons,
        })
    }

    /// Loads the payload at `path` and opens a session on it.
    pub fn open<P: AsRef<Path>>(path: P, config: CardsConfig, icons: IconStyle) -> Result<Self> {
        let catalog = Catalog::load(path)?;
        Self::new(catalog, config, icons)
    }

    pub fn apply(&mut self, intent: Intent) -> Result<&Visibility> {
        self.session.update(intent)
    }

    pub fn switch_mode(&mut self, group: &str) -> Result<&Visibility> {
        self.apply(Intent::SwitchMode {
            group: group.to_string(),
        })
    }

    /// Turns a facet's "Any" control on or off.
    pub fn select_all(&mut self, facet: &str, on: bool) -> Result<&Visibility> {
        self.apply(Intent::ToggleAll {
            facet: facet.to_string(),
            on,
        })
    }

    /// Ticks or unticks one value, given as its label or its display form.
    pub fn select_value(&mut self, facet: &str, raw: &str, on: bool) -> Result<&Visibility> {
        let filter = self.session.registry().filter(facet)?;
        let value = filter
            .domain()
            .find(raw)
            .map(|option| option.value.clone())
            .ok_or_else(|| CardsError::UnknownFacetValue {
                facet: filter.title().to_string(),
                value: raw.to_string(),
            })?;
        self.apply(Intent::ToggleValue {
            facet: facet.to_string(),
            value,
            on,
        })
    }

    pub fn hide_unpinned(&mut self, on: bool) -> Result<&Visibility> {
        self.apply(Intent::ToggleHideUnpinned { on })
    }

    pub fn toggle_pins<I: AsRef<str>>(&mut self, ids: &[I]) -> Result<CmdResult> {
        commands::pinning::toggle(&mut self.session, ids)
    }

    pub fn list(&self) -> Result<CmdResult> {
        commands::list::run(&self.session, &self.deck)
    }

    pub fn facets(&self) -> Result<CmdResult> {
        commands::facets::run(&self.session)
    }

    pub fn pages(&self, entry: Option<&str>) -> Result<CmdResult> {
        commands::paginate::run(
            self.session.catalog(),
            &self.deck,
            &self.config.bounds(),
            entry,
        )
    }

    pub fn sheet(&self) -> Result<CmdResult> {
        commands::sheet::run(
            &self.session,
            &self.deck,
            &self.icons,
            &self.config.copyright_holders,
        )
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn config(&self) -> &CardsConfig {
        &self.config
    }
}

/// Shows or changes configuration. Needs no payload, so it lives outside a session.
pub fn configure(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    commands::config::run(config_dir, action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_catalog;

    fn api() -> CardsApi {
        CardsApi::new(sample_catalog(), CardsConfig::default(), IconStyle::Glyph).unwrap()
    }

    fn listed(api: &CardsApi) -> Vec<String> {
        api.list()
            .unwrap()
            .listed_entries
            .into_iter()
            .map(|e| e.id)
            .collect()
    }

    #[test]
    fn test_raw_values_resolve_by_label_or_value() {
        let mut api = api();
        api.select_value("Levels", "Level 3", true).unwrap();
        assert_eq!(listed(&api), vec!["fireball"]);

        api.select_value("level", "1", true).unwrap();
        assert_eq!(listed(&api).len(), 4);
    }

    #[test]
    fn test_unknown_raw_value_is_rejected() {
        let mut api = api();
        let err = api.select_value("Levels", "11", true).unwrap_err();
        assert!(matches!(err, CardsError::UnknownFacetValue { ref facet, .. } if facet == "Levels"));
    }

    #[test]
    fn test_default_mode_comes_from_config() {
        let config = CardsConfig {
            default_mode: Some("missing".into()),
            ..CardsConfig::default()
        };
        assert!(matches!(
            CardsApi::new(sample_catalog(), config, IconStyle::Glyph),
            Err(CardsError::UnknownFacetGroup(_))
        ));
    }

    #[test]
    fn test_dispatches_to_commands() {
        let mut api = api();
        api.select_all("Type", false).unwrap();
        assert!(listed(&api).is_empty());

        let result = api.toggle_pins(&["light"]).unwrap();
        assert_eq!(result.messages.len(), 1);
        assert_eq!(listed(&api), vec!["light"]);

        api.hide_unpinned(true).unwrap();
        assert_eq!(api.sheet().unwrap().cards.len(), 1);
        assert!(api.facets().unwrap().facets.unwrap().hide_unpinned);
        assert_eq!(api.pages(Some("heal")).unwrap().page_reports.len(), 1);

        api.switch_mode("standard").unwrap();
        assert_eq!(listed(&api), vec!["light"]);
        api.hide_unpinned(false).unwrap();
        assert_eq!(listed(&api).len(), 4);
    }
}
