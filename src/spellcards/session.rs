//! # Session State
//!
//! A [`Session`] owns everything that changes while a user curates a print
//! set: the facet filters, the pins and the "hide unpinned" toggle. Every user
//! action is an [`Intent`]; [`Session::update`] applies it and then recomputes
//! the visibility of every entry in one pass:
//!
//! ```text
//! visible(entry) = pinned(entry) OR (NOT hide_unpinned AND filters(entry))
//! ```
//!
//! A failed intent leaves the session untouched.

use crate::error::{CardsError, Result};
use crate::facets::FilterRegistry;
use crate::model::{Catalog, Entry, EntryId, FilterValue};
use crate::pins::PinSet;
use std::collections::BTreeMap;
use tracing::debug;

/// A discrete user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// The "Any" control of a facet.
    ToggleAll { facet: String, on: bool },
    ToggleValue {
        facet: String,
        value: FilterValue,
        on: bool,
    },
    TogglePin { entry: EntryId },
    ToggleHideUnpinned { on: bool },
    /// Activates another facet group, resetting every filter.
    SwitchMode { group: String },
}

pub type Visibility = BTreeMap<EntryId, bool>;

#[derive(Debug, Clone)]
pub struct Session {
    catalog: Catalog,
    registry: FilterRegistry,
    pins: PinSet,
    hide_unpinned: bool,
    visibility: Visibility,
}

impl Session {
    /// Starts a session with every filter fully selected and nothing pinned.
    pub fn new(catalog: Catalog, mode: Option<&str>) -> Result<Self> {
        let registry = FilterRegistry::build(
            catalog.facet_groups().to_vec(),
            mode,
            catalog.entries(),
        )?;
        let mut session = Self {
            catalog,
            registry,
            pins: PinSet::new(),
            hide_unpinned: false,
            visibility: Visibility::new(),
        };
        session.recompute();
        Ok(session)
    }

    pub fn update(&mut self, intent: Intent) -> Result<&Visibility> {
        debug!(?intent, "applying intent");
        match intent {
            Intent::ToggleAll { facet, on } => {
                self.registry.filter_mut(&facet)?.toggle_all(on);
            }
            Intent::ToggleValue { facet, value, on } => {
                self.registry.filter_mut(&facet)?.toggle_value(&value, on)?;
            }
            Intent::TogglePin { entry } => {
                if self.catalog.get(&entry).is_none() {
                    return Err(CardsError::UnknownEntry(entry));
                }
                self.pins.toggle(&entry);
            }
            Intent::ToggleHideUnpinned { on } => {
                self.hide_unpinned = on;
            }
            Intent::SwitchMode { group } => {
                self.registry.switch_mode(&group, self.catalog.entries())?;
            }
        }
        self.recompute();
        Ok(&self.visibility)
    }

    fn recompute(&mut self) {
        let registry = &self.registry;
        let pins = &self.pins;
        let hide_unpinned = self.hide_unpinned;

        self.visibility = self
            .catalog
            .entries()
            .iter()
            .map(|entry| {
                let visible =
                    pins.is_pinned(&entry.id) || (!hide_unpinned && registry.matches(entry));
                (entry.id.clone(), visible)
            })
            .collect();
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn registry(&self) -> &FilterRegistry {
        &self.registry
    }

    pub fn pins(&self) -> &PinSet {
        &self.pins
    }

    pub fn hides_unpinned(&self) -> bool {
        self.hide_unpinned
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.visibility.get(id).copied().unwrap_or(false)
    }

    /// Visible entries in catalog order.
    pub fn visible_entries(&self) -> impl Iterator<Item = &Entry> {
        self.catalog
            .entries()
            .iter()
            .filter(|entry| self.is_visible(&entry.id))
    }
}
