//! # Command Layer
//!
//! One module per user-facing operation. Commands take the session state they
//! need as plain arguments and return a [`CmdResult`]; they never print and
//! never exit. Anything worth telling the user goes into `messages` with a
//! [`MessageLevel`], and the UI decides how to show it.

use crate::config::CardsConfig;
use crate::deck::Card;
use crate::model::{EntryId, FilterValue};
use serde::Serialize;

pub mod config;
pub mod facets;
pub mod list;
pub mod paginate;
pub mod pinning;
pub mod sheet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// An entry as shown in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedEntry {
    pub id: EntryId,
    pub title: String,
    pub type_line: String,
    pub source: String,
    pub pages: usize,
    pub pinned: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetOptionView {
    pub label: String,
    pub value: FilterValue,
    /// Logically selected (always true while "Any" is on).
    pub selected: bool,
    /// Individually ticked.
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetView {
    pub title: String,
    pub attribute: String,
    pub all_selected: bool,
    pub options: Vec<FacetOptionView>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FacetsReport {
    pub active_group: String,
    pub groups: Vec<String>,
    pub hide_unpinned: bool,
    /// Pinned entry ids, in id order.
    pub pinned: Vec<EntryId>,
    pub facets: Vec<FacetView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    pub number: usize,
    pub total: usize,
    pub annotation: Option<String>,
    pub blocks: usize,
    /// Lines the content takes on a character grid.
    pub lines: usize,
    /// Lines available on this card.
    pub capacity: usize,
    pub text: String,
    pub overflows: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageReport {
    pub entry_id: EntryId,
    pub title: String,
    pub source: String,
    pub pages: Vec<PageSummary>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub listed_entries: Vec<ListedEntry>,
    pub cards: Vec<Card>,
    pub facets: Option<FacetsReport>,
    pub page_reports: Vec<PageReport>,
    pub config: Option<CardsConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_entries(mut self, entries: Vec<ListedEntry>) -> Self {
        self.listed_entries = entries;
        self
    }

    pub fn with_cards(mut self, cards: Vec<Card>) -> Self {
        self.cards = cards;
        self
    }

    pub fn with_facets(mut self, facets: FacetsReport) -> Self {
        self.facets = Some(facets);
        self
    }

    pub fn with_page_reports(mut self, reports: Vec<PageReport>) -> Self {
        self.page_reports = reports;
        self
    }

    pub fn with_config(mut self, config: CardsConfig) -> Self {
        self.config = Some(config);
        self
    }
}
