//! # Deck
//!
//! The deck is the session's page lookup: every entry id mapped to the pages
//! its description produced. It is built once, after the catalog is loaded, and
//! passed explicitly to whatever renders or reports on cards.
//!
//! Building runs, per entry and in catalog order:
//!
//! ```text
//! description ─▶ icon substitution ─▶ split_blocks ─▶ paginate ─▶ pages
//! ```
//!
//! Descriptions that arrive already split into pages skip pagination and keep
//! their boundaries.
//!
//! [`Card`] is what a renderer receives for one page: the page's body plus
//! the entry metadata that goes around it.

use crate::error::Result;
use crate::icons::IconStyle;
use crate::layout::{
    paginate, paginate_fixed, CardBounds, MeasurementOracle, OverflowDiagnostic, Page,
};
use crate::markup::split_blocks;
use crate::model::{Catalog, Description, Entry, EntryId};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct Deck {
    pages: BTreeMap<EntryId, Vec<Page>>,
    overflows: Vec<OverflowDiagnostic>,
}

impl Deck {
    pub fn build<O>(
        catalog: &Catalog,
        bounds: &CardBounds,
        oracle: &O,
        icons: &IconStyle,
    ) -> Result<Self>
    where
        O: MeasurementOracle + ?Sized,
    {
        let mut deck = Deck::default();

        for entry in catalog.entries() {
            let pagination = match &entry.description {
                Description::Markup(markup) => {
                    let blocks = split_blocks(&entry.id, &icons.substitute(markup))?;
                    paginate(&entry.id, blocks, bounds, oracle)
                }
                Description::Paged(pages) => {
                    let pages = pages
                        .iter()
                        .map(|page| split_blocks(&entry.id, &icons.substitute(page)))
                        .collect::<Result<Vec<_>>>()?;
                    paginate_fixed(&entry.id, pages, bounds, oracle)
                }
            };
            deck.overflows.extend(pagination.overflows);
            deck.pages.insert(entry.id.clone(), pagination.pages);
        }

        Ok(deck)
    }

    /// Pages of `id`; empty for unknown ids and entries without content.
    pub fn pages(&self, id: &str) -> &[Page] {
        self.pages.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn page_count(&self, id: &str) -> usize {
        self.pages(id).len()
    }

    pub fn total_pages(&self) -> usize {
        self.pages.values().map(Vec::len).sum()
    }

    pub fn overflows(&self) -> &[OverflowDiagnostic] {
        &self.overflows
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardHeader {
    /// `"{type} {level}"`.
    pub type_line: String,
    /// Action cost markup, icons substituted.
    pub actions: String,
}

/// Everything needed to draw one page of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub entry_id: EntryId,
    pub title: String,
    pub number: usize,
    pub total: usize,
    pub annotation: Option<String>,
    /// First page only.
    pub header: Option<CardHeader>,
    /// Rarity (when not common) followed by traits; first page only.
    pub traits: Vec<String>,
    pub body: String,
    pub copyright: String,
    pub pinned: bool,
}

impl Card {
    pub fn assemble(
        entry: &Entry,
        page: &Page,
        icons: &IconStyle,
        copyright_holders: &BTreeMap<String, String>,
        pinned: bool,
    ) -> Self {
        let first = page.is_first();

        let header = first.then(|| CardHeader {
            type_line: entry.type_line(),
            actions: icons.substitute(&entry.actions),
        });

        let mut traits = Vec::new();
        if first {
            if !entry.is_common() {
                traits.push(entry.rarity.clone());
            }
            traits.extend(entry.traits.iter().cloned());
        }

        Card {
            entry_id: entry.id.clone(),
            title: entry.title.clone(),
            number: page.number,
            total: page.total,
            annotation: page.annotation(),
            header,
            traits,
            body: page.markup(),
            copyright: copyright_line(entry, copyright_holders),
            pinned,
        }
    }
}

/// `"{source} © {holder}"`, or just the source when no holder is known.
pub fn copyright_line(entry: &Entry, copyright_holders: &BTreeMap<String, String>) -> String {
    let holder = entry
        .copyright
        .as_deref()
        .or_else(|| copyright_holders.get(&entry.source).map(String::as_str))
        .filter(|holder| !holder.trim().is_empty());

    match holder {
        Some(holder) => format!("{} © {}", entry.source, holder),
        None => entry.source.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::TextMetricsOracle;
    use crate::markup::ContentBlock;
    use crate::test_utils::{entry_json, sample_catalog};
    use serde_json::json;

    fn roomy() -> CardBounds {
        CardBounds::new(42, 30)
            .with_first_page_reserve(3)
            .with_block_spacing(1)
    }

    fn one_block_per_page(blocks: &[ContentBlock], _: &CardBounds) -> bool {
        blocks.len() > 1
    }

    #[test]
    fn test_every_entry_gets_pages() {
        let catalog = sample_catalog();
        let deck = Deck::build(&catalog, &roomy(), &TextMetricsOracle, &IconStyle::Glyph).unwrap();

        for entry in catalog.entries() {
            assert_eq!(deck.page_count(&entry.id), 1, "{}", entry.id);
        }
        assert_eq!(deck.total_pages(), 4);
        assert!(deck.overflows().is_empty());
    }

    #[test]
    fn test_pages_follow_the_oracle() {
        let catalog = sample_catalog();
        let deck =
            Deck::build(&catalog, &roomy(), &one_block_per_page, &IconStyle::Glyph).unwrap();

        let pages = deck.pages("fireball");
        assert_eq!(pages.len(), 4);
        assert_eq!(pages[2].blocks[0].tag(), Some("hr"));
        assert!(pages.iter().all(|p| p.total == 4));
        assert!(deck.pages("unknown").is_empty());
    }

    #[test]
    fn test_icons_are_substituted_before_splitting() {
        let mut entry = entry_json("Zap", "spell", 1, &[]);
        entry["description"] = json!("<p>Spend [two-actions] to zap.</p>");
        let catalog = Catalog::from_json(&json!({ "zap": entry }).to_string()).unwrap();

        let html = IconStyle::html("icons");
        let deck = Deck::build(&catalog, &roomy(), &TextMetricsOracle, &html).unwrap();
        let body = deck.pages("zap")[0].markup();
        assert!(body.contains(r#"src="icons/two-actions.svg""#));
        assert_eq!(deck.page_count("zap"), 1);
    }

    #[test]
    fn test_empty_description_has_no_pages() {
        let mut entry = entry_json("Blank", "spell", 1, &[]);
        entry["description"] = json!("");
        let catalog = Catalog::from_json(&json!({ "blank": entry }).to_string()).unwrap();

        let deck = Deck::build(&catalog, &roomy(), &TextMetricsOracle, &IconStyle::Glyph).unwrap();
        assert_eq!(deck.page_count("blank"), 0);
    }

    #[test]
    fn test_pre_paged_descriptions_keep_boundaries() {
        let mut entry = entry_json("Old", "spell", 1, &[]);
        entry["description"] = json!(["<p>one</p><p>two</p>", "<p>three</p>"]);
        let catalog = Catalog::from_json(&json!({ "old": entry }).to_string()).unwrap();

        let deck =
            Deck::build(&catalog, &roomy(), &one_block_per_page, &IconStyle::Glyph).unwrap();
        let sizes: Vec<_> = deck.pages("old").iter().map(|p| p.blocks.len()).collect();
        assert_eq!(sizes, vec![2, 1]);
        assert_eq!(deck.overflows().len(), 1);
    }

    #[test]
    fn test_broken_markup_fails_the_build() {
        let mut entry = entry_json("Bad", "spell", 1, &[]);
        entry["description"] = json!("<p>unterminated");
        let catalog = Catalog::from_json(&json!({ "bad": entry }).to_string()).unwrap();

        assert!(Deck::build(&catalog, &roomy(), &TextMetricsOracle, &IconStyle::Glyph).is_err());
    }

    #[test]
    fn test_first_card_carries_header_and_traits() {
        let catalog = sample_catalog();
        let deck =
            Deck::build(&catalog, &roomy(), &one_block_per_page, &IconStyle::Glyph).unwrap();
        let shield = catalog.get("shield").unwrap();
        let holders = BTreeMap::new();

        let first = Card::assemble(shield, &deck.pages("shield")[0], &IconStyle::Glyph, &holders, true);
        let header = first.header.as_ref().unwrap();
        assert_eq!(header.type_line, "cantrip 1");
        assert_eq!(header.actions, "⟲");
        assert_eq!(first.traits, vec!["uncommon", "force"]);
        assert!(first.pinned);

        let fireball = catalog.get("fireball").unwrap();
        let second = Card::assemble(
            fireball,
            &deck.pages("fireball")[1],
            &IconStyle::Glyph,
            &holders,
            false,
        );
        assert!(second.header.is_none());
        assert!(second.traits.is_empty());
        assert_eq!(second.annotation.as_deref(), Some("(2/4)"));
    }

    #[test]
    fn test_copyright_falls_back_to_holders() {
        let catalog = sample_catalog();
        let mut light = catalog.get("light").unwrap().clone();
        assert_eq!(
            copyright_line(&light, &BTreeMap::new()),
            "Player Core 2 © 2023 Paizo Inc."
        );

        light.copyright = None;
        let holders = BTreeMap::from([("Player Core 2".to_string(), "2024 Paizo Inc.".to_string())]);
        assert_eq!(copyright_line(&light, &holders), "Player Core 2 © 2024 Paizo Inc.");
        assert_eq!(copyright_line(&light, &BTreeMap::new()), "Player Core 2");
    }
}
