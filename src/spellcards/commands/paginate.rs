use crate::commands::{CmdMessage, CmdResult, PageReport, PageSummary};
use crate::deck::Deck;
use crate::error::{CardsError, Result};
use crate::layout::{CardBounds, TextMetricsOracle};
use crate::model::{Catalog, Entry};

/// Reports how entries were split into cards.
///
/// With `entry` set only that entry is reported. Pages the oracle could not
/// fit become warnings; they are still part of the deck.
pub fn run(
    catalog: &Catalog,
    deck: &Deck,
    bounds: &CardBounds,
    entry: Option<&str>,
) -> Result<CmdResult> {
    let entries: Vec<&Entry> = match entry {
        Some(id) => vec![catalog
            .get(id)
            .ok_or_else(|| CardsError::UnknownEntry(id.to_string()))?],
        None => catalog.entries().iter().collect(),
    };

    let metrics = TextMetricsOracle;
    let mut result = CmdResult::default();
    let mut reports = Vec::with_capacity(entries.len());

    for entry in entries {
        let pages = deck
            .pages(&entry.id)
            .iter()
            .map(|page| {
                let page_bounds = bounds.for_page(page.number);
                PageSummary {
                    number: page.number,
                    total: page.total,
                    annotation: page.annotation(),
                    blocks: page.blocks.len(),
                    lines: metrics.measure(&page.blocks, &page_bounds),
                    capacity: page_bounds.height,
                    text: page
                        .blocks
                        .iter()
                        .map(|block| block.text())
                        .collect::<Vec<_>>()
                        .join("\n"),
                    overflows: deck
                        .overflows()
                        .iter()
                        .any(|o| o.entry_id == entry.id && o.page == page.number),
                }
            })
            .collect::<Vec<_>>();

        for page in pages.iter().filter(|page| page.overflows) {
            result.add_message(CmdMessage::warning(format!(
                "overflow detected: {}: {} #{}",
                entry.source, entry.title, page.number
            )));
        }
        if entry.description.is_empty() {
            result.add_message(CmdMessage::info(format!(
                "{} has no content and produces no cards",
                entry.title
            )));
        }

        reports.push(PageReport {
            entry_id: entry.id.clone(),
            title: entry.title.clone(),
            source: entry.source.clone(),
            pages,
        });
    }

    Ok(result.with_page_reports(reports))
}
