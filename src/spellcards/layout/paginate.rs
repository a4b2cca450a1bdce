use super::{CardBounds, MeasurementOracle};
use crate::markup::ContentBlock;
use crate::model::EntryId;
use serde::Serialize;
use std::collections::VecDeque;
use tracing::{debug, warn};

/// One card's worth of an entry's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub entry_id: EntryId,
    /// 1-based position within the entry.
    pub number: usize,
    /// Pages the entry produced in total.
    pub total: usize,
    pub blocks: Vec<ContentBlock>,
}

impl Page {
    pub fn is_first(&self) -> bool {
        self.number == 1
    }

    /// `"(i/n)"` for entries spread over several cards, `None` otherwise.
    pub fn annotation(&self) -> Option<String> {
        (self.total > 1).then(|| format!("({}/{})", self.number, self.total))
    }

    pub fn markup(&self) -> String {
        self.blocks
            .iter()
            .map(ContentBlock::markup)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A page the oracle still reports as overflowing. Not an error: the page is
/// emitted as is and renders with visual overflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverflowDiagnostic {
    pub entry_id: EntryId,
    pub page: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pagination {
    pub pages: Vec<Page>,
    pub overflows: Vec<OverflowDiagnostic>,
}

/// Splits `blocks` into pages that satisfy `oracle`.
///
/// Each page starts out holding every pending block; while the oracle reports
/// overflow and the page has more than one block, the last block goes back to
/// the front of the queue. A page reduced to a single block is emitted even if
/// it still overflows. Blocks come out in their original order, none lost or
/// duplicated, and no content yields no pages.
pub fn paginate<O>(
    entry_id: &str,
    blocks: Vec<ContentBlock>,
    bounds: &CardBounds,
    oracle: &O,
) -> Pagination
where
    O: MeasurementOracle + ?Sized,
{
    let mut pending: VecDeque<ContentBlock> = blocks.into();
    let mut pagination = Pagination::default();

    while !pending.is_empty() {
        let number = pagination.pages.len() + 1;
        let page_bounds = bounds.for_page(number);
        let mut current: Vec<ContentBlock> = pending.drain(..).collect();

        let mut overflowing = oracle.overflows(&current, &page_bounds);
        while overflowing && current.len() > 1 {
            if let Some(last) = current.pop() {
                pending.push_front(last);
            }
            overflowing = oracle.overflows(&current, &page_bounds);
        }

        if overflowing {
            warn!(entry = entry_id, page = number, "overflow detected");
            pagination.overflows.push(OverflowDiagnostic {
                entry_id: entry_id.to_string(),
                page: number,
            });
        }
        pagination.pages.push(Page {
            entry_id: entry_id.to_string(),
            number,
            total: 0,
            blocks: current,
        });
    }

    set_totals(&mut pagination.pages);
    debug!(entry = entry_id, pages = pagination.pages.len(), "paginated");
    pagination
}

/// Wraps content that was already split into pages by the payload producer.
///
/// Page boundaries are kept as given; every page is still measured so that
/// overflowing ones are reported.
pub fn paginate_fixed<O>(
    entry_id: &str,
    pages: Vec<Vec<ContentBlock>>,
    bounds: &CardBounds,
    oracle: &O,
) -> Pagination
where
    O: MeasurementOracle + ?Sized,
{
    let mut pagination = Pagination::default();

    for (index, blocks) in pages.into_iter().enumerate() {
        let number = index + 1;
        if oracle.overflows(&blocks, &bounds.for_page(number)) {
            warn!(entry = entry_id, page = number, "overflow detected");
            pagination.overflows.push(OverflowDiagnostic {
                entry_id: entry_id.to_string(),
                page: number,
            });
        }
        pagination.pages.push(Page {
            entry_id: entry_id.to_string(),
            number,
            total: 0,
            blocks,
        });
    }

    set_totals(&mut pagination.pages);
    pagination
}

fn set_totals(pages: &mut [Page]) {
    let total = pages.len();
    for page in pages {
        page.total = total;
    }
}
