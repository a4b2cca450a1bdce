//! # Layout
//!
//! Splits an entry's content blocks into card-sized pages.
//!
//! The paginator never decides on its own whether content fits. That judgment
//! belongs to a [`MeasurementOracle`], which is handed the candidate blocks and
//! the bounds of the page being filled. The CLI uses [`TextMetricsOracle`], a
//! deterministic character-grid metric; tests use closures with synthetic
//! heights.
//!
//! Bounds are expressed in character columns and text lines. The first card of
//! an entry carries a header (type, level, actions, traits), so its content
//! area is `first_page_reserve` lines shorter than the rest.

use serde::{Deserialize, Serialize};

mod oracle;
mod paginate;

pub use oracle::{MeasurementOracle, TextMetricsOracle};
pub use paginate::{paginate, paginate_fixed, OverflowDiagnostic, Page, Pagination};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardBounds {
    pub width: usize,
    pub height: usize,
    pub first_page_reserve: usize,
    pub block_spacing: usize,
}

impl CardBounds {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            first_page_reserve: 0,
            block_spacing: 0,
        }
    }

    pub fn with_first_page_reserve(mut self, lines: usize) -> Self {
        self.first_page_reserve = lines;
        self
    }

    pub fn with_block_spacing(mut self, lines: usize) -> Self {
        self.block_spacing = lines;
        self
    }

    /// Lines available to content on the 1-based page `number`.
    pub fn content_height(&self, number: usize) -> usize {
        if number == 1 {
            self.height.saturating_sub(self.first_page_reserve)
        } else {
            self.height
        }
    }

    /// The bounds an oracle sees while page `number` is being filled.
    pub fn for_page(&self, number: usize) -> CardBounds {
        CardBounds {
            height: self.content_height(number),
            first_page_reserve: 0,
            ..*self
        }
    }
}
