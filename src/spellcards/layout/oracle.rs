use super::CardBounds;
use crate::markup::ContentBlock;
use unicode_width::UnicodeWidthStr;

/// Decides whether a candidate arrangement of blocks exceeds a page.
///
/// Implementations must answer for exactly the blocks given, in order, placed
/// on a page with `bounds`. Results are not cached by callers.
pub trait MeasurementOracle {
    fn overflows(&self, blocks: &[ContentBlock], bounds: &CardBounds) -> bool;
}

impl<F> MeasurementOracle for F
where
    F: Fn(&[ContentBlock], &CardBounds) -> bool,
{
    fn overflows(&self, blocks: &[ContentBlock], bounds: &CardBounds) -> bool {
        self(blocks, bounds)
    }
}

/// Measures blocks as wrapped terminal text.
///
/// Every line of a block's text is greedily word-wrapped to the card width
/// using display widths. List items are indented by two columns, horizontal
/// rules and blocks without text take one line, and `block_spacing` blank
/// lines separate consecutive blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextMetricsOracle;

const LIST_INDENT: usize = 2;

impl TextMetricsOracle {
    pub fn block_height(&self, block: &ContentBlock, width: usize) -> usize {
        let width = match block.tag() {
            Some("ul") | Some("ol") | Some("dl") => width.saturating_sub(LIST_INDENT),
            _ => width,
        };
        if block.tag() == Some("hr") || block.text().is_empty() {
            return 1;
        }
        block
            .text()
            .lines()
            .map(|line| wrapped_lines(line, width))
            .sum()
    }

    /// Total lines `blocks` occupy when stacked at `bounds.width`.
    pub fn measure(&self, blocks: &[ContentBlock], bounds: &CardBounds) -> usize {
        let content: usize = blocks
            .iter()
            .map(|block| self.block_height(block, bounds.width))
            .sum();
        content + bounds.block_spacing * blocks.len().saturating_sub(1)
    }
}

impl MeasurementOracle for TextMetricsOracle {
    fn overflows(&self, blocks: &[ContentBlock], bounds: &CardBounds) -> bool {
        self.measure(blocks, bounds) > bounds.height
    }
}

fn wrapped_lines(line: &str, width: usize) -> usize {
    let width = width.max(1);
    let mut lines = 1;
    let mut used = 0;

    for word in line.split_whitespace() {
        let w = word.width();
        let needed = if used == 0 { w } else { used + 1 + w };
        if needed <= width {
            used = needed;
            continue;
        }
        if used > 0 {
            lines += 1;
        }
        // words wider than the card break across lines
        let extra = w.saturating_sub(1) / width;
        lines += extra;
        used = w - extra * width;
    }

    lines
}
