//! Splitting entry markup into atomic content blocks.
//!
//! Only the top level of a fragment is split: each top-level element becomes one
//! block, and each non-blank run of top-level text becomes its own block.
//! Whitespace between elements renders nothing and is dropped. Blocks are never
//! split further, merged, or reordered downstream.

use crate::error::{CardsError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use serde::Serialize;

const VOID_ELEMENTS: &[&str] = &["area", "br", "col", "hr", "img", "input", "wbr"];

const LINE_ENDING_ELEMENTS: &[&str] = &[
    "br", "dd", "div", "dt", "h1", "h2", "h3", "h4", "h5", "h6", "li", "p", "tr",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentBlock {
    tag: Option<String>,
    markup: String,
    text: String,
}

impl ContentBlock {
    /// A block holding one top-level element.
    pub fn element(tag: impl Into<String>, markup: impl Into<String>) -> Self {
        let markup = markup.into();
        let text = plain_text(&markup);
        Self {
            tag: Some(tag.into()),
            markup,
            text,
        }
    }

    /// A block holding a bare run of text.
    pub fn text_run(text: impl Into<String>) -> Self {
        let markup = text.into();
        let text = plain_text(&markup);
        Self {
            tag: None,
            markup,
            text,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Visible text, one line per line-ending element, whitespace collapsed.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Splits `markup` into its top-level blocks, in document order.
pub fn split_blocks(entry_id: &str, markup: &str) -> Result<Vec<ContentBlock>> {
    let markup_error = |reason: String| CardsError::Markup {
        id: entry_id.to_string(),
        reason,
    };

    let mut reader = html_reader(markup);

    let mut blocks = Vec::new();
    let mut depth = 0usize;
    let mut element: Option<(usize, String)> = None;
    let mut text_start: Option<usize> = None;

    loop {
        let before = offset(&reader);
        let event = reader
            .read_event()
            .map_err(|err| markup_error(format!("{} at byte {}", err, before)))?;
        let after = offset(&reader);

        match event {
            Event::Start(e) => {
                let name = tag_name(&e);
                if depth == 0 {
                    flush_text(markup, &mut text_start, before, &mut blocks);
                    if is_void(&name) {
                        blocks.push(ContentBlock::element(name, &markup[before..after]));
                        continue;
                    }
                    element = Some((before, name));
                    depth = 1;
                } else if !is_void(&name) {
                    depth += 1;
                }
            }
            Event::Empty(e) => {
                if depth == 0 {
                    flush_text(markup, &mut text_start, before, &mut blocks);
                    blocks.push(ContentBlock::element(tag_name(&e), &markup[before..after]));
                }
            }
            Event::End(e) => {
                if is_void(&String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase()) {
                    continue;
                }
                if depth == 1 {
                    if let Some((start, name)) = element.take() {
                        blocks.push(ContentBlock::element(name, &markup[start..after]));
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Text(_) | Event::GeneralRef(_) | Event::CData(_) => {
                if depth == 0 && text_start.is_none() {
                    text_start = Some(before);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some((_, name)) = element {
        return Err(markup_error(format!("unclosed <{}>", name)));
    }
    flush_text(markup, &mut text_start, markup.len(), &mut blocks);

    Ok(blocks)
}

/// A reader that accepts HTML as people write it: unmatched end tags and bare `&`.
fn html_reader(markup: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(markup);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = false;
    config.allow_unmatched_ends = true;
    config.allow_dangling_amp = true;
    reader
}

fn offset(reader: &Reader<&[u8]>) -> usize {
    usize::try_from(reader.buffer_position()).unwrap_or(usize::MAX)
}

fn tag_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase()
}

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

fn flush_text(
    markup: &str,
    text_start: &mut Option<usize>,
    end: usize,
    blocks: &mut Vec<ContentBlock>,
) {
    if let Some(start) = text_start.take() {
        let run = markup[start..end].trim();
        if !run.is_empty() {
            blocks.push(ContentBlock::text_run(run));
        }
    }
}

/// Extracts visible text from a well-formed fragment.
fn plain_text(markup: &str) -> String {
    let mut reader = html_reader(markup);

    let mut raw = String::new();
    loop {
        match reader.read_event() {
            Ok(Event::Text(e)) => {
                if let Ok(text) = e.decode() {
                    raw.push_str(&text);
                }
            }
            Ok(Event::CData(e)) => raw.push_str(&String::from_utf8_lossy(&e)),
            Ok(Event::GeneralRef(e)) => match e.resolve_char_ref() {
                Ok(Some(c)) => raw.push(c),
                _ => {
                    let name = e.decode().map(|n| n.into_owned()).unwrap_or_default();
                    raw.push_str(&resolve_entity(&name));
                }
            },
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if tag_name(&e) == "br" {
                    raw.push('\n');
                }
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase();
                if LINE_ENDING_ELEMENTS.contains(&name.as_str()) {
                    raw.push('\n');
                } else if matches!(name.as_str(), "td" | "th") {
                    raw.push(' ');
                }
            }
            Ok(Event::Eof) | Err(_) => break,
            Ok(_) => {}
        }
    }

    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn resolve_entity(name: &str) -> String {
    let resolved = match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => " ",
        "copy" => "©",
        "mdash" => "—",
        "ndash" => "–",
        "hellip" => "…",
        "times" => "×",
        "lsquo" => "‘",
        "rsquo" => "’",
        "ldquo" => "“",
        "rdquo" => "”",
        _ => return format!("&{};", name),
    };
    resolved.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markups(blocks: &[ContentBlock]) -> Vec<&str> {
        blocks.iter().map(|b| b.markup()).collect()
    }

    #[test]
    fn test_splits_top_level_elements() {
        let blocks = split_blocks("x", "<p>One</p>\n<p>Two <em>b</em></p>\n<hr/>\n<ul><li>a</li><li>b</li></ul>")
            .unwrap();
        assert_eq!(
            markups(&blocks),
            vec!["<p>One</p>", "<p>Two <em>b</em></p>", "<hr/>", "<ul><li>a</li><li>b</li></ul>"]
        );
        assert_eq!(blocks[2].tag(), Some("hr"));
        assert_eq!(blocks[3].text(), "a\nb");
    }

    #[test]
    fn test_nested_same_name_elements_stay_together() {
        let blocks = split_blocks("x", "<div><div>a</div><div>b</div></div><p>c</p>").unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].markup(), "<div><div>a</div><div>b</div></div>");
    }

    #[test]
    fn test_bare_text_runs_become_blocks() {
        let blocks = split_blocks("x", "Lead text <p>para</p> tail").unwrap();
        assert_eq!(markups(&blocks), vec!["Lead text", "<p>para</p>", "tail"]);
        assert_eq!(blocks[0].tag(), None);
    }

    #[test]
    fn test_unclosed_void_elements_are_atomic() {
        let blocks = split_blocks("x", "<p>a<br>b</p><hr><p>c</p>").unwrap();
        assert_eq!(markups(&blocks), vec!["<p>a<br>b</p>", "<hr>", "<p>c</p>"]);
        assert_eq!(blocks[0].text(), "a\nb");
    }

    #[test]
    fn test_entities_are_decoded_in_text() {
        let blocks = split_blocks("x", "<p>Fish&nbsp;&amp;&#160;chips &copy;</p>").unwrap();
        assert_eq!(blocks[0].text(), "Fish & chips ©");
    }

    #[test]
    fn test_bare_ampersand_is_text() {
        let blocks = split_blocks("x", "<p>Fish & chips</p>").unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].markup(), "<p>Fish & chips</p>");
        assert_eq!(blocks[0].text(), "Fish & chips");

        let blocks = split_blocks("x", "<p>AC &lt; 10 & more</p><p>Fire & Ice</p>").unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].text(), "AC < 10 & more");
        assert_eq!(blocks[1].text(), "Fire & Ice");
    }

    #[test]
    fn test_icons_inside_paragraph_do_not_split() {
        let blocks = split_blocks(
            "x",
            r#"<p>Cast <img class="action" src="icons/one-action.svg" alt="[one-action]"/> now</p>"#,
        )
        .unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text(), "Cast now");
    }

    #[test]
    fn test_empty_markup_has_no_blocks() {
        assert!(split_blocks("x", "").unwrap().is_empty());
        assert!(split_blocks("x", "  \n ").unwrap().is_empty());
    }

    #[test]
    fn test_unclosed_element_names_entry() {
        let err = split_blocks("fireball", "<p>never closed").unwrap_err();
        assert!(matches!(err, CardsError::Markup { ref id, .. } if id == "fireball"));
    }

    #[test]
    fn test_table_cells_are_spaced() {
        let blocks =
            split_blocks("x", "<table><tr><th>Die</th><th>Effect</th></tr><tr><td>1</td><td>Ok</td></tr></table>")
                .unwrap();
        assert_eq!(blocks[0].text(), "Die Effect\n1 Ok");
    }
}
