//! # Rendering Module
//!
//! Turns `CmdResult` parts into terminal text (or the HTML print sheet) through
//! the templates in `templates/`.
//!
//! Layout calculations (column padding, truncation, labels) stay in Rust
//! because they need Unicode-aware width math. Templates only pick styles from
//! semantic flags and arrange the pieces.

use super::styles::{colors_supported, environment, names};
use super::templates::{
    FACETS_TEMPLATE, LIST_TEMPLATE, MESSAGES_TEMPLATE, PAGES_TEMPLATE, SHEET_TEMPLATE,
    TEXT_LIST_TEMPLATE,
};
use serde::Serialize;
use spellcards::commands::{
    CmdMessage, FacetsReport, ListedEntry, MessageLevel, PageReport,
};
use spellcards::deck::Card;
use spellcards::error::{CardsError, Result};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const PIN_MARKER: &str = "⚲";
/// Widest page preview line before it is cut with an ellipsis.
pub const PREVIEW_WIDTH: usize = 76;

#[derive(Serialize)]
struct EntryLine {
    marker: String,
    id: String,
    padding: String,
    title: String,
    type_line: String,
    pages_note: String,
}

#[derive(Serialize)]
struct ListData {
    entries: Vec<EntryLine>,
    summary: String,
}

#[derive(Serialize)]
struct OptionLine {
    #[serde(rename = "box")]
    check_box: String,
    style: String,
    label: String,
}

#[derive(Serialize)]
struct FacetBlock {
    title: String,
    any_box: String,
    any_style: String,
    options: Vec<OptionLine>,
}

#[derive(Serialize)]
struct FacetsData {
    active_group: String,
    other_groups: String,
    hide_unpinned: bool,
    pinned: String,
    facets: Vec<FacetBlock>,
}

#[derive(Serialize)]
struct PageBlock {
    label: String,
    style: String,
    usage: String,
    lines: Vec<String>,
}

#[derive(Serialize)]
struct ReportBlock {
    title: String,
    heading: String,
    pages: Vec<PageBlock>,
}

#[derive(Serialize)]
struct PagesData {
    reports: Vec<ReportBlock>,
}

#[derive(Serialize)]
struct TextListData {
    lines: Vec<String>,
    empty_message: String,
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: String,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

#[derive(Serialize)]
struct SheetData<'a> {
    title: String,
    cards: &'a [Card],
}

fn render_template<T: Serialize>(
    name: &'static str,
    source: &'static str,
    data: &T,
    use_color: Option<bool>,
) -> std::result::Result<String, minijinja::Error> {
    let mut env = environment(use_color.unwrap_or_else(colors_supported));
    env.add_template(name, source)?;
    env.get_template(name)?.render(data)
}

pub fn render_entry_list(entries: &[ListedEntry]) -> String {
    render_entry_list_internal(entries, None)
}

fn render_entry_list_internal(entries: &[ListedEntry], use_color: Option<bool>) -> String {
    let id_width = entries.iter().map(|e| e.id.width()).max().unwrap_or(0);
    let cards: usize = entries.iter().map(|e| e.pages).sum();

    let lines = entries
        .iter()
        .map(|e| EntryLine {
            marker: if e.pinned { PIN_MARKER } else { " " }.to_string(),
            id: e.id.clone(),
            padding: " ".repeat(id_width - e.id.width() + 2),
            title: e.title.clone(),
            type_line: e.type_line.clone(),
            pages_note: match e.pages {
                0 => "  (no cards)".to_string(),
                1 => String::new(),
                n => format!("  ({} cards)", n),
            },
        })
        .collect();

    let data = ListData {
        entries: lines,
        summary: format!("{} entries, {} cards", entries.len(), cards),
    };

    render_template("list", LIST_TEMPLATE, &data, use_color)
        .unwrap_or_else(|e| format!("Render error: {}\n", e))
}

pub fn render_facets(report: &FacetsReport) -> String {
    render_facets_internal(report, None)
}

fn render_facets_internal(report: &FacetsReport, use_color: Option<bool>) -> String {
    let others: Vec<&str> = report
        .groups
        .iter()
        .map(String::as_str)
        .filter(|g| *g != report.active_group)
        .collect();

    let facets = report
        .facets
        .iter()
        .map(|facet| FacetBlock {
            title: facet.title.clone(),
            any_box: check_box(facet.all_selected).to_string(),
            any_style: if facet.all_selected {
                names::CHECKED
            } else {
                names::MUTED
            }
            .to_string(),
            options: facet
                .options
                .iter()
                .map(|option| OptionLine {
                    check_box: if option.checked {
                        "[x]"
                    } else if option.selected {
                        "[·]"
                    } else {
                        "[ ]"
                    }
                    .to_string(),
                    style: if option.checked {
                        names::CHECKED
                    } else if option.selected {
                        names::SELECTED
                    } else {
                        names::MUTED
                    }
                    .to_string(),
                    label: option.label.clone(),
                })
                .collect(),
        })
        .collect();

    let data = FacetsData {
        active_group: report.active_group.clone(),
        other_groups: if others.is_empty() {
            String::new()
        } else {
            format!(" (also: {})", others.join(", "))
        },
        hide_unpinned: report.hide_unpinned,
        pinned: report.pinned.join(", "),
        facets,
    };

    render_template("facets", FACETS_TEMPLATE, &data, use_color)
        .unwrap_or_else(|e| format!("Render error: {}\n", e))
}

fn check_box(on: bool) -> &'static str {
    if on {
        "[x]"
    } else {
        "[ ]"
    }
}

pub fn render_pages(reports: &[PageReport]) -> String {
    render_pages_internal(reports, None)
}

fn render_pages_internal(reports: &[PageReport], use_color: Option<bool>) -> String {
    let reports = reports
        .iter()
        .map(|report| ReportBlock {
            title: report.title.clone(),
            heading: format!(
                "({}, {}, {} {})",
                report.entry_id,
                report.source,
                report.pages.len(),
                if report.pages.len() == 1 { "card" } else { "cards" }
            ),
            pages: report
                .pages
                .iter()
                .map(|page| PageBlock {
                    label: format!("Card {}/{}", page.number, page.total),
                    style: if page.overflows {
                        names::WARNING
                    } else {
                        names::INFO
                    }
                    .to_string(),
                    usage: format!(
                        "{} blocks, {}/{} lines{}",
                        page.blocks,
                        page.lines,
                        page.capacity,
                        if page.overflows { ", overflows" } else { "" }
                    ),
                    lines: page
                        .text
                        .lines()
                        .map(|line| truncate_to_width(line, PREVIEW_WIDTH))
                        .collect(),
                })
                .collect(),
        })
        .collect();

    render_template("pages", PAGES_TEMPLATE, &PagesData { reports }, use_color)
        .unwrap_or_else(|e| format!("Render error: {}\n", e))
}

pub fn render_text_list(lines: &[String], empty_message: &str) -> String {
    render_text_list_internal(lines, empty_message, None)
}

fn render_text_list_internal(
    lines: &[String],
    empty_message: &str,
    use_color: Option<bool>,
) -> String {
    let data = TextListData {
        lines: lines.to_vec(),
        empty_message: empty_message.to_string(),
    };

    render_template("text_list", TEXT_LIST_TEMPLATE, &data, use_color)
        .unwrap_or_else(|_| format!("{}\n", empty_message))
}

/// Renders command messages using the template system with themed styles.
pub fn render_messages(messages: &[CmdMessage]) -> String {
    render_messages_internal(messages, None)
}

fn render_messages_internal(messages: &[CmdMessage], use_color: Option<bool>) -> String {
    if messages.is_empty() {
        return String::new();
    }

    let data = MessagesData {
        messages: messages
            .iter()
            .map(|msg| MessageData {
                content: msg.content.clone(),
                style: match msg.level {
                    MessageLevel::Info => names::INFO,
                    MessageLevel::Success => names::SUCCESS,
                    MessageLevel::Warning => names::WARNING,
                    MessageLevel::Error => names::ERROR,
                }
                .to_string(),
            })
            .collect(),
    };

    render_template("messages", MESSAGES_TEMPLATE, &data, use_color).unwrap_or_else(|_| {
        messages
            .iter()
            .map(|m| format!("{}\n", m.content))
            .collect()
    })
}

pub fn print_messages(messages: &[CmdMessage]) {
    let output = render_messages(messages);
    if !output.is_empty() {
        print!("{}", output);
    }
}

/// Messages on stderr, for when stdout carries a document.
pub fn eprint_messages(messages: &[CmdMessage]) {
    let output = render_messages_internal(messages, Some(false));
    if !output.is_empty() {
        eprint!("{}", output);
    }
}

/// The HTML print sheet. Unlike terminal output a broken sheet is an error.
pub fn render_sheet(title: &str, cards: &[Card]) -> Result<String> {
    let data = SheetData {
        title: title.to_string(),
        cards,
    };
    render_template("sheet.html", SHEET_TEMPLATE, &data, Some(false))
        .map_err(|e| CardsError::Api(format!("could not render print sheet: {}", e)))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
