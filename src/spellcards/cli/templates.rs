//! # CLI Templates
//!
//! Output is rendered from stand-alone minijinja template files, included here
//! as string constants. Keeping them out of the Rust code makes them easier to
//! edit and diff.
//!
//! Terminal templates put every output line on one template line and emit the
//! newline explicitly at its end, so loops and conditionals never leak blank
//! lines. Layout math (padding, counts, labels) is done in `render.rs`; the
//! templates only pick styles and arrange the pieces.
//!
//! `sheet.html` is rendered with HTML auto-escaping. Card bodies and action
//! icons are already markup and go through `|safe`.

pub const LIST_TEMPLATE: &str = include_str!("templates/list.tmp");
pub const FACETS_TEMPLATE: &str = include_str!("templates/facets.tmp");
pub const PAGES_TEMPLATE: &str = include_str!("templates/pages.tmp");
pub const TEXT_LIST_TEMPLATE: &str = include_str!("templates/text_list.tmp");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.tmp");
pub const SHEET_TEMPLATE: &str = include_str!("templates/sheet.html.tmp");
