//! Styles for the spellcards CLI.
//!
//! Templates only ever name semantic styles (`{{ title | style("title") }}`);
//! the actual colors live here. When stdout cannot show colors (pipes,
//! `TERM=dumb`) the `style` filter returns the text unchanged, so templates
//! never need to care.
//!
//! A style name that is not registered is rendered with a `(!?)` prefix so a
//! typo in a template shows up in the output instead of silently losing its
//! styling.

use console::{Style, Term};
use minijinja::{Environment, Value};
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const MISSING_STYLE_INDICATOR: &str = "(!?)";

/// Style identifiers shared between templates and renderers.
pub mod names {
    pub const TITLE: &str = "title";
    pub const MUTED: &str = "muted";
    pub const PINNED: &str = "pinned";
    pub const SELECTED: &str = "selected";
    pub const CHECKED: &str = "checked";
    pub const ERROR: &str = "error";
    pub const WARNING: &str = "warning";
    pub const SUCCESS: &str = "success";
    pub const INFO: &str = "info";
}

pub static CARDS_THEME: Lazy<HashMap<&'static str, Style>> = Lazy::new(|| {
    let muted = Style::new().color256(245);
    HashMap::from([
        (names::TITLE, Style::new().bold()),
        (names::MUTED, muted.clone()),
        (names::PINNED, Style::new().yellow().bold()),
        (names::SELECTED, Style::new().green()),
        (names::CHECKED, Style::new().green().bold()),
        (names::ERROR, Style::new().red().bold()),
        (names::WARNING, Style::new().yellow().bold()),
        (names::SUCCESS, Style::new().green()),
        (names::INFO, muted),
    ])
});

pub fn colors_supported() -> bool {
    Term::stdout().features().colors_supported()
}

/// A template environment with the `style` filter registered.
pub fn environment(use_color: bool) -> Environment<'static> {
    let mut env = Environment::new();
    env.add_filter("style", move |value: Value, name: String| -> String {
        let text = value.to_string();
        match CARDS_THEME.get(name.as_str()) {
            Some(style) if use_color => style.clone().force_styling(true).apply_to(text).to_string(),
            Some(_) => text,
            None => format!("{} {}", MISSING_STYLE_INDICATOR, text),
        }
    });
    env
}
