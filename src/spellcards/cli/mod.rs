//! # CLI Behavior
//!
//! This is **one possible UI client** for spellcards, not the application
//! itself. The CLI is the only place that knows about terminal I/O, exit codes
//! and output formatting.
//!
//! For the overall architecture, see the crate-level documentation of the
//! `spellcards` library.
//!
//! ## One Invocation, One Session
//!
//! Every payload command loads the payload, builds the deck, then replays the
//! selection flags as intents before producing output:
//!
//! 1. `--mode GROUP` switches the facet group
//! 2. `--none FACET` turns a facet's "Any" off
//! 3. `--only FACET=VALUE` ticks a value (the first tick on a facet that
//!    still has "Any" on narrows it to that value)
//! 4. `--exclude FACET=VALUE` unticks a value
//! 5. `--pin ID` toggles pins
//! 6. `--hide-unpinned` hides everything not pinned
//!
//! Facets are named by title or attribute, values by label or raw value, so
//! `--only level=3` and `--only Levels="Level 3"` are the same selection.
//!
//! ## Module Structure
//!
//! - `commands`: Dispatch plus per-command handlers that call the API
//! - `render`: Output formatting through templates
//! - `setup`: Argument parsing via clap
//! - `styles`: Terminal styles and the `style` template filter
//! - `templates`: Output templates

mod commands;
mod render;
pub mod setup;
mod styles;
mod templates;

pub use commands::run;
