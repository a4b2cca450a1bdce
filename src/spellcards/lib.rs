//! # Spellcards Architecture
//!
//! Spellcards turns a catalog of rule-text entries into printable index cards
//! and lets a user narrow down which cards get printed. It is a library that
//! happens to have a CLI client; nothing below the CLI layer knows about a
//! terminal.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders templates, handles terminal I/O│
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - One CardsApi per session                                 │
//! │  - Normalizes inputs (typed facet values → domain values)   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per operation, returns CmdResult              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core                                                       │
//! │  - model, markup, icons: the catalog and its content        │
//! │  - layout, deck: pagination into cards                      │
//! │  - facets, pins, session: what is visible                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Pipelines
//!
//! Content flows one way, once per session:
//!
//! ```text
//! entry.description ─▶ icons ─▶ markup::split_blocks ─▶ layout::paginate ─▶ Deck
//! ```
//!
//! Visibility is recomputed after every user action:
//!
//! ```text
//! Intent ─▶ Session::update ─▶ FilterRegistry + PinSet ─▶ Visibility
//! ```
//!
//! Pagination depends on a [`layout::MeasurementOracle`] passed in by the
//! caller, so it can be driven by a real layout engine or by synthetic
//! heights in tests.
//!
//! ## Testing Strategy
//!
//! Core modules and commands carry unit tests next to the code; that is where
//! most behavior is pinned down. `tests/` drives the binary end to end.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, one session per [`api::CardsApi`]
//! - [`commands`]: One module per operation
//! - [`model`]: Entries, attributes and payload loading
//! - [`markup`]: Splitting descriptions into content blocks
//! - [`icons`]: Action-cost token substitution
//! - [`layout`]: Measurement oracles and the paginator
//! - [`deck`]: Pages per entry and card assembly
//! - [`facets`]: Facet specs, filters and the filter registry
//! - [`pins`], [`session`]: Pins, intents and visibility
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing and templated rendering for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod deck;
pub mod error;
pub mod facets;
pub mod icons;
pub mod layout;
pub mod markup;
pub mod model;
pub mod pins;
pub mod session;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
