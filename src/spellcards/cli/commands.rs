//! Dispatch and per-command handlers.
//!
//! - `run()`: parses arguments, sets up logging, dispatches (called by `main.rs`)
//! - `open_session()`: loads config and payload, replays the selection flags
//! - `handle_*()`: call the API and print the rendered result

use super::render::{
    eprint_messages, print_messages, render_entry_list, render_facets, render_pages, render_sheet,
    render_text_list,
};
use super::setup::{Cli, Commands, SelectionArgs};
use clap::Parser;
use directories::ProjectDirs;
use spellcards::api::{self, CardsApi};
use spellcards::commands::config::ConfigAction;
use spellcards::commands::CmdMessage;
use spellcards::config::{CardsConfig, KEYS};
use spellcards::error::{CardsError, Result};
use spellcards::icons::IconStyle;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_dir = resolve_config_dir(cli.config_dir)?;
    debug!(config_dir = %config_dir.display(), "resolved config dir");

    match cli.command {
        Commands::List { payload, selection } => handle_list(&config_dir, &payload, &selection),
        Commands::Facets { payload, selection } => {
            handle_facets(&config_dir, &payload, &selection)
        }
        Commands::Pages { payload, entry } => handle_pages(&config_dir, &payload, entry),
        Commands::Print {
            payload,
            output,
            selection,
        } => handle_print(&config_dir, &payload, output, &selection),
        Commands::Config { key, value } => handle_config(&config_dir, key, value),
    }
}

/// Logs go to stderr. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

fn resolve_config_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    ProjectDirs::from("com", "spellcards", "spellcards")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| CardsError::Config("could not determine a config directory".to_string()))
}

/// Opens the payload and replays the selection flags. Returns the pin messages.
fn open_session(
    config_dir: &Path,
    payload: &Path,
    for_print: bool,
    selection: &SelectionArgs,
) -> Result<(CardsApi, Vec<CmdMessage>)> {
    let config = CardsConfig::load(config_dir)?;
    let icons = if for_print {
        config.html_icons()
    } else {
        IconStyle::Glyph
    };

    let mut api = CardsApi::open(payload, config, icons)?;
    let messages = apply_selection(&mut api, selection)?;
    Ok((api, messages))
}

fn apply_selection(api: &mut CardsApi, selection: &SelectionArgs) -> Result<Vec<CmdMessage>> {
    if let Some(group) = &selection.mode {
        api.switch_mode(group)?;
    }
    for facet in &selection.none {
        api.select_all(facet, false)?;
    }
    for pair in &selection.only {
        let (facet, value) = split_pair(pair)?;
        api.select_value(facet, value, true)?;
    }
    for pair in &selection.exclude {
        let (facet, value) = split_pair(pair)?;
        api.select_value(facet, value, false)?;
    }

    let mut messages = Vec::new();
    if !selection.pin.is_empty() {
        messages = api.toggle_pins(selection.pin.as_slice())?.messages;
    }
    if selection.hide_unpinned {
        api.hide_unpinned(true)?;
    }
    Ok(messages)
}

fn split_pair(pair: &str) -> Result<(&str, &str)> {
    pair.split_once('=')
        .map(|(facet, value)| (facet.trim(), value.trim()))
        .ok_or_else(|| CardsError::Api(format!("expected FACET=VALUE, got `{}`", pair)))
}

fn handle_list(config_dir: &Path, payload: &Path, selection: &SelectionArgs) -> Result<()> {
    let (api, pin_messages) = open_session(config_dir, payload, false, selection)?;
    let result = api.list()?;

    print_messages(&pin_messages);
    print!("{}", render_entry_list(&result.listed_entries));
    print_messages(&result.messages);
    Ok(())
}

fn handle_facets(config_dir: &Path, payload: &Path, selection: &SelectionArgs) -> Result<()> {
    let (api, pin_messages) = open_session(config_dir, payload, false, selection)?;
    let result = api.facets()?;

    print_messages(&pin_messages);
    if let Some(report) = &result.facets {
        print!("{}", render_facets(report));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_pages(config_dir: &Path, payload: &Path, entry: Option<String>) -> Result<()> {
    let (api, _) = open_session(config_dir, payload, false, &SelectionArgs::default())?;
    let result = api.pages(entry.as_deref())?;

    print!("{}", render_pages(&result.page_reports));
    print_messages(&result.messages);
    Ok(())
}

fn handle_print(
    config_dir: &Path,
    payload: &Path,
    output: Option<PathBuf>,
    selection: &SelectionArgs,
) -> Result<()> {
    let (api, mut messages) = open_session(config_dir, payload, true, selection)?;
    let result = api.sheet()?;
    messages.extend(result.messages);

    let title = payload
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "spellcards".to_string());
    let html = render_sheet(&title, &result.cards)?;

    match output {
        Some(path) => {
            std::fs::write(&path, html)?;
            messages.push(CmdMessage::success(format!(
                "Print sheet written to {}",
                path.display()
            )));
            print_messages(&messages);
        }
        None => {
            print!("{}", html);
            eprint_messages(&messages);
        }
    }
    Ok(())
}

fn handle_config(config_dir: &Path, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key.clone(), value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = api::configure(config_dir, action)?;

    if key.is_none() {
        let mut lines = Vec::new();
        if let Some(config) = &result.config {
            for k in KEYS {
                lines.push(format!("{} = {}", k, config.get(k).unwrap_or_default()));
            }
            for (source, holder) in &config.copyright_holders {
                lines.push(format!("copyright: {} = {}", source, holder));
            }
        }
        print!("{}", render_text_list(&lines, "No configuration values."));
    }
    print_messages(&result.messages);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_split_on_first_equals() {
        assert_eq!(split_pair("level=3").unwrap(), ("level", "3"));
        assert_eq!(split_pair("Traits = a=b").unwrap(), ("Traits", "a=b"));
        assert!(matches!(split_pair("level"), Err(CardsError::Api(_))));
    }

    #[test]
    fn test_explicit_config_dir_wins() {
        let dir = PathBuf::from("/tmp/spellcards");
        assert_eq!(resolve_config_dir(Some(dir.clone())).unwrap(), dir);
    }
}
