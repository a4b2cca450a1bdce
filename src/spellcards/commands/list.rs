use crate::commands::{CmdResult, ListedEntry};
use crate::deck::Deck;
use crate::error::Result;
use crate::session::Session;

/// Lists the entries currently visible, in catalog order.
pub fn run(session: &Session, deck: &Deck) -> Result<CmdResult> {
    let entries = session
        .visible_entries()
        .map(|entry| ListedEntry {
            id: entry.id.clone(),
            title: entry.title.clone(),
            type_line: entry.type_line(),
            source: entry.source.clone(),
            pages: deck.page_count(&entry.id),
            pinned: session.pins().is_pinned(&entry.id),
        })
        .collect();

    Ok(CmdResult::default().with_listed_entries(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::IconStyle;
    use crate::layout::{CardBounds, TextMetricsOracle};
    use crate::model::FilterValue;
    use crate::session::Intent;
    use crate::test_utils::sample_catalog;

    fn setup() -> (Session, Deck) {
        let catalog = sample_catalog();
        let deck = Deck::build(
            &catalog,
            &CardBounds::new(42, 30),
            &TextMetricsOracle,
            &IconStyle::Glyph,
        )
        .unwrap();
        (Session::new(catalog, None).unwrap(), deck)
    }

    #[test]
    fn test_lists_all_entries_by_default() {
        let (session, deck) = setup();
        let result = run(&session, &deck).unwrap();

        let ids: Vec<_> = result.listed_entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["fireball", "heal", "light", "shield"]);
        assert_eq!(result.listed_entries[0].type_line, "spell 3");
        assert_eq!(result.listed_entries[0].pages, 1);
    }

    #[test]
    fn test_hidden_entries_are_left_out() {
        let (mut session, deck) = setup();
        session
            .update(Intent::ToggleValue {
                facet: "Source".into(),
                value: FilterValue::from("Player Core 2"),
                on: true,
            })
            .unwrap();
        session
            .update(Intent::TogglePin {
                entry: "heal".into(),
            })
            .unwrap();

        let result = run(&session, &deck).unwrap();
        let listed: Vec<_> = result
            .listed_entries
            .iter()
            .map(|e| (e.id.as_str(), e.pinned))
            .collect();
        assert_eq!(listed, vec![("heal", true), ("light", false)]);
    }
}
