use crate::commands::{CmdMessage, CmdResult};
use crate::deck::{Card, Deck};
use crate::error::Result;
use crate::icons::IconStyle;
use crate::session::Session;
use std::collections::BTreeMap;

/// Assembles the print set: every page of every visible entry.
pub fn run(
    session: &Session,
    deck: &Deck,
    icons: &IconStyle,
    copyright_holders: &BTreeMap<String, String>,
) -> Result<CmdResult> {
    let mut cards = Vec::new();
    let mut entries = 0;

    for entry in session.visible_entries() {
        let pinned = session.pins().is_pinned(&entry.id);
        let pages = deck.pages(&entry.id);
        if !pages.is_empty() {
            entries += 1;
        }
        cards.extend(
            pages
                .iter()
                .map(|page| Card::assemble(entry, page, icons, copyright_holders, pinned)),
        );
    }

    let mut result = CmdResult::default();
    if cards.is_empty() {
        result.add_message(CmdMessage::warning("No visible cards to print"));
    } else {
        result.add_message(CmdMessage::info(format!(
            "{} cards from {} entries",
            cards.len(),
            entries
        )));
    }
    Ok(result.with_cards(cards))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::CardBounds;
    use crate::markup::ContentBlock;
    use crate::session::Intent;
    use crate::test_utils::sample_catalog;

    fn one_block_per_page(blocks: &[ContentBlock], _: &CardBounds) -> bool {
        blocks.len() > 1
    }

    fn setup() -> (Session, Deck) {
        let catalog = sample_catalog();
        let deck = Deck::build(
            &catalog,
            &CardBounds::new(42, 30),
            &one_block_per_page,
            &IconStyle::Glyph,
        )
        .unwrap();
        (Session::new(catalog, None).unwrap(), deck)
    }

    #[test]
    fn test_cards_follow_catalog_then_page_order() {
        let (session, deck) = setup();
        let result = run(&session, &deck, &IconStyle::Glyph, &BTreeMap::new()).unwrap();

        let order: Vec<_> = result
            .cards
            .iter()
            .map(|c| (c.entry_id.as_str(), c.number))
            .collect();
        assert_eq!(
            order,
            vec![
                ("fireball", 1),
                ("fireball", 2),
                ("fireball", 3),
                ("fireball", 4),
                ("heal", 1),
                ("light", 1),
                ("shield", 1),
            ]
        );
        assert_eq!(result.messages[0].content, "7 cards from 4 entries");
    }

    #[test]
    fn test_pinned_entry_is_printed_in_full() {
        let (mut session, deck) = setup();
        session
            .update(Intent::TogglePin {
                entry: "fireball".into(),
            })
            .unwrap();
        session
            .update(Intent::ToggleHideUnpinned { on: true })
            .unwrap();

        let result = run(&session, &deck, &IconStyle::Glyph, &BTreeMap::new()).unwrap();
        assert_eq!(result.cards.len(), 4);
        assert!(result.cards.iter().all(|c| c.pinned));
    }

    #[test]
    fn test_empty_print_set_warns() {
        let (mut session, deck) = setup();
        session
            .update(Intent::ToggleHideUnpinned { on: true })
            .unwrap();

        let result = run(&session, &deck, &IconStyle::Glyph, &BTreeMap::new()).unwrap();
        assert!(result.cards.is_empty());
        assert_eq!(result.messages[0].content, "No visible cards to print");
    }
}
