use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CardsError, Result};
use crate::session::{Intent, Session};

/// Flips the pin of every entry in `ids`.
///
/// All ids are checked before anything changes, so one unknown id leaves every
/// pin as it was.
pub fn toggle<I: AsRef<str>>(session: &mut Session, ids: &[I]) -> Result<CmdResult> {
    if let Some(unknown) = ids
        .iter()
        .map(AsRef::as_ref)
        .find(|id| session.catalog().get(id).is_none())
    {
        return Err(CardsError::UnknownEntry(unknown.to_string()));
    }

    let mut result = CmdResult::default();
    for id in ids.iter().map(AsRef::as_ref) {
        session.update(Intent::TogglePin {
            entry: id.to_string(),
        })?;

        let verb = if session.pins().is_pinned(id) {
            "Pinned"
        } else {
            "Unpinned"
        };
        let title = session
            .catalog()
            .get(id)
            .map(|entry| entry.title.as_str())
            .unwrap_or(id);
        result.add_message(CmdMessage::success(format!("{} {}: {}", verb, id, title)));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_catalog;

    #[test]
    fn test_pins_and_unpins() {
        let mut session = Session::new(sample_catalog(), None).unwrap();

        let result = toggle(&mut session, &["heal", "light"]).unwrap();
        assert_eq!(result.messages[0].content, "Pinned heal: Heal");
        assert_eq!(session.pins().len(), 2);

        let result = toggle(&mut session, &["heal"]).unwrap();
        assert_eq!(result.messages[0].content, "Unpinned heal: Heal");
        assert!(!session.pins().is_pinned("heal"));
    }

    #[test]
    fn test_unknown_id_changes_nothing() {
        let mut session = Session::new(sample_catalog(), None).unwrap();
        let err = toggle(&mut session, &["heal", "missing"]).unwrap_err();

        assert!(matches!(err, CardsError::UnknownEntry(ref id) if id == "missing"));
        assert!(session.pins().is_empty());
    }
}
