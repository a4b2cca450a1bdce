use crate::commands::{CmdResult, FacetOptionView, FacetView, FacetsReport};
use crate::error::Result;
use crate::session::Session;

/// Describes the active facet group and the state of each of its filters.
pub fn run(session: &Session) -> Result<CmdResult> {
    let registry = session.registry();

    let facets = registry
        .filters()
        .iter()
        .map(|filter| FacetView {
            title: filter.title().to_string(),
            attribute: filter.attribute().to_string(),
            all_selected: filter.is_all_selected(),
            options: filter
                .domain()
                .options
                .iter()
                .map(|option| FacetOptionView {
                    label: option.label.clone(),
                    value: option.value.clone(),
                    selected: filter.selection().contains(&option.value),
                    checked: filter.is_checked(&option.value),
                })
                .collect(),
        })
        .collect();

    let report = FacetsReport {
        active_group: registry.active_group().to_string(),
        groups: registry
            .group_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
        hide_unpinned: session.hides_unpinned(),
        pinned: session.pins().iter().map(str::to_string).collect(),
        facets,
    };

    Ok(CmdResult::default().with_facets(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FilterValue;
    use crate::session::Intent;
    use crate::test_utils::sample_catalog;

    #[test]
    fn test_describes_standard_group() {
        let session = Session::new(sample_catalog(), None).unwrap();
        let report = run(&session).unwrap().facets.unwrap();

        assert_eq!(report.active_group, "standard");
        assert_eq!(report.groups, vec!["standard"]);
        let titles: Vec<_> = report.facets.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Type", "Levels", "Rarity", "Tradition", "Traits", "Source"]
        );
        let tradition = &report.facets[3];
        assert_eq!(tradition.options[0].label, "No Tradition");
        assert!(tradition.all_selected);
        assert!(tradition.options.iter().all(|o| o.selected && !o.checked));
        assert!(report.pinned.is_empty());
    }

    #[test]
    fn test_lists_pins_in_id_order() {
        let mut session = Session::new(sample_catalog(), None).unwrap();
        for entry in ["shield", "heal"] {
            session
                .update(Intent::TogglePin {
                    entry: entry.into(),
                })
                .unwrap();
        }

        let report = run(&session).unwrap().facets.unwrap();
        assert_eq!(report.pinned, vec!["heal", "shield"]);
    }

    #[test]
    fn test_reflects_ticked_values() {
        let mut session = Session::new(sample_catalog(), None).unwrap();
        session
            .update(Intent::ToggleValue {
                facet: "Levels".into(),
                value: FilterValue::Number(3),
                on: true,
            })
            .unwrap();

        let report = run(&session).unwrap().facets.unwrap();
        let levels = &report.facets[1];
        assert!(!levels.all_selected);
        let states: Vec<_> = levels
            .options
            .iter()
            .map(|o| (o.label.as_str(), o.selected, o.checked))
            .collect();
        assert_eq!(
            states,
            vec![("Level 1", false, false), ("Level 3", true, true)]
        );
    }
}
