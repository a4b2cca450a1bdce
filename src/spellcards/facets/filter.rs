//! One live facet: a selection over a resolved domain.
//!
//! | Event                       | Result                                          |
//! |-----------------------------|-------------------------------------------------|
//! | initial                     | all selected, selection = domain                |
//! | all ON                      | selection = domain, no individual ticks         |
//! | all OFF                     | selection = ∅                                   |
//! | value ON while all selected | selection = {value} (other values dropped)      |
//! | value ON                    | selection ∪ {value}                             |
//! | value OFF                   | selection \ {value}                             |
//!
//! Value events recompute `all_selected` as `selection == domain`, so the flag
//! and the selection can never disagree. "All" events set the flag directly:
//! over an empty domain, turning "All" off still makes the facet reject every
//! entry.

use super::spec::{FacetDomain, FacetSpec};
use crate::error::{CardsError, Result};
use crate::model::{Attribute, AttributeValue, Entry, FilterValue};
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct FacetFilter {
    spec: FacetSpec,
    domain: FacetDomain,
    selection: BTreeSet<FilterValue>,
    all_selected: bool,
    /// Individually ticked values; display state only.
    checked: BTreeSet<FilterValue>,
}

impl FacetFilter {
    pub fn new(spec: FacetSpec, entries: &[Entry]) -> Self {
        let domain = spec.resolve(entries);
        Self {
            selection: domain.values.clone(),
            all_selected: true,
            checked: BTreeSet::new(),
            spec,
            domain,
        }
    }

    pub fn title(&self) -> &str {
        &self.spec.title
    }

    pub fn attribute(&self) -> &Attribute {
        &self.spec.attribute
    }

    pub fn domain(&self) -> &FacetDomain {
        &self.domain
    }

    pub fn selection(&self) -> &BTreeSet<FilterValue> {
        &self.selection
    }

    pub fn is_all_selected(&self) -> bool {
        self.all_selected
    }

    pub fn is_checked(&self, value: &FilterValue) -> bool {
        self.checked.contains(value)
    }

    pub fn toggle_all(&mut self, on: bool) {
        self.checked.clear();
        if on {
            self.selection = self.domain.values.clone();
        } else {
            self.selection.clear();
        }
        self.all_selected = on;
    }

    pub fn toggle_value(&mut self, value: &FilterValue, on: bool) -> Result<()> {
        if !self.domain.contains(value) {
            return Err(CardsError::UnknownFacetValue {
                facet: self.spec.title.clone(),
                value: value.to_string(),
            });
        }

        if on {
            if self.all_selected {
                self.selection.clear();
                self.checked.clear();
            }
            self.selection.insert(value.clone());
            self.checked.insert(value.clone());
        } else {
            self.selection.remove(value);
            self.checked.remove(value);
        }
        self.normalize();
        Ok(())
    }

    /// Whether `entry` passes this facet.
    ///
    /// An entry that does not carry the attribute never passes.
    pub fn matches(&self, entry: &Entry) -> bool {
        let Some(value) = entry.attribute(&self.spec.attribute) else {
            return false;
        };
        if self.all_selected {
            return true;
        }
        match value {
            AttributeValue::Scalar(value) => self.selection.contains(&value),
            AttributeValue::Set(values) => !values.is_disjoint(&self.selection),
        }
    }

    fn normalize(&mut self) {
        self.all_selected = self.selection == self.domain.values;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facets::spec::FacetSpec;
    use crate::model::{Catalog, NO_TRADITION};
    use crate::test_utils::{entry_json, sample_catalog};
    use serde_json::json;

    fn tradition_filter(catalog: &Catalog) -> FacetFilter {
        FacetFilter::new(
            FacetSpec::derived("Tradition", Attribute::Traditions),
            catalog.entries(),
        )
    }

    fn text(s: &str) -> FilterValue {
        FilterValue::from(s)
    }

    fn passing(filter: &FacetFilter, catalog: &Catalog) -> Vec<String> {
        catalog
            .entries()
            .iter()
            .filter(|e| filter.matches(e))
            .map(|e| e.id.clone())
            .collect()
    }

    #[test]
    fn test_starts_with_everything_selected() {
        let catalog = sample_catalog();
        let filter = tradition_filter(&catalog);
        assert!(filter.is_all_selected());
        assert_eq!(filter.selection(), &filter.domain().values);
        assert_eq!(passing(&filter, &catalog).len(), 4);
    }

    #[test]
    fn test_all_selected_passes_sentinel_and_empty_sets() {
        let catalog = sample_catalog();
        let traits = FacetFilter::new(FacetSpec::derived("Traits", Attribute::Traits), catalog.entries());

        let mut bare = entry_json("Bare", "spell", 1, &[]);
        bare["traits"] = json!([]);
        let lonely = Catalog::from_json(&json!({ "bare": bare }).to_string()).unwrap();
        let entry = lonely.get("bare").unwrap();

        assert!(traits.matches(entry));
        assert!(tradition_filter(&catalog).matches(entry));
        assert!(entry.traditions.contains(NO_TRADITION));
    }

    #[test]
    fn test_selecting_one_value_resets_to_singleton() {
        let catalog = sample_catalog();
        let mut filter = tradition_filter(&catalog);
        filter.toggle_value(&text("divine"), true).unwrap();

        assert!(!filter.is_all_selected());
        assert_eq!(filter.selection(), &BTreeSet::from([text("divine")]));
        assert!(filter.is_checked(&text("divine")));
        assert_eq!(passing(&filter, &catalog), vec!["heal", "shield"]);
    }

    #[test]
    fn test_further_values_accumulate() {
        let catalog = sample_catalog();
        let mut filter = tradition_filter(&catalog);
        filter.toggle_value(&text("divine"), true).unwrap();
        filter.toggle_value(&text(NO_TRADITION), true).unwrap();

        assert_eq!(passing(&filter, &catalog), vec!["heal", "light", "shield"]);
    }

    #[test]
    fn test_unticking_removes_value() {
        let catalog = sample_catalog();
        let mut filter = tradition_filter(&catalog);
        filter.toggle_value(&text("divine"), true).unwrap();
        filter.toggle_value(&text("arcane"), true).unwrap();
        filter.toggle_value(&text("divine"), false).unwrap();

        assert_eq!(filter.selection(), &BTreeSet::from([text("arcane")]));
        assert!(!filter.is_all_selected());
        assert_eq!(passing(&filter, &catalog), vec!["fireball", "shield"]);
    }

    #[test]
    fn test_all_off_hides_everything() {
        let catalog = sample_catalog();
        let mut filter = tradition_filter(&catalog);
        filter.toggle_all(false);

        assert!(filter.selection().is_empty());
        assert!(!filter.is_all_selected());
        assert!(passing(&filter, &catalog).is_empty());
    }

    #[test]
    fn test_all_on_restores_domain_and_clears_ticks() {
        let catalog = sample_catalog();
        let mut filter = tradition_filter(&catalog);
        filter.toggle_value(&text("occult"), true).unwrap();
        filter.toggle_all(true);

        assert!(filter.is_all_selected());
        assert!(!filter.is_checked(&text("occult")));
        assert_eq!(passing(&filter, &catalog).len(), 4);
    }

    #[test]
    fn test_ticking_every_value_is_all_selected() {
        let catalog = sample_catalog();
        let mut filter = tradition_filter(&catalog);
        filter.toggle_all(false);
        let values: Vec<_> = filter.domain().values.iter().cloned().collect();
        for value in &values {
            filter.toggle_value(value, true).unwrap();
        }
        assert!(filter.is_all_selected());
    }

    #[test]
    fn test_scalar_attributes_use_membership() {
        let catalog = sample_catalog();
        let mut filter =
            FacetFilter::new(FacetSpec::derived("Type", Attribute::Kind), catalog.entries());
        filter.toggle_value(&text("cantrip"), true).unwrap();
        assert_eq!(passing(&filter, &catalog), vec!["light", "shield"]);
    }

    #[test]
    fn test_unknown_value_is_rejected() {
        let catalog = sample_catalog();
        let mut filter = tradition_filter(&catalog);
        let err = filter.toggle_value(&text("elemental"), true).unwrap_err();
        assert!(matches!(err, CardsError::UnknownFacetValue { ref value, .. } if value == "elemental"));
        assert!(filter.is_all_selected());
    }

    #[test]
    fn test_all_off_over_empty_domain_rejects_everything() {
        let catalog = sample_catalog();
        let mut filter = FacetFilter::new(
            FacetSpec::explicit("Circle", Attribute::Kind, Vec::new()),
            catalog.entries(),
        );
        assert!(filter.domain().is_empty());
        assert!(filter.is_all_selected());
        assert_eq!(passing(&filter, &catalog).len(), 4);

        filter.toggle_all(false);
        assert!(!filter.is_all_selected());
        assert!(filter.selection().is_empty());
        assert!(passing(&filter, &catalog).is_empty());

        filter.toggle_all(true);
        assert!(filter.is_all_selected());
        assert_eq!(passing(&filter, &catalog).len(), 4);
    }

    #[test]
    fn test_missing_attribute_fails_closed() {
        let catalog = sample_catalog();
        let filter = FacetFilter::new(
            FacetSpec::derived("School", Attribute::Custom("school".into())),
            catalog.entries(),
        );
        assert!(filter.domain().is_empty());
        assert!(passing(&filter, &catalog).is_empty());
    }
}
