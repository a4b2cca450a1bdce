//! Declarative facet specs and the value domains they resolve to.

use crate::model::{Attribute, AttributeValue, Entry, FilterValue, NO_TRADITION};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Name of the facet group used when a payload declares none.
pub const STANDARD_GROUP: &str = "standard";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOption {
    pub label: String,
    pub value: FilterValue,
}

/// Where a facet's values come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FacetValues {
    /// A fixed, ordered list of label/value pairs.
    Explicit { options: Vec<FacetOption> },
    /// Every value the attribute takes across the catalog, sorted.
    ///
    /// `labels` overrides the label of individual values (keyed by the value's
    /// display form); otherwise `label_template` is applied, with `{}` standing
    /// for the value; otherwise the value itself is the label.
    Derived {
        #[serde(default)]
        labels: BTreeMap<String, String>,
        #[serde(default)]
        label_template: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetSpec {
    pub title: String,
    pub attribute: Attribute,
    pub values: FacetValues,
}

impl FacetSpec {
    pub fn derived(title: impl Into<String>, attribute: Attribute) -> Self {
        Self {
            title: title.into(),
            attribute,
            values: FacetValues::Derived {
                labels: BTreeMap::new(),
                label_template: None,
            },
        }
    }

    pub fn explicit(
        title: impl Into<String>,
        attribute: Attribute,
        options: Vec<FacetOption>,
    ) -> Self {
        Self {
            title: title.into(),
            attribute,
            values: FacetValues::Explicit { options },
        }
    }

    /// Overrides the label of one derived value. No effect on explicit specs.
    pub fn with_label(mut self, value: impl fmt::Display, label: impl Into<String>) -> Self {
        if let FacetValues::Derived { labels, .. } = &mut self.values {
            labels.insert(value.to_string(), label.into());
        }
        self
    }

    pub fn with_label_template(mut self, template: impl Into<String>) -> Self {
        if let FacetValues::Derived { label_template, .. } = &mut self.values {
            *label_template = Some(template.into());
        }
        self
    }

    /// Resolves the value domain against `entries`.
    pub fn resolve(&self, entries: &[Entry]) -> FacetDomain {
        match &self.values {
            FacetValues::Explicit { options } => {
                let mut values = BTreeSet::new();
                let options = options
                    .iter()
                    .filter(|option| values.insert(option.value.clone()))
                    .cloned()
                    .collect();
                FacetDomain { options, values }
            }
            FacetValues::Derived {
                labels,
                label_template,
            } => {
                let mut values = BTreeSet::new();
                for entry in entries {
                    match entry.attribute(&self.attribute) {
                        Some(AttributeValue::Scalar(value)) => {
                            values.insert(value);
                        }
                        Some(AttributeValue::Set(set)) => values.extend(set),
                        None => {}
                    }
                }
                let options = values
                    .iter()
                    .map(|value| {
                        let key = value.to_string();
                        let label = match (labels.get(&key), label_template) {
                            (Some(label), _) => label.clone(),
                            (None, Some(template)) => template.replace("{}", &key),
                            (None, None) => key,
                        };
                        FacetOption {
                            label,
                            value: value.clone(),
                        }
                    })
                    .collect();
                FacetDomain { options, values }
            }
        }
    }
}

/// The resolved, ordered set of values a facet can select.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetDomain {
    pub options: Vec<FacetOption>,
    pub values: BTreeSet<FilterValue>,
}

impl FacetDomain {
    /// Finds an option by its label (case-insensitive) or by its value's display form.
    pub fn find(&self, raw: &str) -> Option<&FacetOption> {
        self.options
            .iter()
            .find(|option| option.value.to_string() == raw)
            .or_else(|| {
                self.options
                    .iter()
                    .find(|option| option.label.eq_ignore_ascii_case(raw))
            })
    }

    pub fn contains(&self, value: &FilterValue) -> bool {
        self.values.contains(value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A named set of facets that are active together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetGroup {
    pub name: String,
    pub facets: Vec<FacetSpec>,
}

impl FacetGroup {
    /// Type, level, rarity, tradition, traits and source, all derived from the catalog.
    pub fn standard() -> Self {
        Self {
            name: STANDARD_GROUP.to_string(),
            facets: vec![
                FacetSpec::derived("Type", Attribute::Kind),
                FacetSpec::derived("Levels", Attribute::Level).with_label_template("Level {}"),
                FacetSpec::derived("Rarity", Attribute::Rarity),
                FacetSpec::derived("Tradition", Attribute::Traditions)
                    .with_label(NO_TRADITION, "No Tradition"),
                FacetSpec::derived("Traits", Attribute::Traits),
                FacetSpec::derived("Source", Attribute::Source),
            ],
        }
    }
}
