use super::filter::FacetFilter;
use super::spec::FacetGroup;
use crate::error::{CardsError, Result};
use crate::model::{Attribute, Entry};
use tracing::debug;

/// The live filters of the active facet group, combined with AND.
#[derive(Debug, Clone)]
pub struct FilterRegistry {
    groups: Vec<FacetGroup>,
    active: String,
    filters: Vec<FacetFilter>,
}

impl FilterRegistry {
    /// Builds fresh filters for `active`, or for the first group when `None`.
    pub fn build(groups: Vec<FacetGroup>, active: Option<&str>, entries: &[Entry]) -> Result<Self> {
        let groups = if groups.is_empty() {
            vec![FacetGroup::standard()]
        } else {
            groups
        };
        let active = match active {
            Some(name) => name.to_string(),
            None => groups[0].name.clone(),
        };

        let mut registry = Self {
            groups,
            active: String::new(),
            filters: Vec::new(),
        };
        registry.switch_mode(&active, entries)?;
        Ok(registry)
    }

    /// Discards every filter and rebuilds the ones of `group` at their initial state.
    pub fn switch_mode(&mut self, group: &str, entries: &[Entry]) -> Result<()> {
        let specs = self
            .groups
            .iter()
            .find(|g| g.name == group)
            .map(|g| g.facets.clone())
            .ok_or_else(|| CardsError::UnknownFacetGroup(group.to_string()))?;

        self.filters = specs
            .into_iter()
            .map(|spec| FacetFilter::new(spec, entries))
            .collect();
        self.active = group.to_string();
        debug!(group, facets = self.filters.len(), "facet filters rebuilt");
        Ok(())
    }

    pub fn active_group(&self) -> &str {
        &self.active
    }

    pub fn group_names(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.name.as_str()).collect()
    }

    pub fn filters(&self) -> &[FacetFilter] {
        &self.filters
    }

    pub fn filter(&self, facet: &str) -> Result<&FacetFilter> {
        let index = self.position(facet)?;
        Ok(&self.filters[index])
    }

    pub fn filter_mut(&mut self, facet: &str) -> Result<&mut FacetFilter> {
        let index = self.position(facet)?;
        Ok(&mut self.filters[index])
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        self.filters.iter().all(|filter| filter.matches(entry))
    }

    /// Facets are addressed by title (any case) or by attribute name.
    fn position(&self, facet: &str) -> Result<usize> {
        self.filters
            .iter()
            .position(|f| f.title().eq_ignore_ascii_case(facet))
            .or_else(|| {
                let attribute = Attribute::from(facet);
                self.filters.iter().position(|f| *f.attribute() == attribute)
            })
            .ok_or_else(|| CardsError::UnknownFacet(facet.to_string()))
    }
}
