//! # Facets
//!
//! Facet filtering turns declarative [`FacetSpec`]s into live predicates over
//! entries.
//!
//! - [`spec`]: what a facet filters on and where its values come from. A spec
//!   either lists its options explicitly or derives them by scanning every
//!   entry; either way it is resolved once, when its filter is built.
//! - [`filter`]: one facet's selection and its toggle state machine.
//! - [`registry`]: the filters of the active facet group, AND-ed together.
//!   Switching groups rebuilds every filter from scratch.

pub mod filter;
pub mod registry;
pub mod spec;

pub use filter::FacetFilter;
pub use registry::FilterRegistry;
pub use spec::{FacetDomain, FacetGroup, FacetOption, FacetSpec, FacetValues, STANDARD_GROUP};
