//! # Catalog Model
//!
//! Entries are loaded once from a JSON payload and are immutable for the rest of
//! the session. The payload comes in two shapes:
//!
//! ```text
//! { "<id>": { entry }, ... }                                  # bare data.json
//! { "entries": { "<id>": { entry } }, "facet_groups": {...} } # with facet groups
//! ```
//!
//! Loading fails fast: an entry missing a required field is reported with its id
//! instead of being treated as absent.

use crate::error::{CardsError, Result};
use crate::facets::spec::{FacetGroup, FacetSpec};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs;
use std::path::Path;

pub type EntryId = String;

/// Tradition recorded for entries whose payload lists none.
pub const NO_TRADITION: &str = "";

/// A single comparable value a facet can select.
///
/// Numbers order before text; within a variant ordering is numeric or
/// lexicographic, which is also the display order of derived facet domains.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Number(i64),
    Text(String),
}

impl FilterValue {
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(FilterValue::Text(s.clone())),
            Value::Number(n) => n.as_i64().map(FilterValue::Number),
            Value::Bool(b) => Some(FilterValue::Text(b.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Number(n) => write!(f, "{}", n),
            FilterValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Number(value)
    }
}

/// An entry attribute a facet can filter on.
///
/// Anything that is not one of the built-in names addresses a field kept in
/// [`Entry::extra`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Attribute {
    Kind,
    Level,
    Rarity,
    Source,
    Traditions,
    Traits,
    Custom(String),
}

impl Attribute {
    pub fn name(&self) -> &str {
        match self {
            Attribute::Kind => "type",
            Attribute::Level => "level",
            Attribute::Rarity => "rarity",
            Attribute::Source => "source",
            Attribute::Traditions => "traditions",
            Attribute::Traits => "traits",
            Attribute::Custom(name) => name,
        }
    }
}

impl From<String> for Attribute {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "type" | "kind" => Attribute::Kind,
            "level" => Attribute::Level,
            "rarity" => Attribute::Rarity,
            "source" => Attribute::Source,
            "tradition" | "traditions" => Attribute::Traditions,
            "trait" | "traits" => Attribute::Traits,
            _ => Attribute::Custom(value),
        }
    }
}

impl From<&str> for Attribute {
    fn from(value: &str) -> Self {
        Attribute::from(value.to_string())
    }
}

impl From<Attribute> for String {
    fn from(value: Attribute) -> Self {
        value.name().to_string()
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The value an entry holds for an [`Attribute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Scalar(FilterValue),
    Set(BTreeSet<FilterValue>),
}

/// Rich-text payload of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Description {
    /// One markup fragment, split into pages by measurement.
    Markup(String),
    /// Already split into pages by the payload producer; one element per page.
    Paged(Vec<String>),
}

impl Description {
    pub fn is_empty(&self) -> bool {
        match self {
            Description::Markup(text) => text.trim().is_empty(),
            Description::Paged(pages) => pages.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub id: EntryId,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub level: i64,
    pub rarity: String,
    pub source: String,
    pub copyright: Option<String>,
    pub traditions: BTreeSet<String>,
    pub traits: Vec<String>,
    pub description: Description,
    pub actions: String,
    pub extra: BTreeMap<String, Value>,
}

impl Entry {
    /// Looks up an attribute. `None` means the entry does not carry it.
    pub fn attribute(&self, attr: &Attribute) -> Option<AttributeValue> {
        let scalar = |s: &str| Some(AttributeValue::Scalar(FilterValue::from(s)));

        match attr {
            Attribute::Kind => scalar(&self.kind),
            Attribute::Level => Some(AttributeValue::Scalar(FilterValue::Number(self.level))),
            Attribute::Rarity => scalar(&self.rarity),
            Attribute::Source => scalar(&self.source),
            Attribute::Traditions => Some(text_set(self.traditions.iter())),
            Attribute::Traits => Some(text_set(self.traits.iter())),
            Attribute::Custom(name) => match self.extra.get(name)? {
                Value::Array(items) => items
                    .iter()
                    .map(FilterValue::from_json)
                    .collect::<Option<BTreeSet<_>>>()
                    .map(AttributeValue::Set),
                other => FilterValue::from_json(other).map(AttributeValue::Scalar),
            },
        }
    }

    /// The `"{type} {level}"` line shown on an entry's first card.
    pub fn type_line(&self) -> String {
        format!("{} {}", self.kind, self.level)
    }

    pub fn is_common(&self) -> bool {
        self.rarity == "common"
    }

    fn from_json(id: &str, value: Value) -> Result<Self> {
        let Value::Object(mut fields) = value else {
            return Err(CardsError::InvalidEntry {
                id: id.to_string(),
                reason: "expected an object".to_string(),
            });
        };
        let mut reader = FieldReader {
            id,
            fields: &mut fields,
        };

        let title = reader.required_str("title")?;
        let kind = reader.required_str("type")?;
        let level = reader.required_int("level")?;
        let rarity = reader.required_str("rarity")?;
        let source = reader.required_str("source")?;
        let mut traditions: BTreeSet<String> =
            reader.required_str_list("traditions")?.into_iter().collect();
        if traditions.is_empty() {
            traditions.insert(NO_TRADITION.to_string());
        }
        let mut traits = Vec::new();
        for name in reader.required_str_list("traits")? {
            if !traits.contains(&name) {
                traits.push(name);
            }
        }
        let description = reader.required_description()?;
        let actions = reader.optional_str("actions")?.unwrap_or_default();
        let copyright = reader.optional_str("copyright")?;
        fields.remove("id");

        Ok(Entry {
            id: id.to_string(),
            title,
            kind,
            level,
            rarity,
            source,
            copyright,
            traditions,
            traits,
            description,
            actions,
            extra: fields.into_iter().collect(),
        })
    }
}

fn text_set<'a>(items: impl Iterator<Item = &'a String>) -> AttributeValue {
    AttributeValue::Set(items.map(|s| FilterValue::from(s.as_str())).collect())
}

/// Pulls typed fields out of a raw entry object, naming the entry on failure.
struct FieldReader<'a> {
    id: &'a str,
    fields: &'a mut Map<String, Value>,
}

impl FieldReader<'_> {
    fn take(&mut self, field: &'static str) -> Result<Value> {
        match self.fields.remove(field) {
            None | Some(Value::Null) => Err(CardsError::MalformedEntry {
                id: self.id.to_string(),
                field,
            }),
            Some(value) => Ok(value),
        }
    }

    fn invalid(&self, field: &str, expected: &str) -> CardsError {
        CardsError::InvalidEntry {
            id: self.id.to_string(),
            reason: format!("field `{}` must be {}", field, expected),
        }
    }

    fn required_str(&mut self, field: &'static str) -> Result<String> {
        match self.take(field)? {
            Value::String(s) => Ok(s),
            _ => Err(self.invalid(field, "a string")),
        }
    }

    fn optional_str(&mut self, field: &'static str) -> Result<Option<String>> {
        match self.fields.remove(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(_) => Err(self.invalid(field, "a string")),
        }
    }

    fn required_int(&mut self, field: &'static str) -> Result<i64> {
        self.take(field)?
            .as_i64()
            .ok_or_else(|| self.invalid(field, "an integer"))
    }

    fn required_str_list(&mut self, field: &'static str) -> Result<Vec<String>> {
        let Value::Array(items) = self.take(field)? else {
            return Err(self.invalid(field, "a list of strings"));
        };
        items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                _ => Err(self.invalid(field, "a list of strings")),
            })
            .collect()
    }

    fn required_description(&mut self) -> Result<Description> {
        let value = self.take("description")?;
        serde_json::from_value(value)
            .map_err(|_| self.invalid("description", "a string or a list of strings"))
    }
}

#[derive(Deserialize)]
struct Envelope {
    entries: Map<String, Value>,
    #[serde(default)]
    facet_groups: BTreeMap<String, Vec<FacetSpec>>,
}

/// All entries of a payload plus the facet groups it declares.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<Entry>,
    facet_groups: Vec<FacetGroup>,
}

impl Catalog {
    /// Builds a catalog from already-validated entries.
    ///
    /// Entries are ordered by id. Without groups, the standard group is used.
    pub fn new(mut entries: Vec<Entry>, facet_groups: Vec<FacetGroup>) -> Self {
        entries.sort_by(|a, b| a.id.cmp(&b.id));
        let facet_groups = if facet_groups.is_empty() {
            vec![FacetGroup::standard()]
        } else {
            facet_groups
        };
        Self {
            entries,
            facet_groups,
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(text)?;
        let has_envelope = matches!(root.get("entries"), Some(Value::Object(_)));
        let (raw_entries, groups) = match root {
            Value::Object(_) if has_envelope => {
                let envelope: Envelope = serde_json::from_value(root)?;
                (envelope.entries, envelope.facet_groups)
            }
            Value::Object(map) => (map, BTreeMap::new()),
            _ => {
                return Err(CardsError::Api(
                    "payload must be a JSON object of entries".to_string(),
                ))
            }
        };

        let entries = raw_entries
            .into_iter()
            .map(|(id, value)| Entry::from_json(&id, value))
            .collect::<Result<Vec<_>>>()?;
        let facet_groups = groups
            .into_iter()
            .map(|(name, facets)| FacetGroup { name, facets })
            .collect();

        Ok(Self::new(entries, facet_groups))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn facet_groups(&self) -> &[FacetGroup] {
        &self.facet_groups
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
