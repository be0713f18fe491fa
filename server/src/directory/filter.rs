use std::collections::BTreeSet;
use std::str::FromStr;

use serde::Serialize;

use crate::models::{Event, EventType};

/// Type selector of the list views. `All` disables type filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeFilter {
    #[default]
    All,
    Only(EventType),
}

impl TypeFilter {
    pub fn matches(&self, event_type: EventType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(t) => *t == event_type,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeFilter::All => "all",
            TypeFilter::Only(t) => t.as_str(),
        }
    }
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == "all" {
            return Ok(TypeFilter::All);
        }
        s.parse().map(TypeFilter::Only)
    }
}

impl Serialize for TypeFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFilter {
    #[serde(rename = "type")]
    pub event_type: TypeFilter,
    pub tags: BTreeSet<String>,
    pub search: String,
}

impl EventFilter {
    /// Parses a comma-separated tag list, ignoring blanks.
    pub fn parse_tags(raw: &str) -> BTreeSet<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn is_active(&self) -> bool {
        self.event_type != TypeFilter::All || !self.tags.is_empty() || !self.search.trim().is_empty()
    }

    pub fn matches(&self, event: &Event) -> bool {
        if !self.event_type.matches(event.event_type) {
            return false;
        }

        if !self.tags.is_empty() && !event.tags.iter().any(|t| self.tags.contains(t)) {
            return false;
        }

        let needle = self.search.trim().to_lowercase();
        needle.is_empty()
            || event.title.to_lowercase().contains(&needle)
            || event.location.to_lowercase().contains(&needle)
    }

    /// Keeps the matching events in their original order.
    pub fn apply<'a, I>(&self, events: I) -> Vec<&'a Event>
    where
        I: IntoIterator<Item = &'a Event>,
    {
        events.into_iter().filter(|e| self.matches(e)).collect()
    }
}

/// Values offered by the filter controls of a list view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub types: Vec<EventType>,
    pub tags: Vec<String>,
}

impl Facets {
    pub fn collect<'a, I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a Event>,
    {
        let mut types = BTreeSet::new();
        let mut tags = BTreeSet::new();
        for event in events {
            types.insert(event.event_type);
            tags.extend(event.tags.iter().cloned());
        }
        Facets {
            types: types.into_iter().collect(),
            tags: tags.into_iter().collect(),
        }
    }
}
