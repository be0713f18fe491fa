//! The site's read-only dataset.
//!
//! The bundled `site.json` is compiled into the binary. `SITE_DATA_PATH` can
//! point at another file with the same shape. Either way the dataset is
//! loaded once at startup, checked, and shared immutably afterwards.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    AnnualReport, Award, ContactInfo, Event, Faq, Partner, Program, SiteSettings, Stat,
    TeamMember, Testimonial, VolunteerRole,
};

const BUNDLED_DATASET: &str = include_str!("../../data/site.json");

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read dataset '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("dataset is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate event {field} '{value}'")]
    Duplicate { field: &'static str, value: String },

    #[error("event slug '{0}' is not URL-safe")]
    InvalidSlug(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteData {
    pub settings: SiteSettings,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub team_members: Vec<TeamMember>,
    #[serde(default)]
    pub awards: Vec<Award>,
    #[serde(default)]
    pub annual_reports: Vec<AnnualReport>,
    #[serde(default)]
    pub volunteer_roles: Vec<VolunteerRole>,
    #[serde(default)]
    pub partners: Vec<Partner>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
    #[serde(default)]
    pub faqs: Vec<Faq>,
    #[serde(default)]
    pub contact_info: Vec<ContactInfo>,
    #[serde(default)]
    pub stats: Vec<Stat>,
    #[serde(default)]
    pub programs: Vec<Program>,
}

impl SiteData {
    pub fn bundled() -> Result<Self, DataError> {
        Self::from_json(BUNDLED_DATASET)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, DataError> {
        let data: SiteData = serde_json::from_str(raw)?;
        data.check()?;
        Ok(data)
    }

    /// Loads `path` when given, the bundled dataset otherwise.
    pub fn load(path: Option<&str>) -> Result<Self, DataError> {
        let data = match path {
            Some(path) => Self::from_path(path)?,
            None => Self::bundled()?,
        };
        tracing::info!(
            events = data.events.len(),
            team_members = data.team_members.len(),
            source = path.unwrap_or("bundled"),
            "Site dataset loaded"
        );
        Ok(data)
    }

    fn check(&self) -> Result<(), DataError> {
        let mut ids = HashSet::new();
        let mut slugs = HashSet::new();
        for event in &self.events {
            if !ids.insert(event.id.as_str()) {
                return Err(DataError::Duplicate {
                    field: "id",
                    value: event.id.clone(),
                });
            }
            if !is_url_safe(&event.slug) {
                return Err(DataError::InvalidSlug(event.slug.clone()));
            }
            if !slugs.insert(event.slug.as_str()) {
                return Err(DataError::Duplicate {
                    field: "slug",
                    value: event.slug.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn upcoming_events(&self) -> Vec<&Event> {
        self.events.iter().filter(|e| !e.is_past).collect()
    }

    pub fn past_events(&self) -> Vec<&Event> {
        self.events.iter().filter(|e| e.is_past).collect()
    }
}

fn is_url_safe(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
