use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::content::Partner;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    Workshop,
    CommunityService,
    Career,
    Social,
    Fundraiser,
}

impl EventType {
    pub const ALL: [EventType; 5] = [
        EventType::Workshop,
        EventType::CommunityService,
        EventType::Career,
        EventType::Social,
        EventType::Fundraiser,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Workshop => "workshop",
            EventType::CommunityService => "community-service",
            EventType::Career => "career",
            EventType::Social => "social",
            EventType::Fundraiser => "fundraiser",
        }
    }

    /// Display label, e.g. `community-service` becomes `Community Service`.
    pub fn label(&self) -> String {
        self.as_str()
            .split('-')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown event type '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Open,
    Waitlist,
    Closed,
}

impl EventStatus {
    pub fn label(&self) -> &'static str {
        match self {
            EventStatus::Open => "Open for Registration",
            EventStatus::Waitlist => "Waitlist Only",
            EventStatus::Closed => "Registration Closed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadContact {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecapQuote {
    pub text: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub url: String,
}

/// Post-event summary attached to past events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecap {
    pub summary: String,
    pub volunteers_count: u32,
    pub hours_served: u32,
    pub beneficiaries: u32,
    #[serde(default)]
    pub gallery: Vec<String>,
    #[serde(default)]
    pub quotes: Vec<RecapQuote>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub time: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default)]
    pub tags: Vec<String>,
    pub capacity: u32,
    pub registered: u32,
    pub status: EventStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_contact: Option<LeadContact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partners: Option<Vec<Partner>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agenda: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub what_you_will_do: Option<Vec<String>>,
    pub is_past: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recap: Option<EventRecap>,
}

impl Event {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn spots_remaining(&self) -> u32 {
        self.capacity.saturating_sub(self.registered)
    }

    /// Share of capacity already taken, capped at 100.
    pub fn fill_percent(&self) -> u8 {
        if self.capacity == 0 {
            return 0;
        }
        let percent = u64::from(self.registered) * 100 / u64::from(self.capacity);
        percent.min(100) as u8
    }
}
