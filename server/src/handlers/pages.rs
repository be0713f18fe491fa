use std::collections::BTreeSet;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Response;
use serde::{Deserialize, Serialize};

use crate::forms::contact::SUBJECTS;
use crate::forms::donation::{DESIGNATED_FUNDS, PRESET_AMOUNTS};
use crate::forms::volunteer::INTERESTS;
use crate::handlers::events::EventCard;
use crate::models::{
    AnnualReport, Award, ContactInfo, Faq, Partner, Program, Stat, TeamMember, Testimonial,
    VolunteerRole,
};
use crate::state::AppState;
use crate::utils::response::success;
use crate::utils::{AppError, AppResult};

const FEATURED_EVENTS: usize = 3;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatView<'a> {
    #[serde(flatten)]
    pub stat: &'a Stat,
    pub display: String,
}

fn stat_views(stats: &[Stat]) -> Vec<StatView<'_>> {
    stats
        .iter()
        .map(|stat| StatView {
            stat,
            display: stat.display(),
        })
        .collect()
}

fn faqs_in<'a>(faqs: &'a [Faq], category: &str) -> Vec<&'a Faq> {
    faqs.iter()
        .filter(|f| f.category.as_deref() == Some(category))
        .collect()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeView<'a> {
    pub stats: Vec<StatView<'a>>,
    pub programs: &'a [Program],
    pub featured_events: Vec<EventCard<'a>>,
    pub testimonials: &'a [Testimonial],
    pub partners: &'a [Partner],
}

pub async fn home(State(app): State<AppState>) -> Response {
    let data = &app.data;
    let view = HomeView {
        stats: stat_views(&data.stats),
        programs: &data.programs,
        featured_events: data
            .upcoming_events()
            .into_iter()
            .take(FEATURED_EVENTS)
            .map(EventCard::from)
            .collect(),
        testimonials: &data.testimonials,
        partners: &data.partners,
    };
    success(view, "Home")
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutView<'a> {
    pub organization_name: &'a str,
    pub tagline: &'a str,
    pub territory_acknowledgement: &'a str,
    pub programs: &'a [Program],
    pub stats: Vec<StatView<'a>>,
    pub partners: &'a [Partner],
    pub faqs: &'a [Faq],
}

pub async fn about(State(app): State<AppState>) -> Response {
    let data = &app.data;
    let view = AboutView {
        organization_name: &data.settings.organization_name,
        tagline: &data.settings.tagline,
        territory_acknowledgement: &data.settings.territory_acknowledgement,
        programs: &data.programs,
        stats: stat_views(&data.stats),
        partners: &data.partners,
        faqs: &data.faqs,
    };
    success(view, "About")
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardView<'a> {
    pub members: Vec<&'a TeamMember>,
}

pub async fn board(State(app): State<AppState>) -> Response {
    let mut members: Vec<&TeamMember> = app.data.team_members.iter().collect();
    members.sort_by_key(|m| m.order);
    success(BoardView { members }, "Board of executives")
}

#[derive(Serialize)]
pub struct AwardsView<'a> {
    pub awards: &'a [Award],
}

pub async fn awards(State(app): State<AppState>) -> Response {
    success(
        AwardsView {
            awards: &app.data.awards,
        },
        "Awards",
    )
}

#[derive(Debug, Default, Deserialize)]
pub struct ReportsQuery {
    pub year: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportsView<'a> {
    pub selected_year: Option<i32>,
    pub years: Vec<i32>,
    pub reports: Vec<&'a AnnualReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
}

/// Distinct report years, newest first.
fn report_years(reports: &[&AnnualReport]) -> Vec<i32> {
    reports
        .iter()
        .map(|r| r.year)
        .collect::<BTreeSet<i32>>()
        .into_iter()
        .rev()
        .collect()
}

pub async fn reports(
    State(app): State<AppState>,
    query: Result<Query<ReportsQuery>, QueryRejection>,
) -> AppResult<Response> {
    let Query(query) = query.map_err(|e| AppError::ValidationError(e.body_text()))?;
    let selected_year = match query.year.as_deref().map(str::trim) {
        None | Some("") | Some("all") => None,
        Some(raw) => Some(raw.parse::<i32>().map_err(|_| {
            AppError::ValidationError(format!("'{}' is not a report year", raw))
        })?),
    };

    let mut reports: Vec<&AnnualReport> = app.data.annual_reports.iter().collect();
    reports.sort_by(|a, b| b.year.cmp(&a.year));
    let years = report_years(&reports);
    reports.retain(|r| selected_year.map_or(true, |y| r.year == y));

    let empty_message = reports
        .is_empty()
        .then_some("No reports found for the selected year.");
    Ok(success(
        ReportsView {
            selected_year,
            years,
            reports,
            empty_message,
        },
        "Annual reports",
    ))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerView<'a> {
    pub roles: &'a [VolunteerRole],
    pub interests: [&'static str; 6],
    pub faqs: Vec<&'a Faq>,
}

pub async fn volunteer(State(app): State<AppState>) -> Response {
    let view = VolunteerView {
        roles: &app.data.volunteer_roles,
        interests: INTERESTS,
        faqs: faqs_in(&app.data.faqs, "volunteer"),
    };
    success(view, "Volunteer")
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactView<'a> {
    pub contact_info: &'a [ContactInfo],
    pub subjects: [&'static str; 6],
    pub faqs: Vec<&'a Faq>,
}

pub async fn contact(State(app): State<AppState>) -> Response {
    let view = ContactView {
        contact_info: &app.data.contact_info,
        subjects: SUBJECTS,
        faqs: faqs_in(&app.data.faqs, "contact"),
    };
    success(view, "Contact")
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonateView<'a> {
    pub preset_amounts: [u32; 6],
    pub designated_funds: [&'static str; 5],
    pub donation_types: [&'static str; 2],
    pub faqs: Vec<&'a Faq>,
}

pub async fn donate(State(app): State<AppState>) -> Response {
    let view = DonateView {
        preset_amounts: PRESET_AMOUNTS,
        designated_funds: DESIGNATED_FUNDS,
        donation_types: ["one-time", "monthly"],
        faqs: faqs_in(&app.data.faqs, "donate"),
    };
    success(view, "Donate")
}

pub async fn settings(State(app): State<AppState>) -> Response {
    success(&app.data.settings, "Site settings")
}
