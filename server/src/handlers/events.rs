use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::directory::pagination::clamp_per_page;
use crate::directory::{self, DirectoryState, EventFilter, Facets, MonthRef, Page, TypeFilter};
use crate::models::Event;
use crate::state::AppState;
use crate::utils::response::success;
use crate::utils::{AppError, AppResult};

const RELATED_EVENTS: usize = 3;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub tags: Option<String>,
    pub search: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl ListQuery {
    fn into_state(self) -> AppResult<DirectoryState> {
        let event_type = self
            .event_type
            .as_deref()
            .unwrap_or("all")
            .parse::<TypeFilter>()
            .map_err(AppError::ValidationError)?;
        let filter = EventFilter {
            event_type,
            tags: self
                .tags
                .as_deref()
                .map(EventFilter::parse_tags)
                .unwrap_or_default(),
            search: self.search.unwrap_or_default(),
        };
        Ok(DirectoryState::new(filter, self.page.unwrap_or(1)))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// List entry. The event is flattened in, with display helpers alongside.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCard<'a> {
    #[serde(flatten)]
    pub event: &'a Event,
    pub type_label: String,
    pub date_label: String,
    pub status_label: &'static str,
    pub spots_remaining: u32,
}

impl<'a> From<&'a Event> for EventCard<'a> {
    fn from(event: &'a Event) -> Self {
        Self {
            event,
            type_label: event.event_type.label(),
            date_label: long_date(event.date),
            status_label: event.status.label(),
            spots_remaining: event.spots_remaining(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmptyState {
    pub message: &'static str,
    pub clear_filters_href: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventListView<'a> {
    pub scope: &'static str,
    pub filter: &'a EventFilter,
    pub facets: Facets,
    pub events: Page<EventCard<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_state: Option<EmptyState>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetailView<'a> {
    #[serde(flatten)]
    pub event: &'a Event,
    pub type_label: String,
    pub status_label: &'static str,
    pub date_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date_label: Option<String>,
    pub spots_remaining: u32,
    pub fill_percent: u8,
    pub related: Vec<EventCard<'a>>,
}

fn long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

fn list_view<'a>(
    scope: &'static str,
    scoped: Vec<&'a Event>,
    state: &'a DirectoryState,
    per_page: usize,
    clear_filters_href: &'static str,
) -> EventListView<'a> {
    let facets = Facets::collect(scoped.iter().copied());
    let page = state.view(scoped, per_page).map(EventCard::from);
    let empty_state = (page.total_items == 0).then_some(EmptyState {
        message: "No events match your filters.",
        clear_filters_href,
    });

    EventListView {
        scope,
        filter: state.filter(),
        facets,
        events: page,
        empty_state,
    }
}

fn parse_query<T>(query: Result<Query<T>, QueryRejection>) -> AppResult<T> {
    query
        .map(|Query(q)| q)
        .map_err(|e| AppError::ValidationError(e.body_text()))
}

pub async fn list_upcoming(
    State(app): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> AppResult<Response> {
    let query = parse_query(query)?;
    let per_page = clamp_per_page(query.per_page, app.config.events_per_page);
    let state = query.into_state()?;

    let view = list_view("upcoming", app.data.upcoming_events(), &state, per_page, "/events");
    tracing::debug!(
        total = view.events.total_items,
        page = view.events.page,
        "Listed upcoming events"
    );
    Ok(success(view, "Upcoming events"))
}

pub async fn list_past(
    State(app): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> AppResult<Response> {
    let query = parse_query(query)?;
    let per_page = clamp_per_page(query.per_page, app.config.events_per_page);
    let state = query.into_state()?;

    let view = list_view("past", app.data.past_events(), &state, per_page, "/events/past");
    Ok(success(view, "Past events"))
}

pub async fn calendar(
    State(app): State<AppState>,
    query: Result<Query<CalendarQuery>, QueryRejection>,
) -> AppResult<Response> {
    let query = parse_query(query)?;
    let today = app.today();
    let month = MonthRef::new(
        query.year.unwrap_or(today.year()),
        query.month.unwrap_or(today.month()),
    )?;

    let grid = directory::month_grid(month, &app.data.events, today);
    Ok(success(grid, "Events calendar"))
}

pub async fn detail(State(app): State<AppState>, Path(slug): Path<String>) -> AppResult<Response> {
    let events = &app.data.events;
    let event = directory::find_by_slug(events, &slug).ok_or_else(|| AppError::event_not_found(&slug))?;

    let view = EventDetailView {
        event,
        type_label: event.event_type.label(),
        status_label: event.status.label(),
        date_label: long_date(event.date),
        end_date_label: event.end_date.map(long_date),
        spots_remaining: event.spots_remaining(),
        fill_percent: event.fill_percent(),
        related: directory::related(events, event, RELATED_EVENTS)
            .into_iter()
            .map(EventCard::from)
            .collect(),
    };
    Ok(success(view, "Event details"))
}
