//! Event directory: filtering, pagination, the calendar projection and slug
//! lookup over the read-only event list.

pub mod calendar;
pub mod filter;
pub mod pagination;

pub use calendar::{month_grid, MonthGrid, MonthRef};
pub use filter::{EventFilter, Facets, TypeFilter};
pub use pagination::{paginate, Page};

use crate::models::{Event, EventType};

/// Linear lookup by slug.
pub fn find_by_slug<'a>(events: &'a [Event], slug: &str) -> Option<&'a Event> {
    events.iter().find(|e| e.slug == slug)
}

/// Events of the same type and the same past/upcoming scope, excluding `event`.
pub fn related<'a>(events: &'a [Event], event: &Event, limit: usize) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|e| e.slug != event.slug)
        .filter(|e| e.event_type == event.event_type && e.is_past == event.is_past)
        .take(limit)
        .collect()
}

/// Filter and page selection of a list view.
///
/// Any change to the filter sends the view back to page 1. HTTP handlers
/// rebuild the state from each query with [`DirectoryState::new`]; the setters
/// describe how a client moves between those queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryState {
    filter: EventFilter,
    page: usize,
}

impl Default for DirectoryState {
    fn default() -> Self {
        Self {
            filter: EventFilter::default(),
            page: 1,
        }
    }
}

impl DirectoryState {
    pub fn new(filter: EventFilter, page: usize) -> Self {
        Self {
            filter,
            page: page.max(1),
        }
    }

    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn set_type(&mut self, event_type: TypeFilter) {
        self.filter.event_type = event_type;
        self.page = 1;
    }

    pub fn select_type(&mut self, event_type: EventType) {
        self.set_type(TypeFilter::Only(event_type));
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        if !self.filter.tags.remove(tag) {
            self.filter.tags.insert(tag.to_string());
        }
        self.page = 1;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
        self.page = 1;
    }

    pub fn clear_filters(&mut self) {
        self.filter = EventFilter::default();
        self.page = 1;
    }

    /// Runs the filter over `events` and returns the selected page.
    pub fn view<'a, I>(&self, events: I, per_page: usize) -> Page<&'a Event>
    where
        I: IntoIterator<Item = &'a Event>,
    {
        paginate(self.filter.apply(events), self.page, per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::fixtures::six_events;

    #[test]
    fn test_find_by_slug_is_total_and_idempotent() {
        let events = six_events();
        let first = find_by_slug(&events, "event-4").unwrap();
        let second = find_by_slug(&events, "event-4").unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.id, "4");

        assert!(find_by_slug(&events, "no-such-event").is_none());
        assert!(find_by_slug(&events, "").is_none());
    }

    #[test]
    fn test_related_excludes_self_and_other_types() {
        let events = six_events();
        let workshop = find_by_slug(&events, "event-2").unwrap();
        let related = related(&events, workshop, 3);
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].slug, "event-4");
    }

    #[test]
    fn test_filter_changes_reset_page() {
        let mut state = DirectoryState::new(EventFilter::default(), 3);
        assert_eq!(state.page(), 3);

        state.select_type(EventType::Workshop);
        assert_eq!(state.page(), 1);

        state.set_page(2);
        state.toggle_tag("youth");
        assert_eq!(state.page(), 1);
        assert!(state.filter().tags.contains("youth"));

        state.toggle_tag("youth");
        assert!(state.filter().tags.is_empty());

        state.set_page(4);
        state.set_search("garden");
        assert_eq!(state.page(), 1);

        state.set_page(2);
        state.clear_filters();
        assert_eq!(state.page(), 1);
        assert!(!state.filter().is_active());
    }

    #[test]
    fn test_view_pages_filtered_events() {
        let events = six_events();
        let mut state = DirectoryState::default();
        state.set_page(2);
        let page = state.view(&events, 4);
        assert_eq!(page.total_items, 6);
        assert_eq!(page.items.len(), 2);

        state.select_type(EventType::Workshop);
        let page = state.view(&events, 4);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_items, 2);
    }
}
