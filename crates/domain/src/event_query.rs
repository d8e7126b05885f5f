use crate::event::{CalendarEvent, EventStatus};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSortKey {
    ScheduledTs,
    Title,
    Created,
}

impl Default for EventSortKey {
    fn default() -> Self {
        Self::ScheduledTs
    }
}

/// Filters, ordering and paging a user applies when listing their own events
#[derive(Debug, Clone, PartialEq)]
pub struct EventQuery {
    pub status: Option<EventStatus>,
    /// Inclusive lower bound on the scheduled time
    pub start_ts: Option<i64>,
    /// Inclusive upper bound on the scheduled time
    pub end_ts: Option<i64>,
    /// `Some(true)` keeps only events with a reminder, `Some(false)` only those without
    pub has_reminder: Option<bool>,
    /// Case insensitive match on title or location
    pub search: Option<String>,
    pub sort_by: EventSortKey,
    pub descending: bool,
    /// 1-based
    pub page: usize,
    pub limit: usize,
}

impl Default for EventQuery {
    fn default() -> Self {
        Self {
            status: None,
            start_ts: None,
            end_ts: None,
            has_reminder: None,
            search: None,
            sort_by: EventSortKey::default(),
            descending: false,
            page: 1,
            limit: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventPage<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

impl<T> EventPage<T> {
    pub fn total_pages(&self) -> usize {
        if self.limit == 0 {
            return 0;
        }
        (self.total + self.limit - 1) / self.limit
    }
}

impl EventQuery {
    pub fn matches(&self, event: &CalendarEvent, has_reminder: bool) -> bool {
        if let Some(status) = self.status {
            if event.status != status {
                return false;
            }
        }
        if matches!(self.start_ts, Some(start) if event.scheduled_ts < start) {
            return false;
        }
        if matches!(self.end_ts, Some(end) if event.scheduled_ts > end) {
            return false;
        }
        if matches!(self.has_reminder, Some(wanted) if wanted != has_reminder) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                event.title.to_lowercase().contains(&term)
                    || event.location.to_lowercase().contains(&term)
            }
            _ => true,
        }
    }

    fn compare(&self, a: &CalendarEvent, b: &CalendarEvent) -> Ordering {
        let ord = match self.sort_by {
            EventSortKey::ScheduledTs => a.scheduled_ts.cmp(&b.scheduled_ts),
            EventSortKey::Title => a.title.cmp(&b.title),
            EventSortKey::Created => a.created.cmp(&b.created),
        };
        if self.descending {
            ord.reverse()
        } else {
            ord
        }
    }

    /// Filters, sorts and cuts out the requested page. `key` projects the
    /// item to its event and whether that event has a reminder.
    pub fn apply<T, F>(&self, items: Vec<T>, key: F) -> EventPage<T>
    where
        F: Fn(&T) -> (&CalendarEvent, bool),
    {
        let mut items = items
            .into_iter()
            .filter(|item| {
                let (event, has_reminder) = key(item);
                self.matches(event, has_reminder)
            })
            .collect::<Vec<_>>();
        items.sort_by(|a, b| self.compare(key(a).0, key(b).0));

        let total = items.len();
        let page = self.page.max(1);
        let items = items
            .into_iter()
            .skip((page - 1).saturating_mul(self.limit))
            .take(self.limit)
            .collect();

        EventPage {
            items,
            total,
            page,
            limit: self.limit,
        }
    }
}
