use crate::event::EventStatus;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static::lazy_static! {
    static ref LOCATION_PATTERN: Regex = Regex::new(r"^[A-Z]{2}-[A-Z]{2}:.+").unwrap();
}

const TITLE_MAX_LEN: usize = 100;
const DESCRIPTION_MAX_LEN: usize = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Event fields as submitted by a client, before validation
#[derive(Debug, Clone)]
pub struct EventInput {
    pub title: String,
    pub description: Option<String>,
    pub scheduled_ts: i64,
    pub location: String,
    pub status: String,
}

/// Event fields that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidEventInput {
    pub title: String,
    pub description: Option<String>,
    pub scheduled_ts: i64,
    pub location: String,
    pub status: EventStatus,
}

impl EventInput {
    /// Checks every field and reports all the failing ones at once
    pub fn validate(self, now: i64) -> Result<ValidEventInput, Vec<FieldError>> {
        let mut errors = Vec::new();

        let title_len = self.title.chars().count();
        if title_len == 0 {
            errors.push(FieldError::new("title", "Title is required"));
        } else if title_len > TITLE_MAX_LEN {
            errors.push(FieldError::new("title", "Max 100 characters"));
        }

        if let Some(description) = &self.description {
            if description.chars().count() > DESCRIPTION_MAX_LEN {
                errors.push(FieldError::new("description", "Max 500 characters"));
            }
        }

        if self.scheduled_ts <= now {
            errors.push(FieldError::new("date", "Date must be in the future"));
        }

        if !LOCATION_PATTERN.is_match(&self.location) {
            errors.push(FieldError::new(
                "location",
                "Location must start with country code prefix, e.g., US-NY: New York",
            ));
        }

        let status = self.status.parse::<EventStatus>();
        if status.is_err() {
            errors.push(FieldError::new(
                "status",
                "Status must be one of DRAFT, PUBLISHED or CANCELED",
            ));
        }

        match status {
            Ok(status) if errors.is_empty() => Ok(ValidEventInput {
                title: self.title,
                description: self.description,
                scheduled_ts: self.scheduled_ts,
                location: self.location,
                status,
            }),
            _ => Err(errors),
        }
    }
}
