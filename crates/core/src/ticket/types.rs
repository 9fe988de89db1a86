//! Core ticket data types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ticket urgency classification.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    None,
    High,
}

impl Priority {
    /// All priorities, in the order the list view offers them.
    pub const ALL: [Priority; 3] = [Priority::High, Priority::None, Priority::Low];

    /// Returns the wire representation of the priority.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::None => "none",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown priority string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown priority: {0}")]
pub struct UnknownPriority(pub String);

impl FromStr for Priority {
    type Err = UnknownPriority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "none" => Ok(Priority::None),
            "high" => Ok(Priority::High),
            other => Err(UnknownPriority(other.to_string())),
        }
    }
}

/// A support-request record.
///
/// Everything except `priority` is fixed once the ticket has been seeded into
/// the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Creation time, epoch milliseconds on the wire.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub creation_time: DateTime<Utc>,
    pub user_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    /// Older seed data has no priority field; it reads back as `none`.
    #[serde(default)]
    pub priority: Priority,
}

impl Ticket {
    /// Lowercased concatenation of every field free-text search looks at.
    ///
    /// Fields are joined without separators, so a search term may match
    /// across the boundary of two adjacent fields.
    pub fn search_haystack(&self) -> String {
        let mut haystack = String::with_capacity(
            self.title.len() + self.content.len() + self.user_email.len(),
        );
        haystack.push_str(&self.title);
        haystack.push_str(&self.content);
        haystack.push_str(&self.user_email);
        for label in self.labels.iter().flatten() {
            haystack.push_str(label);
        }
        haystack.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn sample() -> Ticket {
        Ticket {
            id: "81a885d6-8f68-5bc0-bbbc-1c7b32e4b4e4".to_string(),
            title: "Need a Little Help with Your Site?".to_string(),
            content: "Hi there, we offer a free audit.".to_string(),
            creation_time: Utc.timestamp_millis_opt(1_542_111_235_544).unwrap(),
            user_email: "fohrove@zuhhuh.sc".to_string(),
            labels: Some(vec!["Corvid".to_string(), "Guidelines".to_string()]),
            priority: Priority::High,
        }
    }

    #[test]
    fn test_ticket_wire_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["creationTime"], 1_542_111_235_544_i64);
        assert_eq!(value["userEmail"], "fohrove@zuhhuh.sc");
        assert_eq!(value["labels"][1], "Guidelines");
        assert_eq!(value["priority"], "high");
    }

    #[test]
    fn test_ticket_without_labels_omits_field() {
        let mut ticket = sample();
        ticket.labels = None;
        let value = serde_json::to_value(ticket).unwrap();
        assert!(value.get("labels").is_none());
    }

    #[test]
    fn test_ticket_missing_priority_defaults_to_none() {
        let value = json!({
            "id": "t1",
            "title": "Title",
            "content": "Body",
            "creationTime": 1_542_111_235_544_i64,
            "userEmail": "someone@example.com"
        });
        let ticket: Ticket = serde_json::from_value(value).unwrap();
        assert_eq!(ticket.priority, Priority::None);
        assert!(ticket.labels.is_none());
    }

    #[test]
    fn test_priority_from_str() {
        assert_eq!("low".parse::<Priority>().unwrap(), Priority::Low);
        assert_eq!("none".parse::<Priority>().unwrap(), Priority::None);
        assert_eq!("high".parse::<Priority>().unwrap(), Priority::High);
        assert!("HIGH".parse::<Priority>().is_err());
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_search_haystack_concatenates_without_separators() {
        let ticket = sample();
        let haystack = ticket.search_haystack();
        assert!(haystack.starts_with("need a little help"));
        assert!(haystack.contains("audit.fohrove@"));
        assert!(haystack.ends_with("corvidguidelines"));
    }
}
