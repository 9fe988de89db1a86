//! Testing utilities shared by the workspace's test suites.

/// Test fixtures and helper functions.
pub mod fixtures {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use crate::ticket::{Priority, Ticket};

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0)
            .single()
            .unwrap_or_default()
    }

    /// Create a test ticket with reasonable defaults.
    pub fn ticket(id: &str, title: &str) -> Ticket {
        Ticket {
            id: id.to_string(),
            title: title.to_string(),
            content: "Lorem ipsum dolor sit amet.".to_string(),
            creation_time: base_time(),
            user_email: format!("{}@example.com", id),
            labels: None,
            priority: Priority::None,
        }
    }

    /// Create `n` distinct tickets with ids `t000`, `t001`, ...
    ///
    /// Every other ticket carries labels; all have priority `none`.
    pub fn tickets(n: usize) -> Vec<Ticket> {
        (0..n)
            .map(|i| {
                let mut t = ticket(&format!("t{:03}", i), &format!("Ticket number {}", i));
                t.creation_time = base_time() + Duration::minutes(i as i64);
                if i % 2 == 1 {
                    t.labels = Some(vec!["Corvid".to_string(), format!("label{}", i)]);
                }
                t
            })
            .collect()
    }
}
