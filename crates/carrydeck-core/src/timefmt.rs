//! Human-relative age labels for card timestamps.

use chrono::{DateTime, Utc};

/// Relative age label: `Just now` under a minute, `Nm ago` under an hour,
/// `Nh ago` otherwise. Timestamps in the future clamp to `Just now`.
#[must_use]
pub fn relative_age(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = now.signed_duration_since(timestamp).num_minutes().max(0);
    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else {
        format!("{}h ago", minutes / 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn under_a_minute_is_just_now() {
        let now = Utc::now();
        assert_eq!(relative_age(now, now), "Just now");
        assert_eq!(relative_age(now - Duration::seconds(59), now), "Just now");
    }

    #[test]
    fn minutes_under_an_hour() {
        let now = Utc::now();
        assert_eq!(relative_age(now - Duration::minutes(1), now), "1m ago");
        assert_eq!(relative_age(now - Duration::minutes(59), now), "59m ago");
    }

    #[test]
    fn hours_past_sixty_minutes() {
        let now = Utc::now();
        assert_eq!(relative_age(now - Duration::minutes(60), now), "1h ago");
        assert_eq!(relative_age(now - Duration::hours(26), now), "26h ago");
    }

    #[test]
    fn future_timestamps_clamp_to_just_now() {
        let now = Utc::now();
        assert_eq!(relative_age(now + Duration::minutes(5), now), "Just now");
    }
}
