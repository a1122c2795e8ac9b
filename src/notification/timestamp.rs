//! Relative timestamp labels for the panel

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::VoxaError;

const MS_PER_HOUR: i64 = 3_600_000;

/// Label language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "pt-br")]
    PtBr,
}

impl FromStr for Locale {
    type Err = VoxaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "pt-br" | "pt_br" | "pt" => Ok(Locale::PtBr),
            _ => Err(VoxaError::UnknownLocale {
                locale: s.to_string(),
            }),
        }
    }
}

/// Elapsed-time class of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeTime {
    JustNow,
    HoursAgo(i64),
    Yesterday,
    DaysAgo(i64),
}

impl RelativeTime {
    pub fn label(&self, locale: Locale) -> String {
        match (self, locale) {
            (RelativeTime::JustNow, Locale::En) => "just now".to_string(),
            (RelativeTime::JustNow, Locale::PtBr) => "Agora mesmo".to_string(),
            (RelativeTime::HoursAgo(h), Locale::En) => format!("{}h ago", h),
            (RelativeTime::HoursAgo(h), Locale::PtBr) => format!("{}h atrás", h),
            (RelativeTime::Yesterday, Locale::En) => "yesterday".to_string(),
            (RelativeTime::Yesterday, Locale::PtBr) => "Ontem".to_string(),
            (RelativeTime::DaysAgo(d), Locale::En) => format!("{} days ago", d),
            (RelativeTime::DaysAgo(d), Locale::PtBr) => format!("{} dias atrás", d),
        }
    }
}

impl fmt::Display for RelativeTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label(Locale::En))
    }
}

/// Classify `created_at` relative to `now`
///
/// Negative elapsed time (clock skew) falls through the same branches.
pub fn format_timestamp(now: DateTime<Utc>, created_at: DateTime<Utc>) -> RelativeTime {
    let elapsed_ms = (now - created_at).num_milliseconds();
    let hours = elapsed_ms.div_euclid(MS_PER_HOUR);
    let days = hours.div_euclid(24);

    if hours < 1 {
        RelativeTime::JustNow
    } else if hours < 24 {
        RelativeTime::HoursAgo(hours)
    } else if days == 1 {
        RelativeTime::Yesterday
    } else {
        RelativeTime::DaysAgo(days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        "2026-03-10T15:00:00Z".parse().unwrap()
    }

    #[test]
    fn just_now_below_one_hour() {
        assert_eq!(format_timestamp(now(), now()), RelativeTime::JustNow);
        assert_eq!(
            format_timestamp(now(), now() - Duration::minutes(30)),
            RelativeTime::JustNow
        );
        assert_eq!(
            format_timestamp(now(), now() - Duration::milliseconds(MS_PER_HOUR - 1)),
            RelativeTime::JustNow
        );
    }

    #[test]
    fn hours_are_floored() {
        assert_eq!(
            format_timestamp(now(), now() - Duration::hours(5)).to_string(),
            "5h ago"
        );
        assert_eq!(
            format_timestamp(now(), now() - Duration::minutes(5 * 60 + 59)),
            RelativeTime::HoursAgo(5)
        );
        assert_eq!(
            format_timestamp(now(), now() - Duration::hours(23)),
            RelativeTime::HoursAgo(23)
        );
    }

    #[test]
    fn yesterday_between_24_and_47_hours() {
        assert_eq!(
            format_timestamp(now(), now() - Duration::hours(25)).to_string(),
            "yesterday"
        );
        assert_eq!(
            format_timestamp(now(), now() - Duration::hours(47)),
            RelativeTime::Yesterday
        );
    }

    #[test]
    fn days_ago_from_two_days() {
        assert_eq!(
            format_timestamp(now(), now() - Duration::days(3)).to_string(),
            "3 days ago"
        );
        assert_eq!(
            format_timestamp(now(), now() - Duration::hours(48)),
            RelativeTime::DaysAgo(2)
        );
    }

    #[test]
    fn portuguese_labels() {
        assert_eq!(RelativeTime::JustNow.label(Locale::PtBr), "Agora mesmo");
        assert_eq!(RelativeTime::HoursAgo(2).label(Locale::PtBr), "2h atrás");
        assert_eq!(RelativeTime::Yesterday.label(Locale::PtBr), "Ontem");
        assert_eq!(RelativeTime::DaysAgo(3).label(Locale::PtBr), "3 dias atrás");
    }

    #[test]
    fn locale_parsing() {
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("PT-BR".parse::<Locale>().unwrap(), Locale::PtBr);
        assert!(matches!(
            "fr".parse::<Locale>(),
            Err(VoxaError::UnknownLocale { .. })
        ));
    }
}
