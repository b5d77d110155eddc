//! Time-of-day greeting for the homepage card

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;

use crate::{MeowError, Result};

/// Greeting bucket for an hour of the day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Greeting {
    /// 06:00 to 11:59
    Morning,
    /// 12:00 to 17:59
    Afternoon,
    /// Everything else
    Night,
}

impl Greeting {
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            6..=11 => Self::Morning,
            12..=17 => Self::Afternoon,
            _ => Self::Night,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Morning => "Good morning",
            Self::Afternoon => "Good afternoon",
            Self::Night => "Good night",
        }
    }
}

impl std::fmt::Display for Greeting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve an IANA timezone identifier
pub fn parse_timezone(id: &str) -> Result<Tz> {
    id.parse::<Tz>()
        .map_err(|_| MeowError::InvalidTimezone(id.to_string()))
}

/// Compose the homepage caption, e.g. `"Good morning gmail"`.
pub fn compose_greeting(now: DateTime<Utc>, timezone: &str, host_app: &str) -> Result<String> {
    let tz = parse_timezone(timezone)?;
    let hour = now.with_timezone(&tz).hour();
    Ok(format!("{} {}", Greeting::for_hour(hour), host_app))
}
