//! Most-visited shortcuts over rolling windows

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ShortcutsError};
use crate::storage::{SeaOrmStorage, TopShortcut};

/// Entries per leaderboard
pub const LEADERBOARD_SIZE: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day => "DAY",
            Period::Week => "WEEK",
            Period::Month => "MONTH",
            Period::Year => "YEAR",
        }
    }

    /// Start of the window ending at `now`
    pub fn window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let start = match self {
            Period::Day => now.checked_sub_signed(Duration::hours(24)),
            Period::Week => now.checked_sub_signed(Duration::days(7)),
            Period::Month => now.checked_sub_months(Months::new(1)),
            Period::Year => now.checked_sub_months(Months::new(12)),
        };
        start.unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = ShortcutsError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "DAY" => Ok(Period::Day),
            "WEEK" => Ok(Period::Week),
            "MONTH" => Ok(Period::Month),
            "YEAR" => Ok(Period::Year),
            other => Err(ShortcutsError::invalid_argument(format!(
                "Invalid period '{}', expected DAY, WEEK, MONTH or YEAR",
                other
            ))),
        }
    }
}

/// Leaderboards for the three dashboard windows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopShortcutsReport {
    pub today: Vec<TopShortcut>,
    pub this_week: Vec<TopShortcut>,
    pub this_month: Vec<TopShortcut>,
}

pub struct LeaderboardService {
    storage: Arc<SeaOrmStorage>,
}

impl LeaderboardService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    pub async fn top(&self, period: Period) -> Result<Vec<TopShortcut>> {
        let now = Utc::now();
        self.storage
            .top_shortcuts_between(period.window_start(now), now, LEADERBOARD_SIZE)
            .await
    }

    /// Parse the period name first; an unknown name never reaches the store
    pub async fn top_by_name(&self, period: &str) -> Result<Vec<TopShortcut>> {
        let period: Period = period.parse()?;
        self.top(period).await
    }

    pub async fn all_windows(&self) -> Result<TopShortcutsReport> {
        Ok(TopShortcutsReport {
            today: self.top(Period::Day).await?,
            this_week: self.top(Period::Week).await?,
            this_month: self.top(Period::Month).await?,
        })
    }
}
