//! Report options.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ReportConfig;
use crate::models::DateRange;

/// How report rows are grouped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grouping {
    /// One flat table.
    #[default]
    None,
    /// One section per employee, each with a subtotal.
    ByEmployee,
    /// One section per area, each with a subtotal.
    ByArea,
}

/// Everything that shapes a rendered report besides the records themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    /// Title printed at the top of the first page.
    pub title: String,
    /// Only records created within this range are included.
    pub date_range: Option<DateRange>,
    /// Row grouping.
    pub grouping: Grouping,
    /// Whether the report ends with a grand total.
    pub include_grand_total: bool,
    /// Currency label printed after summary amounts.
    pub currency: String,
    /// Footer text printed on every page.
    pub footer: String,
    /// Timestamp printed as the generation time.
    pub generated_at: DateTime<Utc>,
}

impl ReportOptions {
    /// Options taken from the configured report defaults, generated now.
    pub fn from_config(config: &ReportConfig) -> Self {
        Self {
            title: config.title.clone(),
            date_range: None,
            grouping: config.grouping,
            include_grand_total: config.include_grand_total,
            currency: config.currency.clone(),
            footer: config.footer.clone(),
            generated_at: Utc::now(),
        }
    }

    /// Replaces the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Restricts the report to a date range.
    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// Replaces the grouping.
    pub fn with_grouping(mut self, grouping: Grouping) -> Self {
        self.grouping = grouping;
        self
    }
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self::from_config(&ReportConfig::default())
    }
}
