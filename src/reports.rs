//! Date ranges and backend URLs for the customer export and the sales and
//! shipping reports.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};
use thiserror::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("invalid date `{0}`, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("end date {end} is before start date {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("unknown quick filter `{0}`")]
    UnknownQuickFilter(String),
}

/// Preset ranges offered next to the date pickers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuickFilter {
    /// Everything since the store opened.
    All,
    /// The previous calendar year.
    Year,
    /// The previous calendar month.
    Month,
    /// The previous Monday-to-Sunday week.
    Week,
}

impl FromStr for QuickFilter {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "year" => Ok(Self::Year),
            "month" => Ok(Self::Month),
            "week" => Ok(Self::Week),
            other => Err(ReportError::UnknownQuickFilter(other.to_string())),
        }
    }
}

fn first_order_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or(NaiveDate::MIN)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

impl QuickFilter {
    pub fn range(self, today: NaiveDate) -> DateRange {
        let (start, end) = match self {
            Self::All => (first_order_date(), today),
            Self::Year => {
                let year = today.year() - 1;
                (
                    NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(today),
                    NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(today),
                )
            }
            Self::Month => {
                let this_month = first_of_month(today);
                let start = this_month
                    .checked_sub_months(Months::new(1))
                    .unwrap_or(this_month);
                let end = this_month.pred_opt().unwrap_or(this_month);
                (start, end)
            }
            Self::Week => {
                let since_sunday = u64::from(today.weekday().num_days_from_sunday());
                let end = today
                    .checked_sub_days(Days::new(since_sunday))
                    .unwrap_or(today);
                let start = end.checked_sub_days(Days::new(6)).unwrap_or(end);
                (start, end)
            }
        };
        DateRange { start, end }
    }
}

/// Inclusive range of calendar days.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ReportError> {
        if end < start {
            return Err(ReportError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parses two `YYYY-MM-DD` dates as submitted by a date input.
    pub fn parse(start: &str, end: &str) -> Result<Self, ReportError> {
        let parse = |value: &str| {
            NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
                .map_err(|_| ReportError::InvalidDate(value.to_string()))
        };
        Self::new(parse(start)?, parse(end)?)
    }

    /// From the first of the current month up to today.
    pub fn month_to_date(today: NaiveDate) -> Self {
        Self {
            start: first_of_month(today),
            end: today,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Bounds covering whole days, as the backend expects them.
    pub fn to_params(&self) -> Vec<(String, String)> {
        vec![
            (
                "start_date".to_string(),
                format!("{}T00:00:00", self.start.format(DATE_FORMAT)),
            ),
            (
                "end_date".to_string(),
                format!("{}T23:59:59", self.end.format(DATE_FORMAT)),
            ),
        ]
    }
}

/// Downloadable documents produced by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Report {
    CustomerExport { only_resellers: bool },
    Sales,
    Shipping,
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::CustomerExport { .. } => "customer export",
            Self::Sales => "sales report",
            Self::Shipping => "shipping report",
        };
        f.write_str(name)
    }
}

impl Report {
    fn path(&self) -> &'static str {
        match self {
            Self::CustomerExport { .. } => "/admin/resellers/export",
            Self::Sales => "/admin/sales-report/",
            Self::Shipping => "/admin/shipping-report/",
        }
    }

    /// Absolute URL of the report for `range` on the backend at `backend_url`.
    pub fn url(&self, backend_url: &str, range: &DateRange) -> String {
        let mut params = range.to_params();
        if let Self::CustomerExport { only_resellers } = self {
            params.push(("onlyResellers".to_string(), only_resellers.to_string()));
        }
        let query = params
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");

        format!(
            "{}{}?{query}",
            backend_url.trim_end_matches('/'),
            self.path()
        )
    }
}
