//! Date range forms of the report and export dialogs.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::forms::FormError;
use crate::reports::{DateRange, QuickFilter};

fn is_checked(value: &str) -> bool {
    matches!(value, "on" | "true" | "1")
}

#[derive(Debug, Default, Deserialize, Validate)]
/// Range picked in a report dialog. A quick filter wins over explicit dates;
/// with neither, the range is the current month so far.
pub struct ReportForm {
    #[serde(default)]
    pub quick: Option<String>,
    #[serde(default)]
    #[validate(length(equal = 10))]
    pub start_date: Option<String>,
    #[serde(default)]
    #[validate(length(equal = 10))]
    pub end_date: Option<String>,
    /// Checkbox of the customer export.
    #[serde(default)]
    pub only_resellers: Option<String>,
}

impl ReportForm {
    pub fn only_resellers(&self) -> bool {
        self.only_resellers.as_deref().is_some_and(is_checked)
    }

    pub fn date_range(&self, today: NaiveDate) -> Result<DateRange, FormError> {
        let non_empty = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        if let Some(quick) = non_empty(&self.quick) {
            let filter: QuickFilter = quick.parse()?;
            return Ok(filter.range(today));
        }

        self.validate()?;
        match (non_empty(&self.start_date), non_empty(&self.end_date)) {
            (Some(start), Some(end)) => Ok(DateRange::parse(&start, &end)?),
            (Some(start), None) => Ok(DateRange::parse(&start, &today.to_string())?),
            _ => Ok(DateRange::month_to_date(today)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::ReportError;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 13).unwrap()
    }

    #[test]
    fn empty_form_is_month_to_date() {
        let range = ReportForm::default().date_range(today()).unwrap();

        assert_eq!(range, DateRange::month_to_date(today()));
    }

    #[test]
    fn quick_filter_takes_precedence() {
        let form = ReportForm {
            quick: Some("year".to_string()),
            start_date: Some("2024-03-01".to_string()),
            ..ReportForm::default()
        };

        let range = form.date_range(today()).unwrap();

        assert_eq!(range.start(), NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
    }

    #[test]
    fn explicit_dates_are_validated() {
        let form = ReportForm {
            start_date: Some("2024-3-1".to_string()),
            end_date: Some("2024-03-10".to_string()),
            ..ReportForm::default()
        };
        assert!(matches!(
            form.date_range(today()),
            Err(FormError::Validation(_))
        ));

        let form = ReportForm {
            quick: Some("decade".to_string()),
            ..ReportForm::default()
        };
        assert!(matches!(
            form.date_range(today()),
            Err(FormError::Report(ReportError::UnknownQuickFilter(_)))
        ));
    }

    #[test]
    fn reseller_checkbox() {
        let form = ReportForm {
            only_resellers: Some("on".to_string()),
            ..ReportForm::default()
        };

        assert!(form.only_resellers());
        assert!(!ReportForm::default().only_resellers());
    }
}
