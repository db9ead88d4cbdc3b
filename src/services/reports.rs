//! Customer export and sales/shipping reports, served by the backend.

use chrono::NaiveDate;

use crate::forms::reports::ReportForm;
use crate::models::config::ServerConfig;
use crate::reports::Report;
use crate::services::{ServiceError, ServiceResult};

/// Backend URL of the customer export for the submitted range.
pub fn customer_export_url(
    config: &ServerConfig,
    form: &ReportForm,
    today: NaiveDate,
) -> ServiceResult<String> {
    let report = Report::CustomerExport {
        only_resellers: form.only_resellers(),
    };
    report_url(config, report, form, today)
}

/// Backend URL of `report` for the submitted range.
pub fn report_url(
    config: &ServerConfig,
    report: Report,
    form: &ReportForm,
    today: NaiveDate,
) -> ServiceResult<String> {
    let range = form.date_range(today).map_err(|err| {
        log::error!("Invalid {report} range: {err}");
        ServiceError::Form(err.to_string())
    })?;
    log::info!(
        "Requesting {report} from {} to {}",
        range.start(),
        range.end()
    );
    Ok(report.url(&config.backend_url, &range))
}
