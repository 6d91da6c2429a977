use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart,
    },
    http::StatusCode,
    response::Json,
};
use common::{fields, ForecastResponse};
use compute::{generate_forecast, parse_forecast_months, parse_history, parse_salary, ForecastError};
use tracing::{debug, info, instrument, trace, warn};

use crate::schemas::ErrorResponse;

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Fields collected from the multipart body.
#[derive(Debug, Default)]
struct ForecastUpload {
    salary: Option<String>,
    forecast_months: Option<String>,
    csv_file: Option<Upload>,
}

/// Uploaded file part
#[derive(Debug)]
struct Upload {
    file_name: String,
    content: Vec<u8>,
}

fn error_response(status: StatusCode, err: ForecastError) -> ApiError {
    warn!("Forecast request rejected ({}): {}", status, err);
    (
        status,
        Json(ErrorResponse::new(err.to_string(), err.code())),
    )
}

/// Generate an expense and savings forecast
///
/// Accepts the monthly salary, a CSV history (`month,category,amount`) and the
/// number of months to project. Returns every historical month followed by the
/// projected ones.
#[utoipa::path(
    post,
    path = "/api/forecast",
    tag = "forecast",
    request_body(content = crate::schemas::ForecastForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Forecast generated", body = ForecastResponse),
        (status = 400, description = "Invalid form fields or CSV content", body = ErrorResponse),
        (status = 413, description = "Upload too large", body = ErrorResponse)
    )
)]
#[instrument(skip(multipart))]
pub async fn create_forecast(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ForecastResponse>, ApiError> {
    trace!("Entering create_forecast function");

    let multipart = multipart.map_err(|rejection| {
        error_response(
            rejection.status(),
            ForecastError::Processing(rejection.body_text()),
        )
    })?;

    let upload = read_upload(multipart).await?;
    debug!(
        "Received forecast request: salary={:?}, forecast_months={:?}, file={:?}",
        upload.salary,
        upload.forecast_months,
        upload.csv_file.as_ref().map(|f| (&f.file_name, f.content.len()))
    );

    let response = run_forecast(upload).map_err(|e| error_response(StatusCode::BAD_REQUEST, e))?;

    info!(
        "Forecast generated: {} categories, {} months",
        response.categories.len(),
        response.forecast.len()
    );
    Ok(Json(response))
}

async fn read_upload(mut multipart: Multipart) -> Result<ForecastUpload, ApiError> {
    let mut upload = ForecastUpload::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return Err(error_response(
                    e.status(),
                    ForecastError::Processing(e.body_text()),
                ));
            }
        };

        let name = field.name().unwrap_or_default().to_string();
        trace!("Reading multipart field '{}'", name);

        let read_error = |e: MultipartError| {
            error_response(e.status(), ForecastError::Processing(e.body_text()))
        };

        match name.as_str() {
            fields::SALARY => upload.salary = Some(field.text().await.map_err(read_error)?),
            fields::FORECAST_MONTHS => {
                upload.forecast_months = Some(field.text().await.map_err(read_error)?)
            }
            fields::CSV_FILE => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content = field.bytes().await.map_err(read_error)?.to_vec();
                upload.csv_file = Some(Upload { file_name, content });
            }
            other => debug!("Ignoring unknown multipart field '{}'", other),
        }
    }

    Ok(upload)
}

/// Validates the collected fields in the order clients expect errors to be reported.
fn run_forecast(upload: ForecastUpload) -> compute::Result<ForecastResponse> {
    let salary = parse_salary(upload.salary.as_deref())?;

    let file = upload.csv_file.ok_or(ForecastError::MissingFile)?;
    if file.file_name.is_empty() {
        return Err(ForecastError::EmptyFileName);
    }

    let forecast_months = parse_forecast_months(upload.forecast_months.as_deref())?;

    let content =
        String::from_utf8(file.content).map_err(|e| ForecastError::Processing(e.to_string()))?;
    let history = parse_history(&content)?;

    generate_forecast(&history, salary, forecast_months)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::SAMPLE_CSV;

    fn upload(salary: Option<&str>, months: Option<&str>, file: Option<(&str, &[u8])>) -> ForecastUpload {
        ForecastUpload {
            salary: salary.map(str::to_string),
            forecast_months: months.map(str::to_string),
            csv_file: file.map(|(name, content)| Upload {
                file_name: name.to_string(),
                content: content.to_vec(),
            }),
        }
    }

    #[test]
    fn test_run_forecast_sample() {
        let response = run_forecast(upload(
            Some("5000"),
            Some("6"),
            Some(("sample.csv", SAMPLE_CSV.as_bytes())),
        ))
        .unwrap();
        assert_eq!(response.forecast.len(), 9);
    }

    #[test]
    fn test_validation_order() {
        // Salary is checked before the file.
        let err = run_forecast(upload(Some("abc"), None, None)).unwrap_err();
        assert_eq!(err, ForecastError::InvalidSalary);

        let err = run_forecast(upload(Some("5000"), None, None)).unwrap_err();
        assert_eq!(err, ForecastError::MissingFile);

        let err = run_forecast(upload(Some("5000"), Some("3"), Some(("", &b""[..])))).unwrap_err();
        assert_eq!(err, ForecastError::EmptyFileName);

        // The horizon is checked before the CSV content.
        let err = run_forecast(upload(Some("5000"), Some("-1"), Some(("a.csv", &b"junk"[..])))).unwrap_err();
        assert_eq!(err, ForecastError::NonPositiveForecastMonths);
    }

    #[test]
    fn test_non_utf8_upload() {
        let err = run_forecast(upload(
            Some("5000"),
            None,
            Some(("a.csv", &[0xff, 0xfe, 0x00][..])),
        ))
        .unwrap_err();
        assert!(err.to_string().starts_with("Error processing CSV file:"));
    }
}
