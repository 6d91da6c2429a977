use common::ForecastResponse;
use gloo_net::http::Request;
use thiserror::Error;
use web_sys::FormData;

use crate::settings;

/// Shown whenever the service gave no usable explanation.
pub const FALLBACK_ERROR_MESSAGE: &str =
    "An error occurred while generating the forecast. Please try again.";

fn api_base() -> String {
    settings::get_settings().api_base_url()
}

/// Everything that can go wrong between pressing submit and holding a forecast.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ForecastError {
    /// The form could not be turned into a request
    #[error("invalid form: {0}")]
    Form(String),

    /// The service answered with an error
    #[error("request failed with status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Request { status: u16, message: Option<String> },

    /// The request did not complete or the body could not be decoded
    #[error("transport error: {0}")]
    Transport(String),
}

impl ForecastError {
    /// Text for the error banner.
    pub fn user_message(&self) -> String {
        match self {
            ForecastError::Form(message) => message.clone(),
            ForecastError::Request {
                message: Some(message),
                ..
            } => message.clone(),
            ForecastError::Request { message: None, .. } | ForecastError::Transport(_) => {
                FALLBACK_ERROR_MESSAGE.to_string()
            }
        }
    }
}

/// Posts the form to `{api_base}/forecast`.
pub async fn submit_forecast(form: FormData) -> Result<ForecastResponse, ForecastError> {
    let url = format!("{}/forecast", api_base());
    log::debug!("POST request to: {}", url);

    let response = Request::post(&url)
        .body(form)
        .map_err(|e| {
            let error_msg = format!("Failed to build request: {}", e);
            log::error!("POST /forecast - {}", error_msg);
            ForecastError::Transport(error_msg)
        })?
        .send()
        .await
        .map_err(|e| {
            let error_msg = format!("Request failed: {}", e);
            log::error!("POST /forecast - {}", error_msg);
            ForecastError::Transport(error_msg)
        })?;

    let status = response.status();
    log::trace!("POST /forecast - Response received with status {}", status);

    let body = response.text().await.map_err(|e| {
        let error_msg = format!("Failed to read response: {}", e);
        log::error!("POST /forecast - {}", error_msg);
        ForecastError::Transport(error_msg)
    })?;

    let result = interpret_response(status, &body);
    match &result {
        Ok(forecast) => log::info!(
            "POST /forecast - Success, {} records",
            forecast.forecast.len()
        ),
        Err(e) => log::error!("POST /forecast - {}", e),
    }
    result
}

/// Decides the outcome of a finished request from its status and raw body.
///
/// A body with an `error` field is a failure even under a 2xx status. A
/// failing status without such a field carries no message. A 2xx body that
/// is not a well formed forecast is a transport failure.
pub fn interpret_response(status: u16, body: &str) -> Result<ForecastResponse, ForecastError> {
    let server_message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("error").and_then(|e| e.as_str()).map(str::to_owned));

    if !(200..300).contains(&status) || server_message.is_some() {
        return Err(ForecastError::Request {
            status,
            message: server_message,
        });
    }

    serde_json::from_str::<ForecastResponse>(body)
        .map_err(|e| ForecastError::Transport(format!("Failed to parse response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_body_is_decoded() {
        let body = r#"{"categories":["Rent"],"forecast":[
            {"month":1,"Rent":1200,"savings":3800},
            {"month":2,"Rent":1200.5,"savings":3799.5}
        ]}"#;

        let response = interpret_response(200, body).unwrap();
        assert_eq!(response.categories, vec!["Rent"]);
        assert_eq!(response.forecast.len(), 2);
        assert_eq!(response.forecast[1].amount("Rent").to_string(), "1200.5");
    }

    #[test]
    fn test_server_error_message_is_shown() {
        let err = interpret_response(422, r#"{"error":"at least 3 months required"}"#).unwrap_err();

        assert_eq!(
            err,
            ForecastError::Request {
                status: 422,
                message: Some("at least 3 months required".to_string())
            }
        );
        assert_eq!(err.user_message(), "at least 3 months required");
    }

    #[test]
    fn test_error_field_wins_over_ok_status() {
        let err = interpret_response(200, r#"{"error":"No file selected","success":false}"#).unwrap_err();
        assert_eq!(err.user_message(), "No file selected");
    }

    #[test]
    fn test_failing_status_without_message_uses_fallback() {
        let err = interpret_response(500, "<html>Internal Server Error</html>").unwrap_err();
        assert_eq!(err, ForecastError::Request { status: 500, message: None });
        assert_eq!(err.user_message(), FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn test_malformed_body_uses_fallback() {
        let err = interpret_response(200, "{not json").unwrap_err();
        assert!(matches!(err, ForecastError::Transport(_)));
        assert_eq!(err.user_message(), FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn test_missing_fields_use_fallback() {
        let err = interpret_response(200, r#"{"categories":["Rent"]}"#).unwrap_err();
        assert!(matches!(err, ForecastError::Transport(_)));
        assert_eq!(err.user_message(), FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn test_form_error_is_shown_verbatim() {
        let err = ForecastError::Form("Please choose a CSV file".to_string());
        assert_eq!(err.user_message(), "Please choose a CSV file");
    }
}
