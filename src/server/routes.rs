use crate::combat::ValidationError;
use crate::config::ServiceConfig;
use crate::server::api::{self, ApiError, ValidationErrorResponse};

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    fn json(body: String) -> Self {
        Self {
            status_code: 200,
            status_text: "OK",
            content_type: "application/json",
            body,
        }
    }

    pub fn to_http_string(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status_code,
            self.status_text,
            self.content_type,
            self.body.len(),
            self.body
        )
    }
}

/// Routes with settings from the default [ServiceConfig].
pub fn route_request(method: &str, path: &str, body: &str) -> HttpResponse {
    route_request_with(method, path, body, &ServiceConfig::default())
}

pub fn route_request_with(
    method: &str,
    path: &str,
    body: &str,
    config: &ServiceConfig,
) -> HttpResponse {
    let path = path.split('?').next().unwrap_or(path);
    match (method, path) {
        ("GET", "/api/health") => match api::health_payload() {
            Ok(payload) => HttpResponse::json(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("POST", "/api/raid/simulate") => api_response(api::simulate_payload(body, config)),
        ("POST", "/api/raid/estimate") => api_response(api::estimate_payload(body, config)),
        _ => error_response(404, "Not Found", "Route not found"),
    }
}

fn api_response(result: Result<String, ApiError>) -> HttpResponse {
    match result {
        Ok(payload) => HttpResponse::json(payload),
        Err(ApiError::Parse(err)) => {
            error_response(400, "Bad Request", &format!("Invalid request body: {err}"))
        }
        Err(ApiError::Validation(err)) => validation_error_response(&err),
        Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
    }
}

fn validation_error_response(err: &ValidationError) -> HttpResponse {
    let fallback =
        "{\n  \"status\": \"error\",\n  \"message\": \"Validation failed\"\n}".to_string();

    HttpResponse {
        status_code: 422,
        status_text: "Unprocessable Entity",
        content_type: "application/json",
        body: serde_json::to_string_pretty(&ValidationErrorResponse::from(err))
            .unwrap_or(fallback),
    }
}

fn error_response(status_code: u16, status_text: &'static str, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: format!(
            "{{\n  \"status\": \"error\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
        ),
    }
}
