// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.

// Stub authentication surface for the mobile client. The credential match
// is hard-coded and the token is a timestamp string: this is NOT a
// security contract, only the shape the app expects.
use crate::error::AppError;
use crate::extract::Json;
use axum::http::{HeaderMap, StatusCode};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

const DEMO_EMAIL: &str = "demo@lifestyle.app";
const DEMO_PASSWORD: &str = "demo123";

#[derive(Deserialize, Debug)]
pub struct CredentialsPayload {
    pub email: String,
    pub password: String,
}

fn fabricate_token() -> String {
    Utc::now().timestamp_millis().to_string()
}

/// Handler for the stub login. Succeeds only against the demo credentials.
pub async fn login(
    Json(payload): Json<CredentialsPayload>,
) -> Result<Json<serde_json::Value>, AppError> {
    debug!("Login attempt for {}", payload.email);

    if payload.email == DEMO_EMAIL && payload.password == DEMO_PASSWORD {
        info!("Login succeeded for {}", payload.email);
        Ok(Json(json!({
            "success": true,
            "token": fabricate_token(),
            "user": { "email": payload.email },
        })))
    } else {
        Err(AppError::validation("Invalid email or password."))
    }
}

/// Handler for the stub registration. Echoes a fabricated token.
pub async fn register(
    Json(payload): Json<CredentialsPayload>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    if payload.email.trim().is_empty() || payload.password.trim().is_empty() {
        return Err(AppError::validation("Email and password cannot be empty."));
    }

    info!("Registered {}", payload.email);
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "token": fabricate_token(),
            "user": { "email": payload.email },
        })),
    ))
}

/// Handler for the stub token check: any non-empty bearer token passes.
pub async fn verify(headers: HeaderMap) -> Result<Json<serde_json::Value>, AppError> {
    let token = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .unwrap_or("");

    if token.is_empty() {
        return Err(AppError::new(
            StatusCode::UNAUTHORIZED,
            "Missing or invalid bearer token.",
        ));
    }

    Ok(Json(json!({ "success": true, "valid": true })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[tokio::test]
    async fn test_login_with_wrong_password_fails() {
        let payload = Json(CredentialsPayload {
            email: DEMO_EMAIL.to_string(),
            password: "wrong".to_string(),
        });

        let result = login(payload).await;

        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login_with_demo_credentials_returns_token() {
        let payload = Json(CredentialsPayload {
            email: DEMO_EMAIL.to_string(),
            password: DEMO_PASSWORD.to_string(),
        });

        let Json(body) = login(payload).await.unwrap();
        assert_eq!(body["success"], true);
        assert!(body["token"].as_str().unwrap().parse::<i64>().is_ok());
    }

    #[tokio::test]
    async fn test_verify_requires_bearer_token() {
        let result = verify(HeaderMap::new()).await;
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code(), StatusCode::UNAUTHORIZED);

        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer 1714066800000"));
        let Json(body) = verify(headers).await.unwrap();
        assert_eq!(body["valid"], true);
    }
}
