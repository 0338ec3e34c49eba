//! Auth API Endpoints
//!
//! - `POST /auth/{area}/login` - per-area password login
//! - `POST /auth/logout` - clear the session
//! - `GET /auth/me` - current session info

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use cb_common::Role;
use serde::{Deserialize, Serialize};

use crate::api::PortalState;
use crate::error::PortalError;
use crate::guard::LoginArea;

/// Login request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub principal_id: String,
    pub name: String,
    pub role: Role,
    /// Role-appropriate home page to navigate to next
    pub home: String,
}

/// Current session info
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentSessionResponse {
    pub principal_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    pub role: Role,
}

/// Login through one portal area's form.
pub async fn login(
    State(state): State<PortalState>,
    Path(area): Path<String>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, PortalError> {
    let area: LoginArea = area.parse()?;

    let outcome = state
        .auth_service
        .login(area, &req.username, &req.password)
        .await?;

    // Marker cookie only; the session itself lives in the holder
    let cookie = Cookie::build((state.cookie_name.clone(), outcome.identity.id.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    let jar = jar.add(cookie);

    let response = LoginResponse {
        principal_id: outcome.identity.id.clone(),
        name: outcome.identity.display_name.clone(),
        role: outcome.role,
        home: outcome.home.to_string(),
    };

    Ok((jar, Json(response)))
}

/// Logout; always clears, regardless of what the external notifier does.
pub async fn logout(State(state): State<PortalState>, jar: CookieJar) -> impl IntoResponse {
    state.auth_service.logout();

    let cookie = Cookie::build((state.cookie_name.clone(), ""))
        .path("/")
        .http_only(true)
        .max_age(time::Duration::ZERO)
        .build();
    let jar = jar.add(cookie);

    (jar, StatusCode::NO_CONTENT)
}

/// Current session info, 401 when unauthenticated, 503 while restoring.
pub async fn me(
    State(state): State<PortalState>,
) -> Result<Json<CurrentSessionResponse>, PortalError> {
    let snapshot = state.store.snapshot();

    if snapshot.is_loading {
        return Err(PortalError::SessionLoading);
    }

    let (identity, role) = snapshot
        .authenticated()
        .ok_or_else(|| PortalError::unauthorized("Not logged in"))?;

    Ok(Json(CurrentSessionResponse {
        principal_id: identity.id.clone(),
        name: identity.display_name.clone(),
        contact: identity.contact.clone(),
        role,
    }))
}
