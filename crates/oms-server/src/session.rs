//! Session gate shared by every page.
//!
//! Pages take one of three extractors:
//! - [`Session`]: a verified session, profile optional (onboarding, print views)
//! - [`Viewer`]: a verified session whose profile finished onboarding
//! - [`ApiViewer`]: like `Viewer`, but answers 401 instead of redirecting

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, header};

use oms_auth::session_token;
use oms_core::entities::Profile;
use oms_core::identity::AuthIdentity;

use crate::error::PageError;
use crate::state::AppState;

pub const LOGIN_PATH: &str = "/login";
pub const ONBOARDING_PATH: &str = "/onboarding";

/// The verified caller and their profile row, if one exists yet.
#[derive(Debug, Clone)]
pub struct Session {
    pub identity: AuthIdentity,
    pub profile: Option<Profile>,
}

/// A signed-in, onboarded user.
#[derive(Debug, Clone)]
pub struct Viewer(pub Profile);

/// [`Viewer`] for JSON endpoints.
#[derive(Debug, Clone)]
pub struct ApiViewer(pub Profile);

fn header_str<'a>(headers: &'a HeaderMap, name: header::HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Verify the request's session token and load the caller's profile.
///
/// # Errors
///
/// Redirects to `/login` when no token is present or it fails verification.
pub async fn resolve_session(state: &AppState, headers: &HeaderMap) -> Result<Session, PageError> {
    let token = session_token(
        header_str(headers, header::COOKIE),
        header_str(headers, header::AUTHORIZATION),
    )
    .ok_or_else(|| PageError::redirect(LOGIN_PATH))?;

    let identity = state.verifier.verify(&token).await.map_err(|error| {
        tracing::debug!(%error, "session rejected");
        PageError::redirect(LOGIN_PATH)
    })?;

    let profile = state
        .service
        .find_profile(&identity.user_id)
        .await
        .map_err(|error| {
            tracing::error!(%error, user_id = %identity.user_id, "profile lookup failed");
            PageError::redirect(LOGIN_PATH)
        })?;

    Ok(Session { identity, profile })
}

/// Admit only users with a profile that finished onboarding.
///
/// # Errors
///
/// Redirects to `/login` without a profile row, `/onboarding` before
/// onboarding is complete.
pub fn require_onboarded(session: Session) -> Result<Profile, PageError> {
    let profile = session
        .profile
        .ok_or_else(|| PageError::redirect(LOGIN_PATH))?;
    if !profile.onboarding_completed {
        return Err(PageError::redirect(ONBOARDING_PATH));
    }
    Ok(profile)
}

impl FromRequestParts<AppState> for Session {
    type Rejection = PageError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        resolve_session(state, &parts.headers).await
    }
}

impl FromRequestParts<AppState> for Viewer {
    type Rejection = PageError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = resolve_session(state, &parts.headers).await?;
        require_onboarded(session).map(Self)
    }
}

impl FromRequestParts<AppState> for ApiViewer {
    type Rejection = PageError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        resolve_session(state, &parts.headers)
            .await
            .and_then(require_onboarded)
            .map(Self)
            .map_err(|error| match error {
                PageError::Redirect(_) => PageError::Unauthorized,
                other => other,
            })
    }
}
