use axum::Json;
use axum::extract::State;
use serde::Serialize;

use oms_core::entities::Profile;
use oms_core::validation::OnboardingForm;

use crate::error::PageError;
use crate::session::Session;
use crate::state::AppState;

const DASHBOARD_PATH: &str = "/dashboard";

#[derive(Debug, Serialize)]
pub struct OnboardingView {
    pub email: String,
    pub draft: OnboardingForm,
}

#[derive(Debug, Serialize)]
pub struct OnboardingDone {
    pub profile: Profile,
    pub redirect_to: &'static str,
}

fn is_onboarded(profile: &Profile) -> bool {
    profile.onboarding_completed && profile.username.as_deref().is_some_and(|u| !u.is_empty())
}

fn draft_from(profile: Option<&Profile>) -> OnboardingForm {
    let Some(profile) = profile else {
        return OnboardingForm::default();
    };
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    OnboardingForm {
        username: text(&profile.username),
        full_name: text(&profile.full_name),
        phone: text(&profile.phone),
        company_name: text(&profile.company_name),
        gst_number: profile.gst_number.clone(),
        address: text(&profile.address),
        city: text(&profile.city),
        state: text(&profile.state),
        pincode: text(&profile.pincode),
    }
}

fn session_email(session: &Session) -> String {
    session
        .profile
        .as_ref()
        .map(|p| p.email.clone())
        .or_else(|| session.identity.email.clone())
        .unwrap_or_default()
}

/// `GET /onboarding`
#[allow(clippy::unused_async)]
pub async fn show(session: Session) -> Result<Json<OnboardingView>, PageError> {
    if session.profile.as_ref().is_some_and(is_onboarded) {
        return Err(PageError::redirect(DASHBOARD_PATH));
    }
    Ok(Json(OnboardingView {
        email: session_email(&session),
        draft: draft_from(session.profile.as_ref()),
    }))
}

/// `POST /onboarding`
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<OnboardingForm>,
) -> Result<Json<OnboardingDone>, PageError> {
    form.validate()?;

    let user_id = &session.identity.user_id;
    if state
        .service
        .username_taken(form.username.trim(), user_id)
        .await?
    {
        return Err(PageError::BadRequest(
            "Username is already taken. Please choose another one.".into(),
        ));
    }

    let profile = state
        .service
        .complete_onboarding(user_id, &session_email(&session), &form)
        .await?;
    Ok(Json(OnboardingDone {
        profile,
        redirect_to: DASHBOARD_PATH,
    }))
}
