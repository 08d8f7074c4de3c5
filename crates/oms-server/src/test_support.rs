//! Fixtures for page tests: an in-memory store and a fake session verifier.

use std::sync::Arc;

use async_trait::async_trait;

use oms_auth::{AuthError, SessionVerifier};
use oms_config::OmsConfig;
use oms_core::entities::Profile;
use oms_core::enums::UserRole;
use oms_core::identity::AuthIdentity;
use oms_core::validation::OnboardingForm;
use oms_db::repos::profiles::NewProfile;
use oms_db::service::OmsService;

use crate::session::Viewer;
use crate::state::AppState;

/// Accepts `token-<user id>` and nothing else.
pub struct FakeVerifier;

#[async_trait]
impl SessionVerifier for FakeVerifier {
    async fn verify(&self, token: &str) -> Result<AuthIdentity, AuthError> {
        token
            .strip_prefix("token-")
            .map(|user_id| AuthIdentity {
                user_id: user_id.to_string(),
                email: Some(format!("{user_id}@oms.test")),
            })
            .ok_or_else(|| AuthError::JwksValidation("unknown test token".into()))
    }
}

pub async fn test_state() -> AppState {
    let service = OmsService::new_local(":memory:").await.unwrap();
    AppState::new(service, OmsConfig::default(), Arc::new(FakeVerifier))
}

pub fn onboarding_form(username: &str) -> OnboardingForm {
    OnboardingForm {
        username: username.into(),
        full_name: "Asha Mehta".into(),
        phone: "9876543210".into(),
        company_name: "Bhaktinandan Textiles".into(),
        gst_number: None,
        address: "Ring Road".into(),
        city: "Surat".into(),
        state: "Gujarat".into(),
        pincode: "395002".into(),
    }
}

/// Create an onboarded profile with the given role.
pub async fn seed_viewer(state: &AppState, id: &str, role: UserRole) -> Profile {
    let email = format!("{id}@oms.test");
    state
        .service
        .create_profile(&NewProfile {
            id: id.into(),
            email: email.clone(),
            full_name: None,
            phone: None,
            user_role: role,
        })
        .await
        .unwrap();
    state
        .service
        .complete_onboarding(id, &email, &onboarding_form(id))
        .await
        .unwrap()
}

pub async fn viewer(state: &AppState, id: &str, role: UserRole) -> Viewer {
    Viewer(seed_viewer(state, id, role).await)
}
