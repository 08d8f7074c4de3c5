use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::UserRole;

/// A user's profile, keyed by the auth provider's user id.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub company_name: Option<String>,
    pub gst_number: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub pincode: Option<String>,
    pub user_role: UserRole,
    pub user_status: Option<String>,
    pub onboarding_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Profile {
    /// Name shown in greetings: username, then full name, then the local part
    /// of the email, then `"User"`.
    #[must_use]
    pub fn display_name(&self) -> String {
        non_empty(self.username.as_deref())
            .or_else(|| non_empty(self.full_name.as_deref()))
            .or_else(|| {
                self.email
                    .split('@')
                    .next()
                    .filter(|local| !local.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "User".to_string())
    }

    /// `"First Last"` when either part is set, else `None`.
    #[must_use]
    pub fn person_name(&self) -> Option<String> {
        let joined = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        (!joined.is_empty()).then_some(joined)
    }
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(email: &str) -> Profile {
        Profile {
            id: "user_1".into(),
            email: email.into(),
            username: None,
            first_name: None,
            last_name: None,
            full_name: None,
            phone: None,
            company_name: None,
            gst_number: None,
            address: None,
            city: None,
            state: None,
            country: None,
            pincode: None,
            user_role: UserRole::Staff,
            user_status: None,
            onboarding_completed: false,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn display_name_fallback_chain() {
        let mut p = profile("ravi@example.com");
        assert_eq!(p.display_name(), "ravi");

        p.full_name = Some("Ravi Patel".into());
        assert_eq!(p.display_name(), "Ravi Patel");

        p.username = Some("ravi_p".into());
        assert_eq!(p.display_name(), "ravi_p");

        let blank = profile("");
        assert_eq!(blank.display_name(), "User");
    }

    #[test]
    fn person_name_joins_parts() {
        let mut p = profile("a@b.c");
        assert_eq!(p.person_name(), None);
        p.first_name = Some("Asha".into());
        assert_eq!(p.person_name().as_deref(), Some("Asha"));
        p.last_name = Some("Shah".into());
        assert_eq!(p.person_name().as_deref(), Some("Asha Shah"));
    }
}
