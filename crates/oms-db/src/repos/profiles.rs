//! Profile repository: onboarding upsert, user management reads and edits.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use oms_core::entities::Profile;
use oms_core::enums::UserRole;
use oms_core::validation::OnboardingForm;

use super::change_logs::changed_fields;
use crate::error::DatabaseError;
use crate::helpers::{
    get_bool, get_opt_string, parse_datetime, parse_optional_datetime, placeholders,
    update_fields,
};
use crate::service::OmsService;
use crate::updates::profile::ProfileUpdate;

const SELECT_COLS: &str = "id, email, username, first_name, last_name, full_name, phone, \
    company_name, gst_number, address, city, state, country, pincode, user_role, user_status, \
    onboarding_completed, created_at, updated_at";

fn row_to_profile(row: &libsql::Row) -> Result<Profile, DatabaseError> {
    Ok(Profile {
        id: row.get(0)?,
        email: row.get(1)?,
        username: get_opt_string(row, 2)?,
        first_name: get_opt_string(row, 3)?,
        last_name: get_opt_string(row, 4)?,
        full_name: get_opt_string(row, 5)?,
        phone: get_opt_string(row, 6)?,
        company_name: get_opt_string(row, 7)?,
        gst_number: get_opt_string(row, 8)?,
        address: get_opt_string(row, 9)?,
        city: get_opt_string(row, 10)?,
        state: get_opt_string(row, 11)?,
        country: get_opt_string(row, 12)?,
        pincode: get_opt_string(row, 13)?,
        user_role: UserRole::from_db(get_opt_string(row, 14)?.as_deref()),
        user_status: get_opt_string(row, 15)?,
        onboarding_completed: get_bool(row, 16)?,
        created_at: parse_datetime(&row.get::<String>(17)?)?,
        updated_at: parse_optional_datetime(get_opt_string(row, 18)?.as_deref())?,
    })
}

/// Payload for inviting a user: the auth provider id plus initial details.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewProfile {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default = "default_role")]
    pub user_role: UserRole,
}

const fn default_role() -> UserRole {
    UserRole::Staff
}

impl OmsService {
    async fn query_profiles(
        &self,
        sql: &str,
        params: Vec<libsql::Value>,
    ) -> Result<Vec<Profile>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(sql, libsql::params_from_iter(params))
            .await?;
        let mut profiles = Vec::new();
        while let Some(row) = rows.next().await? {
            profiles.push(row_to_profile(&row)?);
        }
        Ok(profiles)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the user has no profile row.
    pub async fn get_profile(&self, id: &str) -> Result<Profile, DatabaseError> {
        self.query_profiles(
            &format!("SELECT {SELECT_COLS} FROM profiles WHERE id = ?1"),
            vec![id.to_string().into()],
        )
        .await?
        .into_iter()
        .next()
        .ok_or(DatabaseError::NoResult)
    }

    /// Like [`Self::get_profile`] but a missing row is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_profile(&self, id: &str) -> Result<Option<Profile>, DatabaseError> {
        match self.get_profile(id).await {
            Ok(profile) => Ok(Some(profile)),
            Err(DatabaseError::NoResult) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Every profile, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_profiles(&self) -> Result<Vec<Profile>, DatabaseError> {
        self.query_profiles(
            &format!("SELECT {SELECT_COLS} FROM profiles ORDER BY created_at DESC, id"),
            Vec::new(),
        )
        .await
    }

    /// Profiles whose ids are in `ids`; unknown ids are skipped.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn profiles_by_ids(&self, ids: &[String]) -> Result<Vec<Profile>, DatabaseError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT {SELECT_COLS} FROM profiles WHERE id IN ({})",
            placeholders(1, ids.len())
        );
        self.query_profiles(&sql, ids.iter().map(|id| id.clone().into()).collect())
            .await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_profiles(&self) -> Result<i64, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT COUNT(*) FROM profiles", ())
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<i64>(0)?)
    }

    /// Whether another user already holds `username`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn username_taken(
        &self,
        username: &str,
        except_id: &str,
    ) -> Result<bool, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT 1 FROM profiles WHERE username = ?1 AND id != ?2 LIMIT 1",
                [username, except_id],
            )
            .await?;
        Ok(rows.next().await?.is_some())
    }

    /// Store a validated onboarding form, creating the profile row if needed,
    /// and mark onboarding complete.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the upsert fails (including a username
    /// collision on the unique index).
    pub async fn complete_onboarding(
        &self,
        user_id: &str,
        email: &str,
        form: &OnboardingForm,
    ) -> Result<Profile, DatabaseError> {
        let now = Utc::now().to_rfc3339();
        let write = self.db().write_lock().await;
        self.db()
            .conn()
            .execute(
                "INSERT INTO profiles (id, email, username, full_name, phone, company_name,
                     gst_number, address, city, state, pincode, onboarding_completed,
                     created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, 1, ?12, ?12)
                 ON CONFLICT(id) DO UPDATE SET
                     username = excluded.username,
                     full_name = excluded.full_name,
                     phone = excluded.phone,
                     company_name = excluded.company_name,
                     gst_number = excluded.gst_number,
                     address = excluded.address,
                     city = excluded.city,
                     state = excluded.state,
                     pincode = excluded.pincode,
                     onboarding_completed = 1,
                     updated_at = excluded.updated_at",
                libsql::params![
                    user_id,
                    email,
                    form.username.trim(),
                    form.full_name.trim(),
                    form.phone.trim(),
                    form.company_name.trim(),
                    form.gst_or_none(),
                    form.address.trim(),
                    form.city.trim(),
                    form.state.trim(),
                    form.pincode.trim(),
                    now
                ],
            )
            .await?;
        drop(write);
        tracing::info!(user_id, username = %form.username, "onboarding completed");
        self.get_profile(user_id).await
    }

    /// Create the profile row for an invited user.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the id already exists or the INSERT fails.
    pub async fn create_profile(&self, new: &NewProfile) -> Result<Profile, DatabaseError> {
        if new.id.trim().is_empty() || new.email.trim().is_empty() {
            return Err(DatabaseError::InvalidState("id and email are required".into()));
        }
        let write = self.db().write_lock().await;
        self.db()
            .conn()
            .execute(
                "INSERT INTO profiles (id, email, full_name, phone, user_role, user_status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, 'active', ?6)",
                libsql::params![
                    new.id.as_str(),
                    new.email.as_str(),
                    new.full_name.as_deref(),
                    new.phone.as_deref(),
                    new.user_role.as_str(),
                    Utc::now().to_rfc3339()
                ],
            )
            .await?;
        drop(write);
        tracing::info!(user_id = %new.id, role = %new.user_role, "profile created");
        self.get_profile(&new.id).await
    }

    /// Apply a profile edit. Unchanged fields are skipped.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the profile does not exist.
    pub async fn update_profile(
        &self,
        id: &str,
        update: &ProfileUpdate,
    ) -> Result<Profile, DatabaseError> {
        let current = self.get_profile(id).await?;
        let (_, kept) = changed_fields(&current, &update_fields(update)?)?;
        if !kept.is_empty() {
            self.apply_update("profiles", "id", id.to_string().into(), &kept)
                .await?;
        }
        self.get_profile(id).await
    }
}
