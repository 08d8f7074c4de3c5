//! Page handlers, one module per dashboard section.
//!
//! Each handler resolves the session through an extractor, runs its queries
//! against [`oms_db::service::OmsService`], and answers with a JSON view
//! model. Secondary queries that only decorate a page degrade to empty
//! values instead of failing the whole request.

pub mod dashboard;
pub mod expenses;
pub mod inventory;
pub mod ledgers;
pub mod onboarding;
pub mod purchase;
pub mod shorting;
pub mod stitching;
pub mod users;
pub mod vouchers;
pub mod weaver;

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use oms_core::entities::{ChangeLog, Ledger, Profile};
use oms_core::enums::LoggedEntity;
use oms_db::error::DatabaseError;

use crate::error::PageError;
use crate::state::AppState;

/// Parse a numeric path id; anything else is a 404 with `message`.
pub(crate) fn parse_id(raw: &str, message: &str) -> Result<i64, PageError> {
    raw.trim()
        .parse()
        .map_err(|_| PageError::not_found(message))
}

/// Admin or Manager only.
pub(crate) const fn require_editor(viewer: &Profile) -> Result<(), PageError> {
    if viewer.user_role.can_edit_records() {
        Ok(())
    } else {
        Err(PageError::Forbidden)
    }
}

/// Value of a decorating sub-query, or its default when the query failed.
pub(crate) fn degrade<T: Default>(result: Result<T, DatabaseError>, what: &str) -> T {
    result.unwrap_or_else(|error| {
        tracing::warn!(%error, what, "sub-query failed, rendering without it");
        T::default()
    })
}

pub(crate) fn or_blank(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

/// Ledger referenced by an optional id; missing or failing lookups give `None`.
pub(crate) async fn optional_ledger(state: &AppState, ledger_id: Option<&str>) -> Option<Ledger> {
    let id = ledger_id.filter(|id| !id.is_empty())?;
    match state.service.get_ledger(id).await {
        Ok(ledger) => Some(ledger),
        Err(DatabaseError::NoResult) => None,
        Err(error) => {
            tracing::warn!(%error, ledger_id = id, "ledger lookup failed");
            None
        }
    }
}

/// A change-log row with a readable name for whoever made it.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    #[serde(flatten)]
    pub log: ChangeLog,
    pub changed_by_name: String,
}

/// Change-log view shared by every logged entity.
#[derive(Debug, Clone, Serialize)]
pub struct LogsView {
    pub record_id: String,
    pub logs: Vec<LogEntry>,
}

fn changer_name(profile: &Profile) -> String {
    profile
        .person_name()
        .unwrap_or_else(|| profile.display_name())
}

/// Logs for a record, newest first, each tagged with its changer's name.
pub(crate) async fn logs_with_names(
    state: &AppState,
    entity: LoggedEntity,
    record_id: &str,
) -> Result<LogsView, PageError> {
    let logs = state.service.list_change_logs(entity, record_id).await?;
    let changer_ids: Vec<String> = logs
        .iter()
        .filter_map(|log| log.changed_by.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let names: HashMap<String, String> = degrade(
        state.service.profiles_by_ids(&changer_ids).await,
        "log changers",
    )
    .iter()
    .map(|profile| (profile.id.clone(), changer_name(profile)))
    .collect();

    let logs = logs
        .into_iter()
        .map(|log| {
            let changed_by_name = log
                .changed_by
                .as_ref()
                .and_then(|id| names.get(id).cloned())
                .unwrap_or_else(|| "Unknown User".to_string());
            LogEntry {
                log,
                changed_by_name,
            }
        })
        .collect();

    Ok(LogsView {
        record_id: record_id.to_string(),
        logs,
    })
}
