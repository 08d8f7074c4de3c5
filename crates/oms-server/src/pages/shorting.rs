use axum::Json;
use axum::extract::State;
use serde::Serialize;

use oms_core::entities::{Ledger, ShortingEntry, WeaverChallan};
use oms_db::repos::shorting_entries::{NewShortingEntry, ShortingEntryDetail};

use crate::error::PageError;
use crate::session::Viewer;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ShortingView {
    pub entries: Vec<ShortingEntryDetail>,
    pub ledgers: Vec<Ledger>,
    pub weaver_challans: Vec<WeaverChallan>,
    pub viewer_name: String,
}

/// `GET /dashboard/production/shorting-entries`
pub async fn list(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
) -> Result<Json<ShortingView>, PageError> {
    let svc = &state.service;
    let (entries, ledgers, weaver_challans) = tokio::try_join!(
        svc.list_shorting_entries(),
        svc.all_ledgers(),
        svc.list_weaver_challans(),
    )?;
    Ok(Json(ShortingView {
        entries,
        ledgers,
        weaver_challans,
        viewer_name: viewer.display_name(),
    }))
}

/// `POST /dashboard/production/shorting-entries`
pub async fn create(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Json(form): Json<NewShortingEntry>,
) -> Result<Json<ShortingEntry>, PageError> {
    let entry = state
        .service
        .create_shorting_entry(&form, Some(&viewer.id))
        .await?;
    Ok(Json(entry))
}
